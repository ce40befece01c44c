use chrono::{DateTime, Utc};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct CreateUserRequest { pub email: String, pub name: String }

#[derive(ToSchema)]
pub struct UpdateUserRequest { pub email: Option<String>, pub name: Option<String> }

#[derive(ToSchema)]
pub struct PostDoc {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub author_id: i32,
}

#[derive(ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    /// `null` clears the content
    pub content: Option<String>,
    pub published: Option<bool>,
    pub author_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::find,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::users::list_posts,
        crate::routes::posts::create,
        crate::routes::posts::list,
        crate::routes::posts::find,
        crate::routes::posts::update,
        crate::routes::posts::remove,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            CreateUserRequest,
            UpdateUserRequest,
            PostDoc,
            CreatePostRequest,
            UpdatePostRequest,
            FieldErrorDoc,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "posts")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in ["/health", "/users", "/users/{id}", "/users/{id}/posts", "/posts", "/posts/{id}"] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
