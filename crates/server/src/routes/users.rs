use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use service::{post::Post, user::User};
use tracing::info;

use crate::{errors::ApiError, routes::ListQuery, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(find).patch(update).delete(remove))
        .route("/users/:id/posts", get(list_posts))
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(payload) = payload?;
    let user = state.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    params(ListQuery),
    responses((status = 200, description = "List OK", body = [crate::openapi::UserDoc]))
)]
pub async fn list(State(state): State<AppState>, q: Result<Query<ListQuery>, QueryRejection>) -> Result<Json<Vec<User>>, ApiError> {
    let Query(q) = q?;
    let users = match q.pagination() {
        Some(page) => state.users.list_page(page).await?,
        None => state.users.list().await?,
    };
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<User>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.users.get(id).await?))
}

#[utoipa::path(
    patch, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = crate::openapi::UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.users.update(id, &payload).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/users/{id}/posts", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Posts of the user", body = [crate::openapi::PostDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list_posts(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Vec<Post>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.posts.list_by_author(id).await?))
}
