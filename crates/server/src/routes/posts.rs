use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use service::post::Post;
use tracing::info;

use crate::{errors::ApiError, routes::ListQuery, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list).post(create))
        .route("/posts/:id", get(find).patch(update).delete(remove))
}

#[utoipa::path(
    post, path = "/posts", tag = "posts",
    request_body = crate::openapi::CreatePostRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PostDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Unknown author")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let Json(payload) = payload?;
    let post = state.posts.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get, path = "/posts", tag = "posts",
    params(ListQuery),
    responses((status = 200, description = "List OK", body = [crate::openapi::PostDoc]))
)]
pub async fn list(State(state): State<AppState>, q: Result<Query<ListQuery>, QueryRejection>) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(q) = q?;
    let posts = match q.pagination() {
        Some(page) => state.posts.list_page(page).await?,
        None => state.posts.list().await?,
    };
    info!(count = posts.len(), "list posts");
    Ok(Json(posts))
}

#[utoipa::path(
    get, path = "/posts/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PostDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Post>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.posts.get(id).await?))
}

#[utoipa::path(
    patch, path = "/posts/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = crate::openapi::UpdatePostRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PostDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Unknown author")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.posts.update(id, &payload).await?))
}

#[utoipa::path(
    delete, path = "/posts/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
