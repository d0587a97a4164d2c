//! Post handlers — `/api/posts` and `/api/posts/{id}`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use quill_api::{PageQuery, PostDto, PostPage};

use super::AppState;
use crate::error::AppError;

// ---------------------------------------------------------------------------
// POST /api/posts
// ---------------------------------------------------------------------------

/// `POST /api/posts` — create a post. Responds `201` with the stored post.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PostDto>, JsonRejection>,
) -> Result<(StatusCode, Json<PostDto>), AppError> {
    let Json(dto) = payload?;
    let created = state.posts.create_post(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// GET /api/posts
// ---------------------------------------------------------------------------

/// `GET /api/posts?page_no=&page_size=&sort_by=&sort_dir=` — one page of posts.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PostPage>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.posts.get_all_posts(query).await?))
}

// ---------------------------------------------------------------------------
// /api/posts/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PostDto>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.posts.get_post_by_id(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PostDto>, JsonRejection>,
) -> Result<Json<PostDto>, AppError> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    Ok(Json(state.posts.update_post(id, dto).await?))
}

/// `DELETE /api/posts/{id}` — removes the post and its comments. `204` on success.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.posts.delete_post_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
