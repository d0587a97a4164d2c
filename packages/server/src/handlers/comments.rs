//! Comment handlers — `/api/posts/{post_id}/comments[/{comment_id}]`.
//!
//! Comments are only reachable through their post; ownership checks happen
//! in [`CommentService`](crate::service::CommentService).

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use quill_api::CommentDto;

use super::AppState;
use crate::error::AppError;

/// `POST /api/posts/{post_id}/comments` — `201` with the stored comment.
pub async fn create(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CommentDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentDto>), AppError> {
    let Path(post_id) = post_id?;
    let Json(dto) = payload?;
    let created = state.comments.create_comment(post_id, dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/posts/{post_id}/comments`
pub async fn list(
    State(state): State<AppState>,
    post_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<CommentDto>>, AppError> {
    let Path(post_id) = post_id?;
    Ok(Json(state.comments.get_comments_by_post_id(post_id).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<CommentDto>, AppError> {
    let Path((post_id, comment_id)) = ids?;
    Ok(Json(state.comments.get_comment_by_id(post_id, comment_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
    payload: Result<Json<CommentDto>, JsonRejection>,
) -> Result<Json<CommentDto>, AppError> {
    let Path((post_id, comment_id)) = ids?;
    let Json(dto) = payload?;
    let updated = state
        .comments
        .update_comment(post_id, comment_id, dto)
        .await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((post_id, comment_id)) = ids?;
    state.comments.delete_comment(post_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
