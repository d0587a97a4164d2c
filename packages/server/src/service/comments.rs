//! Comment service: comments are always addressed through their post.
//!
//! Every operation first loads the post named in the request and fails with
//! `Post not found` before touching any comment or validating any payload.
//! Scoped operations then load the comment and refuse to act on it unless it
//! belongs to that post.

use std::sync::Arc;

use quill::{validate_comment, Comment};
use quill_api::CommentDto;

use crate::mapping::{comment_draft_from_dto, comment_to_dto};
use crate::storage::Storage;

use super::{or_not_found, ServiceError, COMMENT_NOT_IN_POST};

pub struct CommentService {
    storage: Arc<dyn Storage>,
}

impl CommentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Attach a new comment to `post_id`.
    pub async fn create_comment(
        &self,
        post_id: i64,
        dto: CommentDto,
    ) -> Result<CommentDto, ServiceError> {
        self.require_post(post_id).await?;

        let draft = comment_draft_from_dto(dto);
        validate_comment(&draft)?;
        let comment = self
            .storage
            .insert_comment(post_id, &draft)
            .await
            .map_err(or_not_found("Post", post_id))?;

        tracing::info!(post_id, comment_id = comment.id, "comment created");
        Ok(comment_to_dto(&comment))
    }

    /// All comments of `post_id`, oldest first. Empty if the post has none.
    pub async fn get_comments_by_post_id(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentDto>, ServiceError> {
        self.require_post(post_id).await?;
        let comments = self.storage.find_comments_by_post_id(post_id).await?;
        Ok(comments.iter().map(comment_to_dto).collect())
    }

    pub async fn get_comment_by_id(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<CommentDto, ServiceError> {
        let comment = self.find_scoped(post_id, comment_id).await?;
        Ok(comment_to_dto(&comment))
    }

    /// Overwrite name, email and body. The id and owning post never change.
    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        dto: CommentDto,
    ) -> Result<CommentDto, ServiceError> {
        let mut comment = self.find_scoped(post_id, comment_id).await?;

        let draft = comment_draft_from_dto(dto);
        validate_comment(&draft)?;
        comment.apply(draft);
        let updated = self
            .storage
            .update_comment(&comment)
            .await
            .map_err(or_not_found("Comment", comment_id))?;

        tracing::info!(post_id, comment_id, "comment updated");
        Ok(comment_to_dto(&updated))
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), ServiceError> {
        self.find_scoped(post_id, comment_id).await?;
        self.storage
            .delete_comment(comment_id)
            .await
            .map_err(or_not_found("Comment", comment_id))?;

        tracing::info!(post_id, comment_id, "comment deleted");
        Ok(())
    }

    // --- helpers ---------------------------------------------------------------

    async fn require_post(&self, post_id: i64) -> Result<(), ServiceError> {
        self.storage
            .find_post_by_id(post_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("Post", "id", post_id))
    }

    /// Load a comment through its post: post must exist, comment must exist,
    /// and the comment must belong to the post.
    async fn find_scoped(&self, post_id: i64, comment_id: i64) -> Result<Comment, ServiceError> {
        self.require_post(post_id).await?;

        tracing::debug!(post_id, comment_id, "loading comment");
        let comment = self
            .storage
            .find_comment_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", "id", comment_id))?;

        if !comment.belongs_to(post_id) {
            tracing::debug!(
                post_id,
                comment_id,
                owner = comment.post_id,
                "comment addressed through foreign post"
            );
            return Err(ServiceError::BadRequest(COMMENT_NOT_IN_POST.into()));
        }
        Ok(comment)
    }
}
