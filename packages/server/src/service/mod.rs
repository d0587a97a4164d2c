//! Business rules for posts and comments.
//!
//! Services sit between the HTTP handlers and [`Storage`]: they validate
//! drafts, check that referenced rows exist, enforce that a comment is only
//! ever read or modified through the post that owns it, and map entities to
//! transfer objects. Each public method is one request/response with at most
//! one write.
//!
//! [`Storage`]: crate::storage::Storage

pub mod comments;
pub mod posts;

use std::fmt::Display;

use quill::ValidationErrors;

use crate::storage::StorageError;

pub use comments::CommentService;
pub use posts::PostService;

/// Message used when a comment is addressed through a post it does not belong to.
pub const COMMENT_NOT_IN_POST: &str = "Comment does not belong to a post";

/// Errors raised by [`PostService`] and [`CommentService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A post or comment looked up by key does not exist.
    #[error("{resource} not found with {field} : '{value}'")]
    ResourceNotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// The request is well-formed but violates a domain rule, e.g. a comment
    /// addressed through the wrong post.
    #[error("{0}")]
    BadRequest(String),

    /// One or more draft fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A uniqueness rule was violated (duplicate post title).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure in the storage backend.
    #[error(transparent)]
    Storage(StorageError),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, field: &'static str, value: impl Display) -> Self {
        ServiceError::ResourceNotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Storage(other),
        }
    }
}

/// Convert a storage error, turning a bare [`StorageError::NotFound`] into a
/// [`ServiceError::ResourceNotFound`] for the row the caller was touching.
///
/// Covers the window between a service's existence check and its write, when
/// a concurrent request has deleted the row.
pub(crate) fn or_not_found(
    resource: &'static str,
    id: i64,
) -> impl FnOnce(StorageError) -> ServiceError {
    move |e| match e {
        StorageError::NotFound => ServiceError::not_found(resource, "id", id),
        other => other.into(),
    }
}
