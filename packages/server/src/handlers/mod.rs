//! HTTP request handlers for all Quill endpoints.
//!
//! Each submodule covers one resource. Handlers are thin async functions that
//! unpack Axum extractors, call the matching service method and wrap the
//! result; every rule lives in [`crate::service`]. Extractor rejections are
//! turned into [`AppError::BadRequest`] so malformed input still gets the
//! standard error body.
//!
//! [`AppError::BadRequest`]: crate::error::AppError::BadRequest

pub mod comments;
pub mod health;
pub mod posts;

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    service::{CommentService, PostService},
    storage::Storage,
};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    /// Wire both services over one storage backend. Only the paging limits
    /// of `config` are needed once the listener is bound.
    pub fn new(storage: Arc<dyn Storage>, config: &ServerConfig) -> Self {
        Self {
            posts: Arc::new(PostService::new(Arc::clone(&storage), config.paging)),
            comments: Arc::new(CommentService::new(storage)),
        }
    }
}
