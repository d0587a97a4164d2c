//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    handlers::{comments, health, posts, AppState},
    storage::Storage,
};

/// Build the complete application router with shared state.
pub fn build_router(storage: Arc<dyn Storage>, config: ServerConfig) -> Router {
    let state = AppState::new(storage, &config);

    Router::new()
        .route("/health", get(health::health))
        // Posts
        .route("/api/posts", get(posts::list).post(posts::create))
        .route(
            "/api/posts/{id}",
            get(posts::get_by_id).put(posts::update).delete(posts::delete),
        )
        // Comments, always scoped to their post
        .route(
            "/api/posts/{post_id}/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            get(comments::get_by_id)
                .put(comments::update)
                .delete(comments::delete),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
