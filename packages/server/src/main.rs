//! `quill-server` — REST API for blog posts and their comments.
//!
//! # Quick start
//!
//! ```sh
//! # In-memory store on the default port:
//! quill-server
//!
//! # Persistent SQLite store:
//! QUILL_DB=./quill.db quill-server
//!
//! # Custom bind address and paging limits:
//! QUILL_BIND=127.0.0.1:9000 QUILL_MAX_PAGE_SIZE=50 quill-server
//! ```
//!
//! # Environment variables
//!
//! See [`ServerConfig`] for the full list.

use std::sync::Arc;

use quill_server::{build_router, MemoryStorage, ServerConfig, SqliteStorage, Storage};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_server=info,tower_http=debug".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let storage: Arc<dyn Storage> = match &config.db_path {
        Some(path) => match SqliteStorage::open(path) {
            Ok(s) => {
                tracing::info!("storage: SQLite at {path}");
                Arc::new(s)
            }
            Err(e) => {
                tracing::error!("failed to open SQLite database at {path}: {e}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("storage: in-memory (data will not survive restart)");
            Arc::new(MemoryStorage::new())
        }
    };

    let bind_addr = config.bind_addr;
    tracing::info!(
        default_page_size = config.paging.default_page_size,
        max_page_size = config.paging.max_page_size,
        "paging limits"
    );
    let app = build_router(storage, config);

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {bind_addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
