//! Shared helpers for the Quill conformance test suite.
//!
//! Provides [`spawn_server`] — a function that binds a `TcpListener` on an
//! ephemeral port, wires up an in-process server backed by `MemoryStorage`,
//! and returns both the local URL and a reference to the underlying storage
//! so tests can pre-populate data without going through the HTTP layer.
//! [`spawn_with_storage`] does the same over any [`Storage`] backend.

use std::sync::Arc;

use quill_server::{build_router, MemoryStorage, PagingConfig, ServerConfig, Storage};

/// Start an ephemeral in-process server and return `(base_url, storage)`.
///
/// The server runs in a background `tokio` task and is bound to an
/// OS-assigned port on `127.0.0.1`. The returned `String` is the base URL,
/// e.g. `http://127.0.0.1:51234`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound.
pub async fn spawn_server() -> (String, Arc<MemoryStorage>) {
    let mem_storage = Arc::new(MemoryStorage::new());
    let base_url = spawn_with_storage(Arc::clone(&mem_storage) as Arc<dyn Storage>).await;
    (base_url, mem_storage)
}

/// Start an ephemeral in-process server over `storage` and return its base URL.
///
/// Uses default paging limits (10 per page, at most 100).
pub async fn spawn_with_storage(storage: Arc<dyn Storage>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    let config = ServerConfig {
        bind_addr: addr,
        db_path: None,
        paging: PagingConfig::default(),
    };
    let router = build_router(storage, config);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });

    format!("http://{addr}")
}
