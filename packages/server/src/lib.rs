//! Public surface for the `quill-server` crate.
//!
//! Exposes the router builder, config and storage types so that external
//! crates (e.g. the conformance test suite) can spin up an in-process server
//! without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod router;
pub mod service;
pub mod storage;

pub use config::{PagingConfig, ServerConfig};
pub use router::build_router;
pub use storage::{memory::MemoryStorage, sqlite::SqliteStorage, Storage};
