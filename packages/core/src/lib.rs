//! Core entities and validation rules for the Quill blog API.
//!
//! This crate is the storage- and transport-independent foundation shared by
//! the `quill-api` wire types, the `quill-server` HTTP service, and the
//! `quillctl` command-line client.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Entities and drafts: [`Post`], [`PostDraft`], [`Comment`], [`CommentDraft`], plus listing order |
//! | [`validation`] | Field rules via [`validate_post`] and [`validate_comment`] |
//!
//! # Quick start
//!
//! ```rust
//! use quill::{validate_comment, CommentDraft};
//!
//! let draft = CommentDraft {
//!     name: "Ada".into(),
//!     email: "ada@example.com".into(),
//!     body: "Great read.".into(),
//! };
//! assert!(validate_comment(&draft).is_ok());
//! ```

pub mod types;
pub mod validation;

pub use types::{Comment, CommentDraft, Post, PostDraft, PostSortField, SortDirection};
pub use validation::{validate_comment, validate_post, ValidationError, ValidationErrors};
