//! Request and response types for the Quill blog HTTP API.
//!
//! This crate encodes the HTTP contract as Rust types so that the server,
//! the `quillctl` client and the conformance suite agree on the wire format.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | POST | `/api/posts` | [`PostDto`] → [`PostDto`] |
//! | GET | `/api/posts` | [`PageQuery`] → [`PostPage`] |
//! | GET | `/api/posts/{id}` | → [`PostDto`] |
//! | PUT | `/api/posts/{id}` | [`PostDto`] → [`PostDto`] |
//! | DELETE | `/api/posts/{id}` | → `204` |
//! | POST | `/api/posts/{postId}/comments` | [`CommentDto`] → [`CommentDto`] |
//! | GET | `/api/posts/{postId}/comments` | → `[`[`CommentDto`]`]` |
//! | GET | `/api/posts/{postId}/comments/{id}` | → [`CommentDto`] |
//! | PUT | `/api/posts/{postId}/comments/{id}` | [`CommentDto`] → [`CommentDto`] |
//! | DELETE | `/api/posts/{postId}/comments/{id}` | → `204` |
//!
//! Every error response carries an [`ErrorResponse`] body.

pub mod comment;
pub mod error;
pub mod post;

pub use comment::CommentDto;
pub use error::ErrorResponse;
pub use post::{PageQuery, PostDto, PostPage};
