//! Storage abstraction layer for the Quill server.
//!
//! The [`Storage`] trait is the repository contract between the service
//! layer and persistence. Existence and ownership checks ("does this comment
//! belong to that post") live in the services; storage only finds, saves and
//! deletes rows by key.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryStorage`] | Tests, conformance suite, throwaway servers |
//! | [`SqliteStorage`] | Production; durable single-file database |
//!
//! Both backends delete a post's comments together with the post.
//!
//! [`MemoryStorage`]: memory::MemoryStorage
//! [`SqliteStorage`]: sqlite::SqliteStorage

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use quill::{Comment, CommentDraft, Post, PostDraft, PostSortField, SortDirection};

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The row to update or delete does not exist, or a referenced parent
    /// row is missing.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated (e.g. duplicate post title).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected error in the underlying storage backend.
    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// Which slice of the post table [`Storage::find_posts`] returns, and in
/// what order.
///
/// Built by the post service from query parameters after defaults and
/// clamping have been applied; `page_size` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_no: u32,
    /// Rows per page.
    pub page_size: u32,
    pub sort_by: PostSortField,
    pub sort_dir: SortDirection,
}

impl PageRequest {
    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_no) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_no: 0,
            page_size: 10,
            sort_by: PostSortField::Id,
            sort_dir: SortDirection::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// The persistence contract for posts and comments.
///
/// All methods are `async` and return `Result<_, StorageError>`. Implementations
/// must be `Send + Sync + 'static` so they can be held in an `Arc<dyn Storage>`.
/// Ids are assigned by the backend, start at 1 and are never reused.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // --- Posts ---------------------------------------------------------------

    /// Retrieve a post by id. Returns `None` if not found.
    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StorageError>;

    /// Return one page of posts plus the total number of posts.
    ///
    /// Rows are ordered by `page.sort_by` in `page.sort_dir`, ties broken by
    /// `id` in the same direction.
    async fn find_posts(&self, page: &PageRequest) -> Result<(Vec<Post>, u64), StorageError>;

    /// Persist a new post and return it with its assigned id.
    ///
    /// Returns [`StorageError::Conflict`] if another post has the same title.
    async fn insert_post(&self, draft: &PostDraft) -> Result<Post, StorageError>;

    /// Overwrite title, description and content of an existing post.
    ///
    /// Returns [`StorageError::NotFound`] if no post has `post.id`, and
    /// [`StorageError::Conflict`] if the new title belongs to another post.
    async fn update_post(&self, post: &Post) -> Result<Post, StorageError>;

    /// Delete a post and every comment attached to it.
    ///
    /// Returns [`StorageError::NotFound`] if the post does not exist.
    async fn delete_post(&self, id: i64) -> Result<(), StorageError>;

    // --- Comments ------------------------------------------------------------

    /// Retrieve a comment by id, regardless of which post owns it.
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StorageError>;

    /// Return all comments attached to `post_id`, ordered by id ascending.
    /// An unknown post id yields an empty list.
    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StorageError>;

    /// Attach a new comment to `post_id` and return it with its assigned id.
    ///
    /// Returns [`StorageError::NotFound`] if the post does not exist.
    async fn insert_comment(
        &self,
        post_id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, StorageError>;

    /// Overwrite name, email and body of an existing comment. The owning post
    /// is never changed, whatever `comment.post_id` says.
    ///
    /// Returns [`StorageError::NotFound`] if no comment has `comment.id`.
    async fn update_comment(&self, comment: &Comment) -> Result<Comment, StorageError>;

    /// Delete a comment. Returns [`StorageError::NotFound`] if it does not exist.
    async fn delete_comment(&self, id: i64) -> Result<(), StorageError>;
}
