//! In-memory storage implementation.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Use this for tests, the conformance suite, and throwaway servers.
//!
//! Posts and comments live in [`BTreeMap`]s keyed by id, so iteration is
//! already in id order and listing comments for a post needs no sort.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use quill::{Comment, CommentDraft, Post, PostDraft, PostSortField, SortDirection};

use super::{PageRequest, Storage, StorageError};

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct Inner {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    /// Last id handed out; ids are never reused, even after deletes.
    last_post_id: i64,
    last_comment_id: i64,
}

impl Inner {
    fn new() -> Self {
        Self {
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            last_post_id: 0,
            last_comment_id: 0,
        }
    }

    fn title_taken(&self, title: &str, except_id: Option<i64>) -> bool {
        self.posts
            .values()
            .any(|p| p.title == title && Some(p.id) != except_id)
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`Storage`].
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_posts(a: &Post, b: &Post, field: PostSortField, dir: SortDirection) -> Ordering {
    let by_field = match field {
        PostSortField::Id => Ordering::Equal,
        PostSortField::Title => a.title.cmp(&b.title),
        PostSortField::Description => a.description.cmp(&b.description),
        PostSortField::Content => a.content.cmp(&b.content),
    };
    let ord = by_field.then(a.id.cmp(&b.id));
    match dir {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn duplicate_title(title: &str) -> StorageError {
    StorageError::Conflict(format!("a post titled {title:?} already exists"))
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for MemoryStorage {
    // --- Posts ---------------------------------------------------------------

    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StorageError> {
        Ok(self.read().posts.get(&id).cloned())
    }

    async fn find_posts(&self, page: &PageRequest) -> Result<(Vec<Post>, u64), StorageError> {
        let inner = self.read();
        let total = inner.posts.len() as u64;

        let mut posts: Vec<&Post> = inner.posts.values().collect();
        posts.sort_by(|a, b| compare_posts(a, b, page.sort_by, page.sort_dir));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = posts
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<Post, StorageError> {
        let mut inner = self.write();
        if inner.title_taken(&draft.title, None) {
            return Err(duplicate_title(&draft.title));
        }
        inner.last_post_id += 1;
        let post = Post::from_draft(inner.last_post_id, draft.clone());
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> Result<Post, StorageError> {
        let mut inner = self.write();
        if !inner.posts.contains_key(&post.id) {
            return Err(StorageError::NotFound);
        }
        if inner.title_taken(&post.title, Some(post.id)) {
            return Err(duplicate_title(&post.title));
        }
        inner.posts.insert(post.id, post.clone());
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), StorageError> {
        let mut inner = self.write();
        if inner.posts.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        inner.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }

    // --- Comments ------------------------------------------------------------

    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StorageError> {
        Ok(self.read().comments.get(&id).cloned())
    }

    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StorageError> {
        let inner = self.read();
        Ok(inner
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, StorageError> {
        let mut inner = self.write();
        if !inner.posts.contains_key(&post_id) {
            return Err(StorageError::NotFound);
        }
        inner.last_comment_id += 1;
        let comment = Comment::from_draft(inner.last_comment_id, post_id, draft.clone());
        inner.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<Comment, StorageError> {
        let mut inner = self.write();
        let stored = inner
            .comments
            .get_mut(&comment.id)
            .ok_or(StorageError::NotFound)?;
        stored.name = comment.name.clone();
        stored.email = comment.email.clone();
        stored.body = comment.body.clone();
        Ok(stored.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StorageError> {
        self.write()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
