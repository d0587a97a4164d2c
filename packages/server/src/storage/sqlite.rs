//! SQLite-backed storage implementation.
//!
//! Uses `rusqlite` (with bundled SQLite) wrapped in an `Arc<Mutex<Connection>>`
//! to satisfy the `Send + Sync` requirements. All blocking calls are offloaded
//! to a thread-pool via `tokio::task::spawn_blocking`.
//!
//! # Schema
//!
//! - `posts` — one row per post; `title` is unique.
//! - `comments` — one row per comment; `post_id` is a foreign key to `posts`
//!   with `ON DELETE CASCADE`, so the database itself refuses orphans and
//!   removes a post's comments with it.
//!
//! Foreign key enforcement is off by default in SQLite and is switched on
//! for the connection before the schema is applied.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quill::{Comment, CommentDraft, Post, PostDraft, SortDirection};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{PageRequest, Storage, StorageError};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    content     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL,
    body    TEXT NOT NULL,
    post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id);
";

// ---------------------------------------------------------------------------
// SqliteStorage
// ---------------------------------------------------------------------------

/// SQLite-backed implementation of [`Storage`].
///
/// Holds a single database connection protected by a `Mutex`. All operations
/// run inside `spawn_blocking` to avoid blocking the async runtime.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the SQLite database at `path` and apply the schema.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory SQLite database (data is lost when dropped).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread-pool.
    async fn run<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StorageError::Internal("connection mutex poisoned".into()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// Error conversions and row mapping
// ---------------------------------------------------------------------------

fn map_err(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e {
        match err.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return StorageError::Conflict(msg.clone().unwrap_or_else(|| err.to_string()));
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return StorageError::NotFound,
            _ => {}
        }
    }
    StorageError::Internal(e.to_string())
}

fn map_title_err(title: &str) -> impl FnOnce(rusqlite::Error) -> StorageError + '_ {
    move |e| match map_err(e) {
        StorageError::Conflict(_) => {
            StorageError::Conflict(format!("a post titled {title:?} already exists"))
        }
        other => other,
    }
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        content: row.get(3)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        body: row.get(3)?,
        post_id: row.get(4)?,
    })
}

fn sql_dir(dir: SortDirection) -> &'static str {
    match dir {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for SqliteStorage {
    // --- Posts ---------------------------------------------------------------

    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StorageError> {
        self.run(move |conn| {
            conn.query_row(
                "SELECT id, title, description, content FROM posts WHERE id = ?1",
                params![id],
                post_from_row,
            )
            .optional()
            .map_err(map_err)
        })
        .await
    }

    async fn find_posts(&self, page: &PageRequest) -> Result<(Vec<Post>, u64), StorageError> {
        let page = *page;

        self.run(move |conn| {
            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
                .map_err(map_err)?;

            // The ORDER BY column comes from a closed enum, never from user text.
            let dir = sql_dir(page.sort_dir);
            let sql = format!(
                "SELECT id, title, description, content FROM posts
                 ORDER BY {col} {dir}, id {dir}
                 LIMIT ?1 OFFSET ?2",
                col = page.sort_by.column(),
            );
            let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

            let mut stmt = conn.prepare(&sql).map_err(map_err)?;
            let posts = stmt
                .query_map(params![i64::from(page.page_size), offset], post_from_row)
                .map_err(map_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_err)?;

            Ok((posts, total.max(0) as u64))
        })
        .await
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<Post, StorageError> {
        let draft = draft.clone();

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO posts (title, description, content) VALUES (?1, ?2, ?3)",
                params![draft.title, draft.description, draft.content],
            )
            .map_err(map_title_err(&draft.title))?;
            let id = conn.last_insert_rowid();
            Ok(Post::from_draft(id, draft))
        })
        .await
    }

    async fn update_post(&self, post: &Post) -> Result<Post, StorageError> {
        let post = post.clone();

        self.run(move |conn| {
            conn.query_row(
                "UPDATE posts SET title = ?2, description = ?3, content = ?4
                 WHERE id = ?1
                 RETURNING id, title, description, content",
                params![post.id, post.title, post.description, post.content],
                post_from_row,
            )
            .optional()
            .map_err(map_title_err(&post.title))?
            .ok_or(StorageError::NotFound)
        })
        .await
    }

    async fn delete_post(&self, id: i64) -> Result<(), StorageError> {
        self.run(move |conn| {
            let changed = conn
                .execute("DELETE FROM posts WHERE id = ?1", params![id])
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
        .await
    }

    // --- Comments ------------------------------------------------------------

    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StorageError> {
        self.run(move |conn| {
            conn.query_row(
                "SELECT id, name, email, body, post_id FROM comments WHERE id = ?1",
                params![id],
                comment_from_row,
            )
            .optional()
            .map_err(map_err)
        })
        .await
    }

    async fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, StorageError> {
        self.run(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, email, body, post_id FROM comments
                     WHERE post_id = ?1 ORDER BY id ASC",
                )
                .map_err(map_err)?;
            let result = stmt
                .query_map(params![post_id], comment_from_row)
                .map_err(map_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_err)?;
            Ok(result)
        })
        .await
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, StorageError> {
        let draft = draft.clone();

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO comments (name, email, body, post_id) VALUES (?1, ?2, ?3, ?4)",
                params![draft.name, draft.email, draft.body, post_id],
            )
            .map_err(map_err)?;
            let id = conn.last_insert_rowid();
            Ok(Comment::from_draft(id, post_id, draft))
        })
        .await
    }

    async fn update_comment(&self, comment: &Comment) -> Result<Comment, StorageError> {
        let comment = comment.clone();

        self.run(move |conn| {
            conn.query_row(
                "UPDATE comments SET name = ?2, email = ?3, body = ?4
                 WHERE id = ?1
                 RETURNING id, name, email, body, post_id",
                params![comment.id, comment.name, comment.email, comment.body],
                comment_from_row,
            )
            .optional()
            .map_err(map_err)?
            .ok_or(StorageError::NotFound)
        })
        .await
    }

    async fn delete_comment(&self, id: i64) -> Result<(), StorageError> {
        self.run(move |conn| {
            let changed = conn
                .execute("DELETE FROM comments WHERE id = ?1", params![id])
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
