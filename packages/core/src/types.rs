//! Core data types for the Quill blog.
//!
//! This module defines the persisted entities, [`Post`] and [`Comment`], and
//! their user-editable halves, [`PostDraft`] and [`CommentDraft`]. A draft is
//! what a client submits; an entity is what storage hands back once an id has
//! been assigned.
//!
//! Post listings are ordered by a [`PostSortField`] in a [`SortDirection`].

use serde::{Deserialize, Serialize};

/// The user-editable fields of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PostDraft {
    /// Headline of the post. Unique across all posts.
    pub title: String,
    /// Short summary shown in listings.
    pub description: String,
    /// Full body of the post.
    pub content: String,
}

/// A persisted blog post.
///
/// A post owns zero or more [`Comment`]s. Comments are not embedded here;
/// they are loaded on demand by post id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Server-assigned identifier.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl Post {
    /// Build a post from a draft and the id storage assigned to it.
    pub fn from_draft(id: i64, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            content: draft.content,
        }
    }

    /// Overwrite every editable field with the values from `draft`.
    /// The id is left untouched.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.content = draft.content;
    }
}

/// The user-editable fields of a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CommentDraft {
    /// Display name of the commenter.
    pub name: String,
    /// Contact address of the commenter.
    pub email: String,
    /// Text of the comment.
    pub body: String,
}

/// A persisted comment, attached to exactly one [`Post`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Server-assigned identifier.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Id of the owning post. Never changes after creation.
    pub post_id: i64,
}

impl Comment {
    /// Build a comment from a draft, the id storage assigned to it, and the
    /// id of the post it was attached to.
    pub fn from_draft(id: i64, post_id: i64, draft: CommentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            body: draft.body,
            post_id,
        }
    }

    /// Overwrite name, email and body with the values from `draft`.
    /// The id and the owning post are left untouched.
    pub fn apply(&mut self, draft: CommentDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.body = draft.body;
    }

    /// `true` if this comment is attached to the post with id `post_id`.
    pub fn belongs_to(&self, post_id: i64) -> bool {
        self.post_id == post_id
    }
}

/// The post attribute a listing is ordered by.
///
/// Serialises as a lowercase string (e.g. `"title"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostSortField {
    #[default]
    Id,
    Title,
    Description,
    Content,
}

impl PostSortField {
    /// The storage column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            PostSortField::Id => "id",
            PostSortField::Title => "title",
            PostSortField::Description => "description",
            PostSortField::Content => "content",
        }
    }
}

impl std::fmt::Display for PostSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Parses a [`PostSortField`] case-insensitively (`"title"`, `"Title"`, ...).
///
/// Returns `Err` with a descriptive message if the string is not recognised.
impl std::str::FromStr for PostSortField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(PostSortField::Id),
            "title" => Ok(PostSortField::Title),
            "description" => Ok(PostSortField::Description),
            "content" => Ok(PostSortField::Content),
            _ => Err(format!(
                "unknown sort field {:?}; expected one of: id, title, description, content",
                s
            )),
        }
    }
}

/// Ordering direction for listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Parses a [`SortDirection`], case-insensitively (`"asc"`, `"DESC"`, ...).
impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!(
                "unknown sort direction {:?}; expected asc or desc",
                s
            )),
        }
    }
}
