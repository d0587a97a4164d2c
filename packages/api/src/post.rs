//! Post transfer objects and the paged listing — `/api/posts`.

use serde::{Deserialize, Serialize};

use crate::comment::CommentDto;

/// The externally visible shape of a post, including its comments.
///
/// # Example
///
/// ```json
/// {
///   "id": 1,
///   "title": "Hello Quill",
///   "description": "An introduction to the blog",
///   "content": "Welcome to the first post.",
///   "comments": [ { "id": 10, "name": "A", "email": "a@x.com", "body": "hi" } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PostDto {
    /// Server-assigned id. Ignored on create and update requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: String,

    /// Comments attached to the post, oldest first. Ignored on requests.
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

impl PostDto {
    /// A request body with no id and no comments.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            content: content.into(),
            comments: vec![],
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/posts`.
///
/// All fields are optional. `sort_by` and `sort_dir` are kept as raw strings
/// here so the server can answer an unknown value with a `400` and a
/// descriptive message instead of a generic query rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PageQuery {
    /// Zero-based page index. Default `0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_no: Option<u32>,

    /// Page size. Defaults to the server's configured size and is clamped
    /// to its configured maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// One of `id`, `title`, `description`, `content`. Default `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// `asc` or `desc`. Default `asc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
}

/// Response body for `GET /api/posts`.
///
/// # Example
///
/// ```json
/// {
///   "content": [ { ... }, { ... } ],
///   "page_no": 0,
///   "page_size": 10,
///   "total_elements": 2,
///   "total_pages": 1,
///   "last": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostPage {
    /// Posts on this page, in the requested order.
    pub content: Vec<PostDto>,
    pub page_no: u32,
    pub page_size: u32,
    /// Number of posts across all pages.
    pub total_elements: u64,
    pub total_pages: u32,
    /// `true` when there is no page after this one.
    pub last: bool,
}

impl PostPage {
    /// Build a page, deriving `total_pages` and `last` from the totals.
    ///
    /// `page_size` must be non-zero.
    pub fn new(content: Vec<PostDto>, page_no: u32, page_size: u32, total_elements: u64) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = total_elements.div_ceil(size);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        Self {
            content,
            page_no,
            page_size,
            total_elements,
            total_pages,
            last: u64::from(page_no) + 1 >= u64::from(total_pages),
        }
    }
}
