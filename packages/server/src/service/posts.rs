//! Post service: create, page through, fetch, update and delete posts.

use std::sync::Arc;

use quill::{validate_post, Post, PostSortField, SortDirection};
use quill_api::{PageQuery, PostDto, PostPage};

use crate::config::PagingConfig;
use crate::mapping::{post_draft_from_dto, post_to_dto};
use crate::storage::{PageRequest, Storage};

use super::{or_not_found, ServiceError};

pub struct PostService {
    storage: Arc<dyn Storage>,
    paging: PagingConfig,
}

impl PostService {
    pub fn new(storage: Arc<dyn Storage>, paging: PagingConfig) -> Self {
        Self { storage, paging }
    }

    /// Validate and persist a new post. The response has no comments yet.
    pub async fn create_post(&self, dto: PostDto) -> Result<PostDto, ServiceError> {
        let draft = post_draft_from_dto(dto);
        validate_post(&draft)?;

        let post = self.storage.insert_post(&draft).await?;
        tracing::info!(post_id = post.id, title = %post.title, "post created");
        Ok(post_to_dto(&post, &[]))
    }

    /// Return one page of posts, each with its comments.
    ///
    /// Missing parameters fall back to page 0, the configured default size,
    /// `id` and `asc`. The page size is clamped to the configured maximum.
    pub async fn get_all_posts(&self, query: PageQuery) -> Result<PostPage, ServiceError> {
        let page = self.page_request(query)?;
        let (posts, total) = self.storage.find_posts(&page).await?;

        let mut content = Vec::with_capacity(posts.len());
        for post in &posts {
            content.push(self.with_comments(post).await?);
        }

        Ok(PostPage::new(content, page.page_no, page.page_size, total))
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<PostDto, ServiceError> {
        let post = self.find_post(id).await?;
        self.with_comments(&post).await
    }

    /// Overwrite title, description and content of an existing post.
    pub async fn update_post(&self, id: i64, dto: PostDto) -> Result<PostDto, ServiceError> {
        let draft = post_draft_from_dto(dto);
        validate_post(&draft)?;

        let mut post = self.find_post(id).await?;
        post.apply(draft);
        let updated = self
            .storage
            .update_post(&post)
            .await
            .map_err(or_not_found("Post", id))?;

        tracing::info!(post_id = id, "post updated");
        self.with_comments(&updated).await
    }

    /// Delete a post together with all of its comments.
    pub async fn delete_post_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.find_post(id).await?;
        self.storage
            .delete_post(id)
            .await
            .map_err(or_not_found("Post", id))?;
        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }

    // --- helpers ---------------------------------------------------------------

    async fn find_post(&self, id: i64) -> Result<Post, ServiceError> {
        tracing::debug!(post_id = id, "loading post");
        self.storage
            .find_post_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", "id", id))
    }

    async fn with_comments(&self, post: &Post) -> Result<PostDto, ServiceError> {
        let comments = self.storage.find_comments_by_post_id(post.id).await?;
        Ok(post_to_dto(post, &comments))
    }

    fn page_request(&self, query: PageQuery) -> Result<PageRequest, ServiceError> {
        let page_size = query
            .page_size
            .unwrap_or(self.paging.default_page_size)
            .clamp(1, self.paging.max_page_size.max(1));

        let sort_by = match query.sort_by.as_deref() {
            None | Some("") => PostSortField::default(),
            Some(s) => s.parse().map_err(ServiceError::BadRequest)?,
        };
        let sort_dir = match query.sort_dir.as_deref() {
            None | Some("") => SortDirection::default(),
            Some(s) => s.parse().map_err(ServiceError::BadRequest)?,
        };

        Ok(PageRequest {
            page_no: query.page_no.unwrap_or(0),
            page_size,
            sort_by,
            sort_dir,
        })
    }
}
