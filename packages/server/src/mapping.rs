//! Field-by-field conversions between entities and transfer objects.
//!
//! Requests only ever contribute drafts: any `id` or `comments` a client sends
//! is dropped here, so ids stay server-assigned and a comment's post comes
//! from the URL alone.

use quill::{Comment, CommentDraft, Post, PostDraft};
use quill_api::{CommentDto, PostDto};

pub fn comment_to_dto(comment: &Comment) -> CommentDto {
    CommentDto {
        id: Some(comment.id),
        name: comment.name.clone(),
        email: comment.email.clone(),
        body: comment.body.clone(),
    }
}

pub fn comment_draft_from_dto(dto: CommentDto) -> CommentDraft {
    CommentDraft {
        name: dto.name,
        email: dto.email,
        body: dto.body,
    }
}

/// Map a post together with its already-loaded comments.
pub fn post_to_dto(post: &Post, comments: &[Comment]) -> PostDto {
    PostDto {
        id: Some(post.id),
        title: post.title.clone(),
        description: post.description.clone(),
        content: post.content.clone(),
        comments: comments.iter().map(comment_to_dto).collect(),
    }
}

pub fn post_draft_from_dto(dto: PostDto) -> PostDraft {
    PostDraft {
        title: dto.title,
        description: dto.description,
        content: dto.content,
    }
}
