//! Blocking HTTP client for the Quill REST API.

use quill_api::{CommentDto, ErrorResponse, PageQuery, PostDto, PostPage};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a standard error body.
    #[error("{status}: {}", .body.error)]
    Api { status: u16, body: ErrorResponse },

    /// The server answered with an error status and a body we could not parse.
    #[error("{status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl ClientError {
    /// Per-field messages when the server rejected a payload.
    pub fn fields(&self) -> Option<&std::collections::BTreeMap<String, String>> {
        match self {
            ClientError::Api { body, .. } => body.fields.as_ref(),
            _ => None,
        }
    }
}

pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    // --- posts ---------------------------------------------------------------

    pub fn list_posts(&self, query: &PageQuery) -> Result<PostPage, ClientError> {
        json(self.http.get(self.url("/api/posts")).query(query))
    }

    pub fn get_post(&self, id: i64) -> Result<PostDto, ClientError> {
        json(self.http.get(self.url(&format!("/api/posts/{id}"))))
    }

    pub fn create_post(&self, post: &PostDto) -> Result<PostDto, ClientError> {
        json(self.http.post(self.url("/api/posts")).json(post))
    }

    pub fn update_post(&self, id: i64, post: &PostDto) -> Result<PostDto, ClientError> {
        json(self.http.put(self.url(&format!("/api/posts/{id}"))).json(post))
    }

    pub fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        empty(self.http.delete(self.url(&format!("/api/posts/{id}"))))
    }

    // --- comments --------------------------------------------------------------

    pub fn list_comments(&self, post_id: i64) -> Result<Vec<CommentDto>, ClientError> {
        json(self.http.get(self.url(&format!("/api/posts/{post_id}/comments"))))
    }

    pub fn get_comment(&self, post_id: i64, comment_id: i64) -> Result<CommentDto, ClientError> {
        json(
            self.http
                .get(self.url(&format!("/api/posts/{post_id}/comments/{comment_id}"))),
        )
    }

    pub fn create_comment(
        &self,
        post_id: i64,
        comment: &CommentDto,
    ) -> Result<CommentDto, ClientError> {
        json(
            self.http
                .post(self.url(&format!("/api/posts/{post_id}/comments")))
                .json(comment),
        )
    }

    pub fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        comment: &CommentDto,
    ) -> Result<CommentDto, ClientError> {
        json(
            self.http
                .put(self.url(&format!("/api/posts/{post_id}/comments/{comment_id}")))
                .json(comment),
        )
    }

    pub fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), ClientError> {
        empty(
            self.http
                .delete(self.url(&format!("/api/posts/{post_id}/comments/{comment_id}"))),
        )
    }
}

fn json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    let resp = check(req.send()?)?;
    Ok(resp.json()?)
}

fn empty(req: RequestBuilder) -> Result<(), ClientError> {
    check(req.send()?)?;
    Ok(())
}

fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().unwrap_or_default();
    Err(error_from_body(status.as_u16(), text))
}

fn error_from_body(status: u16, text: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => ClientError::Api { status, body },
        Err(_) => ClientError::UnexpectedStatus { status, body: text },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = ApiClient::new("http://localhost:8080/");
        assert_eq!(c.url("/api/posts"), "http://localhost:8080/api/posts");
    }

    #[test]
    fn error_body_is_parsed() {
        let text = r#"{"error":"Post not found with id : '9'","code":"not_found","timestamp":"2026-01-01T00:00:00.000Z"}"#;
        let err = error_from_body(404, text.into());
        assert_eq!(err.to_string(), "404: Post not found with id : '9'");
        assert!(err.fields().is_none());
    }

    #[test]
    fn validation_fields_are_exposed() {
        let text = r#"{"error":"validation failed","code":"validation_failed","timestamp":"t","fields":{"email":"bad"}}"#;
        let err = error_from_body(400, text.into());
        assert_eq!(err.fields().unwrap()["email"], "bad");
    }

    #[test]
    fn non_json_error_keeps_raw_text() {
        let err = error_from_body(502, "Bad Gateway".into());
        assert!(matches!(err, ClientError::UnexpectedStatus { status: 502, .. }));
        assert_eq!(err.to_string(), "502: Bad Gateway");
    }
}
