//! Comment transfer object — `/api/posts/{postId}/comments`.

use serde::{Deserialize, Serialize};

/// The externally visible shape of a comment.
///
/// Used both as the request body for create/update and as the response
/// body. The owning post is implied by the URL and is never exposed here.
///
/// # Example
///
/// ```json
/// { "id": 10, "name": "A", "email": "a@x.com", "body": "hi" }
/// ```
///
/// Missing string fields deserialise as empty strings so that the server
/// reports them as validation failures rather than as malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CommentDto {
    /// Server-assigned id. Ignored on create and update requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub body: String,
}

impl CommentDto {
    /// A request body with no id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_omitted_when_absent() {
        let dto = CommentDto::new("A", "a@x.com", "hi");
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("post"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let dto: CommentDto = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(dto.name, "A");
        assert!(dto.email.is_empty());
        assert!(dto.body.is_empty());
        assert_eq!(dto.id, None);
    }
}
