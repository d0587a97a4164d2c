//! Standard error response body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The JSON body returned for all error responses.
///
/// ```json
/// {
///   "error": "Post not found with id : '7'",
///   "code": "not_found",
///   "timestamp": "2026-10-18T09:12:44.512Z"
/// }
/// ```
///
/// Validation failures additionally carry a `fields` object mapping each
/// offending field to its message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error: String,

    /// Machine-readable error code.
    ///
    /// | `code` | HTTP status |
    /// |--------|------------|
    /// | `bad_request` | 400 |
    /// | `validation_failed` | 400 |
    /// | `not_found` | 404 |
    /// | `conflict` | 409 |
    /// | `internal_error` | 500 |
    pub code: String,

    /// RFC 3339 time at which the error was produced.
    pub timestamp: String,

    /// Per-field messages; present only for `validation_failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] stamped with the current time.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            fields: None,
        }
    }

    /// Attach per-field validation messages.
    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Error codes emitted by the server.
pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
