use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{CommentDraft, PostDraft};

/// Minimum number of characters in a post title.
pub const MIN_TITLE_LEN: usize = 2;

/// Minimum number of characters in a post description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// A single field-level validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must be at least {MIN_TITLE_LEN} characters")]
    TitleTooShort,

    #[error("description must be at least {MIN_DESCRIPTION_LEN} characters")]
    DescriptionTooShort,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("name must not be empty")]
    EmptyName,

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("email must be a well-formed address, got: {0:?}")]
    InvalidEmail(String),

    #[error("body must not be empty")]
    EmptyBody,
}

impl ValidationError {
    /// Name of the draft field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TitleTooShort => "title",
            ValidationError::DescriptionTooShort => "description",
            ValidationError::EmptyContent => "content",
            ValidationError::EmptyName => "name",
            ValidationError::EmptyEmail | ValidationError::InvalidEmail(_) => "email",
            ValidationError::EmptyBody => "body",
        }
    }
}

/// Every validation failure found in one draft, in field order.
///
/// Never empty when returned as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(field, message)` pairs, suitable for a per-field error response.
    pub fn field_messages(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        self.0.iter().map(|e| (e.field(), e.to_string()))
    }

    fn push(&mut self, e: ValidationError) {
        self.0.push(e);
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a [`PostDraft`] before it is created or used as an update.
///
/// Collects every failing field rather than stopping at the first one.
pub fn validate_post(draft: &PostDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.title.trim().chars().count() < MIN_TITLE_LEN {
        errors.push(ValidationError::TitleTooShort);
    }
    if draft.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        errors.push(ValidationError::DescriptionTooShort);
    }
    if is_blank(&draft.content) {
        errors.push(ValidationError::EmptyContent);
    }

    errors.into_result()
}

/// Validate a [`CommentDraft`] before it is created or used as an update.
pub fn validate_comment(draft: &CommentDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if is_blank(&draft.name) {
        errors.push(ValidationError::EmptyName);
    }
    if is_blank(&draft.email) {
        errors.push(ValidationError::EmptyEmail);
    } else if !EMAIL_RE.is_match(draft.email.trim()) {
        errors.push(ValidationError::InvalidEmail(draft.email.clone()));
    }
    if is_blank(&draft.body) {
        errors.push(ValidationError::EmptyBody);
    }

    errors.into_result()
}

// --- helpers -----------------------------------------------------------------

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `local@domain.tld`, no whitespace, no second `@`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

// --- tests -------------------------------------------------------------------
