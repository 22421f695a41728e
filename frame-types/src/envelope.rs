//! ApiResponse - the JSON envelope every relay endpoint answers with.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// The `{error, content}` envelope.
///
/// A present `error` signals failure regardless of the HTTP status; the
/// relay answers logical errors with 200. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Human-readable error message, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response payload, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `content`.
    pub fn ok(content: T) -> Self {
        Self {
            error: None,
            content: Some(content),
        }
    }

    /// Failed response carrying the error message.
    pub fn err(error: impl Into<ApiError>) -> Self {
        Self {
            error: Some(error.into().to_string()),
            content: None,
        }
    }

    /// True if no error is present.
    pub fn is_ok(&self) -> bool {
        self.error.as_deref().map_or(true, str::is_empty)
    }
}
