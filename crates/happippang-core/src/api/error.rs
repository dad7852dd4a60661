use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message shown when the server gave no usable detail
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session may be expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session refresh failed: {0}")]
    RefreshFailed(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the server: `{"detail": "..."}`, or a list of
/// field errors for validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
struct FieldError {
    msg: String,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the server's `detail` message out of an error body
    fn extract_detail(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        let detail = match parsed.detail {
            Detail::Message(msg) => msg,
            Detail::Fields(fields) => fields
                .into_iter()
                .map(|f| f.msg)
                .collect::<Vec<_>>()
                .join("; "),
        };
        (!detail.trim().is_empty()).then_some(detail)
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = Self::extract_detail(body).unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            500..=599 => ApiError::ServerError(detail),
            code => ApiError::Rejected { status: code, detail },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Server-provided message, if the error carries one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::AccessDenied(d)
            | ApiError::NotFound(d)
            | ApiError::ServerError(d)
            | ApiError::Rejected { detail: d, .. } => {
                let d = d.trim();
                // Raw HTML or JSON bodies are not worth showing
                (!d.is_empty() && !d.starts_with('<') && !d.starts_with('{')).then_some(d)
            }
            _ => None,
        }
    }

    /// One line for the status bar: the server's detail message, else a
    /// generic text. No error codes are surfaced.
    pub fn user_message(&self) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }
}
