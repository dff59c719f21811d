//! Mapping of failed HTTP calls to user-readable errors.

use thiserror::Error;

/// Error returned by every [`ChatApi`](super::ChatApi) call.
///
/// `Display` is what the UI shows in its error line.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The server is busy. Please wait a moment and try again.")]
    RateLimited,

    #[error("The upstream AI service returned an error. Please try again later.")]
    Upstream,

    #[error("{detail}")]
    Status { status: u16, detail: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    Decode(reqwest::Error),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    ///
    /// `body` is only consulted for a `{"detail": "..."}` string when
    /// `read_detail` is set.
    pub fn from_status(status: u16, body: &str, read_detail: bool) -> Self {
        match status {
            429 => ApiError::RateLimited,
            502 => ApiError::Upstream,
            _ => {
                let detail = if read_detail { detail_from_body(body) } else { None };
                ApiError::Status {
                    status,
                    detail: detail.unwrap_or_else(|| format!("HTTP {}", status)),
                }
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RateLimited => Some(429),
            ApiError::Upstream => Some(502),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// FastAPI-style `detail`. Validation errors carry a list there, which is not
/// readable text, so only strings are accepted.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
