use reqwest::StatusCode;
use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status {
        status: StatusCode,
        code: Option<ErrorCode>,
        message: String,
    },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Builds a status error from a raw response body, preferring the
    /// service's structured `ApiError` when the body carries one.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(api_error) => Self::Status {
                status,
                code: Some(api_error.code),
                message: api_error.message,
            },
            Err(_) => {
                let message = if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                } else {
                    body.trim().to_string()
                };
                Self::Status {
                    status,
                    code: None,
                    message,
                }
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
