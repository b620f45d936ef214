use shared::error::{ErrorCode, ValidationError};
use thiserror::Error;

pub const SUBMITTING_MESSAGE: &str = "Submitting...";
pub const GENERIC_FAILURE_MESSAGE: &str = "Error submitting form";
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Could not reach the scheduling server. Check your connection and try again.";

/// Failure to get any HTTP response back from the scheduling endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid scheduling endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
    #[error("request to scheduling endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    /// For [`ApplyTransport`](crate::ApplyTransport) implementations that do
    /// not go through reqwest.
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("application rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: u16,
        detail: Option<String>,
    },
    #[error("scheduling server returned an unusable response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitError::Invalid(_) => ErrorCode::Validation,
            SubmitError::Rejected { .. } | SubmitError::MalformedResponse(_) => {
                ErrorCode::Rejected
            }
            SubmitError::Transport(_) => ErrorCode::Transport,
        }
    }

    /// Text shown on the status line once the attempt has ended.
    pub fn status_message(&self) -> String {
        match self {
            SubmitError::Invalid(err) => err.to_string(),
            SubmitError::Rejected {
                detail: Some(detail),
                ..
            } => format!("Error: {detail}"),
            SubmitError::Rejected { detail: None, .. } | SubmitError::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            SubmitError::Transport(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub fn success_message(zoom_link: &str) -> String {
    format!("Scheduled! Zoom link: {zoom_link}")
}
