//! Error handling for the ledger API module

use crate::format::sanitize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a body that does not match the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    /// Builds an [`ApiError::Http`] from a failed response. The body is
    /// backend text, so it is sanitized before it can be displayed anywhere.
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .map(|body| sanitize(&body))
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Status code of an HTTP failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
