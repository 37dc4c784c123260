//! Error types for the STON.fi client.

use thiserror::Error;

/// Errors surfaced by [`crate::StonfiClient`] and the normalization utilities.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The base URL handed to the client constructor is not a well-formed
    /// absolute URL. Fatal at construction time.
    #[error("invalid base URL: {0}")]
    InvalidConfiguration(String),

    /// A local pre-flight check failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request failed in transit or the server answered non-2xx.
    /// Timeouts and cancellation surface here with the cause in the message.
    #[error("request failed (status {}): {message}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// The response body is not valid JSON or does not match the expected
    /// shape.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// HTTP status code of a failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("deadline exceeded: {}", err)
        } else {
            err.to_string()
        };
        Error::Request {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}
