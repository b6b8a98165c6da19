use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{}", http_display(.status, .message))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// A success response did not match the endpoint's envelope.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The request could not be built (bad file part, invalid header).
    #[error("Invalid request: {0}")]
    Request(String),
}

fn http_display(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("HTTP {}: {message}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-supplied message of an HTTP error, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::Request(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
