//! Failures reported by the campaigns API client

use thiserror::Error;

/// Message used when a create fails without a server-supplied reason
pub const CREATE_FAILED: &str = "Something went wrong";
/// Message used for any failed publish
pub const PUBLISH_FAILED: &str = "Publish failed";
/// Message used when the list endpoint answers with an error status
pub const LOAD_FAILED: &str = "Failed to load campaigns";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (refused, DNS, timeout, I/O)
    #[error("Network error: {0}")]
    Network(#[source] ureq::Error),
    /// The server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A success response whose body was not the expected JSON
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
