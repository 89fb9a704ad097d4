// Error types for the labrest client.
// Covers transport failures, HTTP status mapping, decoding, and configuration errors.

use thiserror::Error;

use crate::gitlab::transport::TransportError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitLab transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Unexpected status code {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Cannot block a user that is already blocked by LDAP synchronization")]
    UserBlockedByLdap,

    #[error("Cannot unblock a user that is blocked by LDAP synchronization")]
    UnblockForbiddenByLdap,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Received unexpected result code: {0}")]
    UnexpectedResultCode(u16),

    #[error("Missing GITLAB_TOKEN environment variable")]
    MissingToken,

    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized => Some(401),
            Error::NotFound(_) | Error::UserNotFound => Some(404),
            Error::RateLimited { .. } => Some(429),
            Error::UserBlockedByLdap | Error::UnblockForbiddenByLdap => Some(403),
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::UnexpectedResultCode(code) => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
