//! Error types for queue service operations.

use thiserror::Error;

/// Comprehensive error type for all queue service operations
#[derive(Debug, Error)]
pub enum SqsError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Malformed queue URL: {url}")]
    MalformedQueueUrl { url: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Found no queue named '{name}'")]
    QueueNotFound { name: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl SqsError {
    /// Check if this is a service error for a missing resource (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service { code, .. } if code == "404")
    }

    /// Check if this is a service error in the HTTP 4xx status range
    ///
    /// Service errors embedded in a response body carry symbolic codes and
    /// never match; only status-derived errors do.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Service { code, .. } => code
                .parse::<u16>()
                .map(|status| (400..=499).contains(&status))
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
