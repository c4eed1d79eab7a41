//! Client configuration and credential handling.
//!
//! Credentials are validated when they are constructed, so a missing or empty
//! key surfaces as a [`SqsError::Configuration`] before any request is made.

use crate::error::SqsError;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the access key identifier.
pub const ENV_ACCESS_KEY_ID: &str = "AMAZON_ACCESS_KEY_ID";

/// Environment variable holding the secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AMAZON_SECRET_ACCESS_KEY";

/// Default service endpoint host.
pub const DEFAULT_QUEUE_HOST: &str = "queue.amazonaws.com";

/// Access credentials for the queue service.
#[derive(Clone)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// # Errors
    /// Returns an error if either value is empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, SqsError> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();

        if access_key_id.is_empty() {
            return Err(SqsError::Configuration {
                message: "access key id must not be empty".to_string(),
            });
        }

        if secret_access_key.is_empty() {
            return Err(SqsError::Configuration {
                message: "secret access key must not be empty".to_string(),
            });
        }

        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }

    /// Load credentials from the process environment.
    ///
    /// Reads `AMAZON_ACCESS_KEY_ID` and `AMAZON_SECRET_ACCESS_KEY`.
    ///
    /// # Errors
    /// Returns an error if either variable is unset or empty.
    pub fn from_env() -> Result<Self, SqsError> {
        let access_key_id =
            std::env::var(ENV_ACCESS_KEY_ID).map_err(|_| SqsError::Configuration {
                message: format!("env variable ${ENV_ACCESS_KEY_ID} is not set"),
            })?;

        let secret_access_key =
            std::env::var(ENV_SECRET_ACCESS_KEY).map_err(|_| SqsError::Configuration {
                message: format!("env variable ${ENV_SECRET_ACCESS_KEY} is not set"),
            })?;

        Self::new(access_key_id, secret_access_key)
    }

    /// The access key identifier, as written into the auth header.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<REDACTED>")
            .finish()
    }
}

/// Configuration for a [`QueueService`](crate::QueueService).
///
/// # Examples
///
/// ```
/// use sqs_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_queue_host("queue.example.com")
///     .with_use_https(false);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host the queue-listing and queue-admin requests are sent to
    pub queue_host: String,
    /// Use HTTPS for all requests; plain HTTP when false
    pub use_https: bool,
    /// Request timeout duration
    pub timeout: Duration,
    /// User agent string for requests
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            queue_host: DEFAULT_QUEUE_HOST.to_string(),
            use_https: true,
            timeout: Duration::from_secs(30),
            user_agent: concat!("sqs-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the service host.
    pub fn with_queue_host(mut self, queue_host: impl Into<String>) -> Self {
        self.queue_host = queue_host.into();
        self
    }

    /// Select HTTPS or plain HTTP.
    pub fn with_use_https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
