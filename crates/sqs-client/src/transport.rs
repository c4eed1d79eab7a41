//! HTTP transport seam.
//!
//! [`QueueService`](crate::QueueService) drives everything through the
//! [`Transport`] trait so tests can substitute a scripted implementation;
//! [`HttpTransport`] is the production implementation on `reqwest`.

use crate::config::ClientConfig;
use crate::error::SqsError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Uppercase method name as it appears on the wire and in signatures.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// What came back from one HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status, empty when unknown
    pub reason: String,
    /// Response body, verbatim
    pub body: String,
}

/// Performs one HTTP request against the queue service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response.
    ///
    /// # Errors
    /// Returns [`SqsError::Transport`] for network-level failures (DNS,
    /// connect, timeout). Non-success statuses are returned as responses,
    /// not errors; the caller maps them.
    async fn request(
        &self,
        method: Method,
        host: &str,
        path: &str,
        body: Option<&str>,
        headers: &HashMap<String, String>,
    ) -> Result<TransportResponse, SqsError>;
}

/// Production transport on a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    scheme: &'static str,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    /// Returns [`SqsError::Configuration`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, SqsError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SqsError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            scheme: if config.use_https { "https" } else { "http" },
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        host: &str,
        path: &str,
        body: Option<&str>,
        headers: &HashMap<String, String>,
    ) -> Result<TransportResponse, SqsError> {
        let url = format!("{}://{}{}", self.scheme, host, path);

        let mut request = self.http_client.request(method.into(), url);

        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SqsError::Transport {
                    message: format!("Request timeout: {}", e),
                }
            } else if e.is_connect() {
                SqsError::Transport {
                    message: format!("Connection failed: {}", e),
                }
            } else {
                SqsError::Transport {
                    message: format!("HTTP request failed: {}", e),
                }
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SqsError::Transport {
            message: format!("Failed to read response body: {}", e),
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
