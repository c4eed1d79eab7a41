//! Request signing for the queue service wire protocol.
//!
//! Every request carries an `Authorization: AWS <key-id>:<signature>` header
//! where the signature is an HMAC-SHA1 over a canonical representation of the
//! request, keyed with the secret access key.

use crate::config::Credentials;
use crate::error::SqsError;
use crate::transport::Method;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Computes the `Authorization` header value for signed requests.
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Create a signer for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Compute the full `Authorization` header value for one request.
    ///
    /// The canonical string signed by the service is five lines:
    /// method, an empty content-MD5 slot, content type, date, and the request
    /// path with any query string stripped.
    pub fn authorization_header(
        &self,
        method: Method,
        path: &str,
        date: &str,
        content_type: &str,
    ) -> Result<String, SqsError> {
        // Only the path up to the first '?' participates in the signature.
        let resource = match path.find('?') {
            Some(idx) => &path[..idx],
            None => path,
        };

        let canonical = format!(
            "{}\n\n{}\n{}\n{}",
            method.as_str(),
            content_type,
            date,
            resource
        );

        let mut mac = HmacSha1::new_from_slice(self.credentials.secret_access_key().as_bytes())
            .map_err(|e| SqsError::Configuration {
                message: format!("Failed to create HMAC instance: {}", e),
            })?;
        mac.update(canonical.as_bytes());

        let signature = STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "AWS {}:{}",
            self.credentials.access_key_id(),
            signature
        ))
    }
}

#[cfg(test)]
#[path = "sign_tests.rs"]
mod tests;
