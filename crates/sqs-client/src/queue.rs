//! Queue and message entities.

use crate::document::{Document, Element};
use crate::error::SqsError;
use crate::service::QueueService;
use serde::{Deserialize, Serialize};

/// Shape of a queue-listing URL: authority, parent path, final name segment.
const QUEUE_URL_PATTERN: &str = r"^https?://([^/]+)(/.*)(/[^/]+)$";

/// A named queue's location, as derived from a queue-listing URL.
///
/// `path` always begins with `/` and its final segment equals `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    host: String,
    path: String,
    name: String,
}

impl Queue {
    /// Parse a service-returned listing URL into a queue handle.
    ///
    /// # Errors
    /// Returns [`SqsError::MalformedQueueUrl`] when the URL does not match
    /// the expected shape.
    pub fn from_listing_url(url: &str) -> Result<Self, SqsError> {
        let pattern =
            regex::Regex::new(QUEUE_URL_PATTERN).map_err(|e| SqsError::Configuration {
                message: format!("queue URL pattern failed to compile: {}", e),
            })?;

        let captures = pattern
            .captures(url)
            .ok_or_else(|| SqsError::MalformedQueueUrl {
                url: url.to_string(),
            })?;

        let host = captures.get(1).map_or("", |m| m.as_str()).to_string();
        let parent = captures.get(2).map_or("", |m| m.as_str());
        let last = captures.get(3).map_or("", |m| m.as_str());

        Ok(Self {
            host,
            path: format!("{}{}", parent, last),
            name: last.trim_start_matches('/').to_string(),
        })
    }

    /// Authority of the queue's URL, possibly carrying a port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL path uniquely addressing the queue.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The queue name, the final path segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One retrieved message, bound to the queue it came from.
///
/// The body is an opaque payload; any encoding such as base64 is the
/// caller's concern. After a successful delete the service no longer
/// recognizes the id; the object itself is not mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    queue: Queue,
    message_id: String,
    message_body: String,
}

impl Message {
    /// Build a message from a `Message`-tagged response element.
    ///
    /// A missing id or body is tolerated; the field stays empty.
    pub(crate) fn from_element(queue: Queue, element: &Element) -> Self {
        Self {
            queue,
            message_id: element.first_text("MessageId").unwrap_or("").to_string(),
            message_body: element.first_text("MessageBody").unwrap_or("").to_string(),
        }
    }

    /// Build a message from a whole single-message response document.
    pub(crate) fn from_document(queue: Queue, doc: &Document) -> Self {
        match doc.first_element("Message") {
            Some(element) => Self::from_element(queue, element),
            None => Self {
                queue,
                message_id: doc.first_text("MessageId").unwrap_or("").to_string(),
                message_body: doc.first_text("MessageBody").unwrap_or("").to_string(),
            },
        }
    }

    /// The queue this message was received from.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Service-assigned message id.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// The message payload, verbatim.
    pub fn message_body(&self) -> &str {
        &self.message_body
    }

    /// Delete this message from its queue.
    pub async fn delete(&self, service: &QueueService) -> Result<bool, SqsError> {
        service.delete_message(&self.queue, &self.message_id).await
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
