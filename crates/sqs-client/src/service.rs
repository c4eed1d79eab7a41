//! The queue service client and its operations.
//!
//! [`QueueService`] is the entry point of this crate. Every operation is one
//! signed HTTP round trip: build headers, sign, send through the
//! [`Transport`], parse the XML body, extract the result.

use crate::config::{ClientConfig, Credentials};
use crate::document::Document;
use crate::error::SqsError;
use crate::queue::{Message, Queue};
use crate::sign::Signer;
use crate::transport::{HttpTransport, Method, Transport};
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Protocol version sent in the `AWS-Version` header of every request.
const AWS_VERSION: &str = "2006-04-01";

/// Content type sent with every request; it also participates in the
/// request signature.
const CONTENT_TYPE: &str = "text/plain";

/// HTTP-date layout for the `Date` header, e.g. `Wed, 01 Feb 2006 00:00:00 GMT`.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Page size used by [`QueueService::flush_queue`] for each receive call.
const FLUSH_PAGE_SIZE: u32 = 255;

// ============================================================================
// Queue references
// ============================================================================

/// A queue argument: either a name that still needs resolving or a
/// previously resolved [`Queue`] handle.
///
/// Operations accept `impl Into<QueueRef>` so callers can pass `&str`,
/// `String`, `&Queue`, or `Queue` interchangeably. A handle short-circuits
/// resolution; a name costs one listing round trip.
#[derive(Debug, Clone)]
pub enum QueueRef {
    /// Queue name, resolved against the queue listing when used.
    Name(String),
    /// Resolved queue handle, used as-is.
    Handle(Queue),
}

impl From<&str> for QueueRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for QueueRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Queue> for QueueRef {
    fn from(queue: &Queue) -> Self {
        Self::Handle(queue.clone())
    }
}

impl From<Queue> for QueueRef {
    fn from(queue: Queue) -> Self {
        Self::Handle(queue)
    }
}

// ============================================================================
// Receive options
// ============================================================================

/// Optional parameters for [`QueueService::get_messages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveOptions {
    /// Seconds the received messages stay invisible to other consumers.
    pub visibility_timeout: Option<u32>,
    /// Maximum number of messages to receive in one call.
    pub count: Option<u32>,
}

impl ReceiveOptions {
    /// Options with neither parameter set; the service applies its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility timeout in seconds.
    pub fn with_visibility_timeout(mut self, seconds: u32) -> Self {
        self.visibility_timeout = Some(seconds);
        self
    }

    /// Set the maximum number of messages to receive.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Build the receive path for a queue: `<path>/front` plus the query
/// parameters that were supplied, visibility timeout first.
fn receive_path(queue_path: &str, options: &ReceiveOptions) -> String {
    let mut path = format!("{}/front", queue_path);
    let mut separator = '?';

    if let Some(timeout) = options.visibility_timeout {
        path.push(separator);
        path.push_str(&format!("VisibilityTimeout={}", timeout));
        separator = '&';
    }

    if let Some(count) = options.count {
        path.push(separator);
        path.push_str(&format!("NumberOfMessages={}", count));
    }

    path
}

// ============================================================================
// Queue service
// ============================================================================

/// Client for a remote message-queue service.
///
/// The service holds an immutable configuration, a request signer, and a
/// transport. It keeps no other state, so one instance can be shared across
/// tasks with `Arc` without locking; each operation is an independent
/// request/response round trip.
///
/// # Example
///
/// ```no_run
/// use sqs_client::{QueueService, ReceiveOptions};
///
/// # async fn example() -> Result<(), sqs_client::SqsError> {
/// let service = QueueService::from_env()?;
///
/// let url = service.create_queue("invoices").await?;
/// println!("created {}", url);
///
/// service.put_message("invoices", "invoice #42").await?;
///
/// for message in service
///     .get_messages("invoices", ReceiveOptions::new().with_count(10))
///     .await?
/// {
///     println!("{}: {}", message.message_id(), message.message_body());
///     message.delete(&service).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct QueueService {
    config: ClientConfig,
    signer: Signer,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for QueueService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueService")
            .field("queue_host", &self.config.queue_host)
            .finish()
    }
}

impl QueueService {
    /// Create a service client over HTTPS (or HTTP, per the configuration).
    ///
    /// # Errors
    ///
    /// Returns [`SqsError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self, SqsError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, credentials, transport))
    }

    /// Create a service client with the default configuration and
    /// credentials read from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SqsError::Configuration`] when either credential variable
    /// is missing.
    pub fn from_env() -> Result<Self, SqsError> {
        let credentials = Credentials::from_env()?;
        Self::new(ClientConfig::default(), credentials)
    }

    /// Create a service client on a caller-supplied transport.
    ///
    /// This is the seam tests use to substitute a scripted transport.
    pub fn with_transport(
        config: ClientConfig,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            signer: Signer::new(credentials),
            transport,
        }
    }

    /// List the queues of the account, optionally narrowed to names
    /// starting with `prefix`. An empty listing is a valid result.
    ///
    /// # Errors
    ///
    /// Returns [`SqsError::MalformedQueueUrl`] when a listing entry does
    /// not look like a queue URL, or any error from the exchange itself.
    pub async fn list_queues(&self, prefix: Option<&str>) -> Result<Vec<Queue>, SqsError> {
        let path = match prefix {
            Some(prefix) => format!("/?QueueNamePrefix={}", urlencoding::encode(prefix)),
            None => "/".to_string(),
        };

        let document = self
            .request(Method::Get, &self.config.queue_host, &path, None)
            .await?;

        document
            .elements("QueueUrl")
            .into_iter()
            .map(|element| Queue::from_listing_url(element.text()))
            .collect()
    }

    /// Create a queue and return its URL.
    ///
    /// The service rejects names that violate its naming rules with a
    /// [`SqsError::Service`].
    pub async fn create_queue(&self, queue_name: &str) -> Result<String, SqsError> {
        let path = format!("/?QueueName={}", urlencoding::encode(queue_name));

        let document = self
            .request(Method::Post, &self.config.queue_host, &path, None)
            .await?;

        match document.first_text("QueueUrl") {
            Some(url) => Ok(url.to_string()),
            None => Err(SqsError::MalformedResponse {
                message: "queue create response carries no QueueUrl element".to_string(),
            }),
        }
    }

    /// Look up a queue by its exact name.
    ///
    /// The remote service has no exact-match endpoint, so this lists with
    /// the name as prefix and scans for the exact match.
    ///
    /// # Errors
    ///
    /// Returns [`SqsError::QueueNotFound`] when no listed queue carries
    /// that name.
    pub async fn get_queue(&self, queue_name: &str) -> Result<Queue, SqsError> {
        debug!(queue = %queue_name, "Resolving queue name");

        let queues = self.list_queues(Some(queue_name)).await?;

        queues
            .into_iter()
            .find(|queue| queue.name() == queue_name)
            .ok_or_else(|| SqsError::QueueNotFound {
                name: queue_name.to_string(),
            })
    }

    /// Turn a queue reference into a queue handle.
    ///
    /// A [`QueueRef::Handle`] is returned unchanged; a [`QueueRef::Name`]
    /// costs one [`get_queue`](Self::get_queue) lookup.
    pub async fn resolve_queue(&self, queue: impl Into<QueueRef>) -> Result<Queue, SqsError> {
        match queue.into() {
            QueueRef::Handle(queue) => Ok(queue),
            QueueRef::Name(name) => self.get_queue(&name).await,
        }
    }

    /// Append a message to the back of a queue and return the id the
    /// service assigned to it.
    ///
    /// The content is sent verbatim as the request body; callers that need
    /// a binary-safe payload encode it themselves.
    pub async fn put_message(
        &self,
        queue: impl Into<QueueRef>,
        content: &str,
    ) -> Result<String, SqsError> {
        let queue = self.resolve_queue(queue).await?;
        let path = format!("{}/back", queue.path());

        let document = self
            .request(Method::Put, queue.host(), &path, Some(content))
            .await?;

        match document.first_text("MessageId") {
            Some(id) => Ok(id.to_string()),
            None => Err(SqsError::MalformedResponse {
                message: "message put response carries no MessageId element".to_string(),
            }),
        }
    }

    /// Alias for [`put_message`](Self::put_message).
    pub async fn send_message(
        &self,
        queue: impl Into<QueueRef>,
        content: &str,
    ) -> Result<String, SqsError> {
        self.put_message(queue, content).await
    }

    /// Receive messages from the front of a queue, in service order.
    ///
    /// Both options are forwarded only when set; the service applies its
    /// own defaults otherwise.
    pub async fn get_messages(
        &self,
        queue: impl Into<QueueRef>,
        options: ReceiveOptions,
    ) -> Result<Vec<Message>, SqsError> {
        let queue = self.resolve_queue(queue).await?;
        let path = receive_path(queue.path(), &options);

        let document = self.request(Method::Get, queue.host(), &path, None).await?;

        let messages = document
            .elements("Message")
            .into_iter()
            .map(|element| Message::from_element(queue.clone(), element))
            .collect();

        Ok(messages)
    }

    /// Fetch a single message by id.
    ///
    /// A not-found reply from the service means the message does not exist
    /// (or is currently invisible); that case is `Ok(None)`, not an error.
    pub async fn get_message(
        &self,
        queue: impl Into<QueueRef>,
        message_id: &str,
    ) -> Result<Option<Message>, SqsError> {
        let queue = self.resolve_queue(queue).await?;
        let path = format!("{}/{}", queue.path(), message_id);

        match self.request(Method::Get, queue.host(), &path, None).await {
            Ok(document) => Ok(Some(Message::from_document(queue, &document))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a single message by id.
    ///
    /// Returns whether the service reported the deletion as successful.
    pub async fn delete_message(
        &self,
        queue: impl Into<QueueRef>,
        message_id: &str,
    ) -> Result<bool, SqsError> {
        let queue = self.resolve_queue(queue).await?;
        let path = format!("{}/{}", queue.path(), message_id);

        let document = self
            .request(Method::Delete, queue.host(), &path, None)
            .await?;

        Ok(document.first_text("StatusCode") == Some("Success"))
    }

    /// Delete every message currently in a queue, one by one, and return
    /// how many were deleted.
    ///
    /// The queue is resolved once; the loop then receives pages of up to
    /// 255 messages with a zero visibility timeout and deletes each message
    /// individually, until a receive comes back empty. The operation is not
    /// atomic: a failure mid-loop leaves the remaining messages in place
    /// and the error reports nothing about the deletions that already
    /// happened.
    pub async fn flush_queue(&self, queue: impl Into<QueueRef>) -> Result<usize, SqsError> {
        let queue = self.resolve_queue(queue).await?;
        let options = ReceiveOptions::new()
            .with_visibility_timeout(0)
            .with_count(FLUSH_PAGE_SIZE);

        let mut deleted = 0;

        loop {
            let messages = self.get_messages(&queue, options.clone()).await?;
            if messages.is_empty() {
                break;
            }

            for message in &messages {
                self.delete_message(&queue, message.message_id()).await?;
                deleted += 1;
            }
        }

        info!(queue = %queue.name(), count = deleted, "Queue flushed");

        Ok(deleted)
    }

    /// Delete a queue. Returns whether the service reported the deletion
    /// as successful.
    ///
    /// With `force` set, the queue is flushed first; the service refuses to
    /// delete a non-empty queue. A client-error reply (the service answers
    /// in the 400 range when the queue does not exist or still holds
    /// messages) is reported as `Ok(false)` rather than an error.
    pub async fn delete_queue(
        &self,
        queue: impl Into<QueueRef>,
        force: bool,
    ) -> Result<bool, SqsError> {
        let queue = self.resolve_queue(queue).await?;

        if force {
            self.flush_queue(&queue).await?;
        }

        // The delete is addressed to the service host, not the queue host.
        let document = match self
            .request(Method::Delete, &self.config.queue_host, queue.path(), None)
            .await
        {
            Ok(document) => document,
            Err(e) if e.is_client_error() => return Ok(false),
            Err(e) => return Err(e),
        };

        Ok(document.first_text("StatusCode") == Some("Success"))
    }

    /// Perform one signed exchange and return the parsed response document.
    ///
    /// Non-success statuses become [`SqsError::Service`] with the status
    /// code and reason phrase; success bodies are parsed and scanned for
    /// embedded `Error` elements before being handed back.
    async fn request(
        &self,
        method: Method,
        host: &str,
        path: &str,
        body: Option<&str>,
    ) -> Result<Document, SqsError> {
        let date = Utc::now().format(DATE_FORMAT).to_string();
        let authorization = self
            .signer
            .authorization_header(method, path, &date, CONTENT_TYPE)?;

        let mut headers = HashMap::new();
        headers.insert("AWS-Version".to_string(), AWS_VERSION.to_string());
        headers.insert("Date".to_string(), date);
        headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        if let Some(body) = body {
            headers.insert("Content-Length".to_string(), body.len().to_string());
        }
        headers.insert("Authorization".to_string(), authorization);

        debug!(method = %method, host = %host, path = %path, "Sending queue service request");

        let response = self
            .transport
            .request(method, host, path, body, &headers)
            .await?;

        debug!(status = response.status, "Queue service response received");

        if !(200..300).contains(&response.status) {
            return Err(SqsError::Service {
                code: response.status.to_string(),
                message: response.reason,
            });
        }

        let document = Document::parse(&response.body)?;
        document.check_errors()?;

        Ok(document)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
