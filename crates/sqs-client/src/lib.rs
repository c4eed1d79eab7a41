//! # SQS Client
//!
//! Client library for a remote message-queue service speaking the 2006-04-01
//! HTTP protocol, with HMAC-SHA1 request signing and XML response handling.
//!
//! This library provides:
//! - Queue management (list, create, delete, flush)
//! - Sending and receiving plain-text messages
//! - HMAC-SHA1 request signing from environment or explicit credentials
//! - A transport seam for exercising the client against scripted servers
//!
//! ## Module Organization
//!
//! - [config] - Credentials and client configuration
//! - [error] - Error type for all operations
//! - [document] - XML response documents and error scanning
//! - [queue] - Queue and message entities
//! - [service] - The queue service client and its operations
//! - [sign] - Request signature computation
//! - [transport] - HTTP transport trait and implementation
//!
//! ## Example
//!
//! ```no_run
//! use sqs_client::QueueService;
//!
//! # async fn example() -> Result<(), sqs_client::SqsError> {
//! let service = QueueService::from_env()?;
//!
//! service.create_queue("orders").await?;
//! service.put_message("orders", "order #7").await?;
//!
//! let flushed = service.flush_queue("orders").await?;
//! println!("dropped {} messages", flushed);
//!
//! service.delete_queue("orders", false).await?;
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod config;
pub mod document;
pub mod error;
pub mod queue;
pub mod service;
pub mod sign;
pub mod transport;

// Re-export commonly used types at crate root for convenience
pub use config::{ClientConfig, Credentials, DEFAULT_QUEUE_HOST};
pub use document::{Document, Element};
pub use error::SqsError;
pub use queue::{Message, Queue};
pub use service::{QueueRef, QueueService, ReceiveOptions};
pub use sign::Signer;
pub use transport::{HttpTransport, Method, Transport, TransportResponse};
