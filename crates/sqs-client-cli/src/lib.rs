//! # SQS Client CLI
//!
//! Command-line interface over the queue service client.
//!
//! This module provides CLI commands for:
//! - Listing, creating, flushing, and deleting queues
//! - Sending and receiving messages, optionally base64-coded
//! - Text or JSON output for scripting
//!
//! Credentials are read from `AMAZON_ACCESS_KEY_ID` and
//! `AMAZON_SECRET_ACCESS_KEY`; results go to stdout, logs to stderr.

use base64::{engine::general_purpose::STANDARD, Engine};
use clap::{Parser, Subcommand};
use sqs_client::{ClientConfig, Credentials, QueueService, ReceiveOptions, SqsError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI Structure
// ============================================================================

/// SQS client CLI - queue and message operations from the shell
#[derive(Parser)]
#[command(name = "sqs-client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Work with a remote message-queue service")]
#[command(
    long_about = "Lists, creates, flushes, and deletes queues, and sends and receives plain-text messages on them"
)]
pub struct Cli {
    /// Queue service host
    #[arg(short = 'H', long, default_value = sqs_client::DEFAULT_QUEUE_HOST)]
    pub host: String,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub no_https: bool,

    /// Base64-encode message bodies on send and decode them on receive
    #[arg(short = 'b', long)]
    pub base64: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Logging level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List queues, optionally narrowed by a name prefix
    #[command(visible_alias = "lq")]
    ListQueues {
        /// Only list queues whose name starts with this prefix
        prefix: Option<String>,
    },

    /// Create a queue
    #[command(visible_alias = "cq")]
    CreateQueue {
        /// Name of the queue to create
        queue: String,
    },

    /// Delete a queue
    #[command(visible_alias = "dq")]
    DeleteQueue {
        /// Name of the queue to delete
        queue: String,

        /// Flush the queue before deleting it
        #[arg(long)]
        force: bool,
    },

    /// Delete every message currently in a queue
    #[command(visible_alias = "fq")]
    FlushQueue {
        /// Name of the queue to flush
        queue: String,
    },

    /// Send a message to a queue
    #[command(visible_aliases = ["pm", "send-message"])]
    PutMessage {
        /// Name of the destination queue
        queue: String,

        /// Message body; read from stdin when omitted
        message: Option<String>,
    },

    /// Fetch one message by id, or a batch from the front of the queue
    #[command(visible_alias = "gm")]
    GetMessage {
        /// Name of the queue to read from
        queue: String,

        /// Message id; a batch receive is performed when omitted
        message_id: Option<String>,

        /// Visibility timeout in seconds for the batch receive
        #[arg(short, long, default_value = "0")]
        timeout: u32,

        /// Maximum number of messages for the batch receive
        #[arg(short, long, default_value = "255")]
        count: u32,
    },

    /// Delete one message by id
    #[command(visible_alias = "dm")]
    DeleteMessage {
        /// Name of the queue holding the message
        queue: String,

        /// Id of the message to delete
        message_id: String,
    },
}

/// Output format options
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Queue service error: {0}")]
    Queue(#[from] SqsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Initialize logging
    initialize_logging(&cli)?;

    // Build the service client
    let service = build_service(&cli)?;
    let format = cli.format;
    let base64 = cli.base64;

    // Execute command
    match cli.command {
        Commands::ListQueues { prefix } => {
            execute_list_queues(&service, prefix.as_deref(), &format).await
        }
        Commands::CreateQueue { queue } => execute_create_queue(&service, &queue, &format).await,
        Commands::DeleteQueue { queue, force } => {
            execute_delete_queue(&service, &queue, force, &format).await
        }
        Commands::FlushQueue { queue } => execute_flush_queue(&service, &queue, &format).await,
        Commands::PutMessage { queue, message } => {
            execute_put_message(&service, &queue, message, base64, &format).await
        }
        Commands::GetMessage {
            queue,
            message_id,
            timeout,
            count,
        } => {
            execute_get_message(
                &service,
                &queue,
                message_id.as_deref(),
                timeout,
                count,
                base64,
                &format,
            )
            .await
        }
        Commands::DeleteMessage { queue, message_id } => {
            execute_delete_message(&service, &queue, &message_id, &format).await
        }
    }
}

/// Initialize logging based on CLI arguments
fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    let registry = tracing_subscriber::registry().with(filter);

    let result = if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| CliError::Configuration(format!("Failed to initialize logging: {}", e)))
}

/// Build the queue service client from CLI arguments and the environment.
fn build_service(cli: &Cli) -> Result<QueueService, CliError> {
    let credentials = Credentials::from_env().map_err(configuration_error)?;

    let config = ClientConfig::default()
        .with_queue_host(cli.host.clone())
        .with_use_https(!cli.no_https);

    QueueService::new(config, credentials).map_err(configuration_error)
}

fn configuration_error(err: SqsError) -> CliError {
    match err {
        SqsError::Configuration { message } => CliError::Configuration(message),
        other => CliError::Queue(other),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// Execute list-queues command
async fn execute_list_queues(
    service: &QueueService,
    prefix: Option<&str>,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let queues = service.list_queues(prefix).await?;

    match format {
        OutputFormat::Text => {
            for queue in &queues {
                println!("{}", queue.name());
            }
        }
        OutputFormat::Json => print_json(&queues)?,
    }

    Ok(())
}

/// Execute create-queue command
async fn execute_create_queue(
    service: &QueueService,
    queue_name: &str,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let url = service.create_queue(queue_name).await?;

    match format {
        OutputFormat::Text => println!("{}", url),
        OutputFormat::Json => print_json(&serde_json::json!({ "queue_url": url }))?,
    }

    Ok(())
}

/// Execute delete-queue command
async fn execute_delete_queue(
    service: &QueueService,
    queue_name: &str,
    force: bool,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let deleted = service.delete_queue(queue_name, force).await?;

    match format {
        OutputFormat::Text => println!("{}", deleted),
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": deleted }))?,
    }

    Ok(())
}

/// Execute flush-queue command
async fn execute_flush_queue(
    service: &QueueService,
    queue_name: &str,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let count = service.flush_queue(queue_name).await?;

    match format {
        OutputFormat::Text => println!("{}", count),
        OutputFormat::Json => print_json(&serde_json::json!({ "count": count }))?,
    }

    Ok(())
}

/// Execute put-message command
async fn execute_put_message(
    service: &QueueService,
    queue_name: &str,
    message: Option<String>,
    base64: bool,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let message = match message {
        Some(message) => message,
        None => read_message_from_stdin()?,
    };

    let message = if base64 {
        STANDARD.encode(message.as_bytes())
    } else {
        message
    };

    let message_id = service.put_message(queue_name, &message).await?;

    match format {
        OutputFormat::Text => println!("{}", message_id),
        OutputFormat::Json => print_json(&serde_json::json!({ "message_id": message_id }))?,
    }

    Ok(())
}

/// Execute get-message command
async fn execute_get_message(
    service: &QueueService,
    queue_name: &str,
    message_id: Option<&str>,
    timeout: u32,
    count: u32,
    base64: bool,
    format: &OutputFormat,
) -> Result<(), CliError> {
    // With an id, fetch that one message; without, receive a batch.
    match message_id {
        Some(message_id) => {
            let message = service.get_message(queue_name, message_id).await?;

            match message {
                Some(message) => {
                    let body = decode_body(message.message_body(), base64)?;
                    match format {
                        OutputFormat::Text => println!("{}", body),
                        OutputFormat::Json => print_json(&serde_json::json!({
                            "message_id": message.message_id(),
                            "message_body": body,
                        }))?,
                    }
                }
                None => {
                    info!(message_id = %message_id, "No such message");
                    if let OutputFormat::Json = format {
                        println!("null");
                    }
                }
            }
        }
        None => {
            let options = ReceiveOptions::new()
                .with_visibility_timeout(timeout)
                .with_count(count);
            let messages = service.get_messages(queue_name, options).await?;

            match format {
                OutputFormat::Text => {
                    for message in &messages {
                        let body = decode_body(message.message_body(), base64)?;
                        println!("{}\t{}", message.message_id(), body);
                    }
                }
                OutputFormat::Json => {
                    let values = messages
                        .iter()
                        .map(|message| {
                            decode_body(message.message_body(), base64).map(|body| {
                                serde_json::json!({
                                    "message_id": message.message_id(),
                                    "message_body": body,
                                })
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    print_json(&values)?;
                }
            }
        }
    }

    Ok(())
}

/// Execute delete-message command
async fn execute_delete_message(
    service: &QueueService,
    queue_name: &str,
    message_id: &str,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let deleted = service.delete_message(queue_name, message_id).await?;

    match format {
        OutputFormat::Text => println!("{}", deleted),
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": deleted }))?,
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Read a message body from stdin, up to end of input. A trailing newline
/// is not part of the message.
fn read_message_from_stdin() -> Result<String, CliError> {
    use std::io::Read;

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
    buffer.truncate(trimmed);

    Ok(buffer)
}

/// Decode a received message body when `--base64` is in effect.
fn decode_body(body: &str, base64: bool) -> Result<String, CliError> {
    if !base64 {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| CliError::InvalidArgument {
            arg: "--base64".to_string(),
            message: format!("received message body is not valid base64: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| CliError::InvalidArgument {
        arg: "--base64".to_string(),
        message: format!("decoded message body is not valid UTF-8: {}", e),
    })
}

/// Print a value as pretty JSON on stdout.
fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
