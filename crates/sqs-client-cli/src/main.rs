use sqs_client_cli::{run_cli, CliError};
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run_cli().await {
        error!("CLI error: {}", e);

        // One exit code per error class, for scripts.
        let exit_code = match e {
            CliError::Configuration(_) => 1,
            CliError::Queue(_) => 2,
            CliError::Serialization(_) => 3,
            CliError::InvalidArgument { .. } => 4,
            CliError::Io(_) => 5,
        };

        std::process::exit(exit_code);
    }
}
