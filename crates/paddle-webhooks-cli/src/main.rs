use paddle_webhooks::ErrorCategory;
use paddle_webhooks_cli::{run_cli, CliError};
use tracing::error;

fn main() {
    // Run CLI and handle errors
    if let Err(e) = run_cli() {
        error!("CLI error: {}", e);
        eprintln!("Error: {}", e);

        // Exit with appropriate code based on error type
        let exit_code = match &e {
            CliError::Configuration(_) => 1,
            CliError::Webhook(webhook_error) => match webhook_error.category() {
                ErrorCategory::Authentication => 2,
                ErrorCategory::Configuration => 1,
                ErrorCategory::Transport => 3,
                ErrorCategory::UnsupportedEvent | ErrorCategory::Malformed => 4,
            },
            CliError::CommandFailed { .. } => 5,
            CliError::InvalidArgument { .. } => 6,
            CliError::ReadInput { .. } | CliError::Io(_) => 7,
            CliError::Output(_) => 8,
        };

        std::process::exit(exit_code);
    }
}
