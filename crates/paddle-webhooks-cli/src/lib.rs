//! # Paddle Webhooks CLI
//!
//! Command-line interface for working with captured Paddle webhook deliveries.
//!
//! This module provides CLI commands for:
//! - Verifying a delivery body against Paddle's public key
//! - Printing the PHP serialization a signature is computed over
//! - Decoding fixtures without verification
//! - Listing the supported alert types
//! - Validating and showing the resolved configuration

use clap::{CommandFactory, Parser, Subcommand};
use paddle_webhooks::{
    decode, parse_form, php_serialize, Alert, AlertKind, PublicKey, VerificationError,
    WebhookError, WebhookFields, WebhookRequest, WebhookValidator, FORM_CONTENT_TYPE,
    SIGNATURE_FIELD,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the optional configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "paddle-webhooks.toml";

/// Prefix of configuration environment variables, e.g.
/// `PADDLE_WEBHOOKS__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "PADDLE_WEBHOOKS";

// ============================================================================
// CLI Structure
// ============================================================================

/// paddle-webhooks - Verify and decode Paddle webhook deliveries
#[derive(Parser, Debug)]
#[command(name = "paddle-webhooks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify and decode Paddle webhook deliveries")]
#[command(
    long_about = "Checks captured Paddle classic webhook bodies against Paddle's public key and decodes them into typed alerts"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PADDLE_WEBHOOKS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive (overrides configuration)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a delivery body and print the decoded alert
    Verify {
        /// File holding the form-encoded body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,

        /// Content-Type the delivery arrived with
        #[arg(long, default_value = FORM_CONTENT_TYPE)]
        content_type: String,

        /// PEM public key file (overrides `public_key_path`)
        #[arg(short = 'k', long)]
        public_key: Option<PathBuf>,

        /// Print the verified fields instead of the decoded alert
        #[arg(long)]
        raw: bool,
    },

    /// Print the PHP serialization the signature is computed over
    Serialize {
        /// File holding the form-encoded body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,
    },

    /// Decode a delivery body WITHOUT verifying its signature
    Decode {
        /// File holding the form-encoded body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,
    },

    /// List the supported alert types
    Alerts {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
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
    Configuration(#[from] ConfigError),

    #[error("Webhook rejected: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Command failed: {message}")]
    CommandFailed { message: String },

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    Validation { key: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Failed to read public key {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unusable public key: {0}")]
    InvalidKey(#[from] VerificationError),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

// ============================================================================
// Configuration Types
// ============================================================================

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// PEM file holding Paddle's public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_path: Option<PathBuf>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Check values the deserializer cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.logging.level).map_err(|e| ConfigError::Validation {
            key: "logging.level".to_string(),
            message: e.to_string(),
        })?;

        if let Some(path) = &self.public_key_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation {
                    key: "public_key_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogFormat {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json")]
    Json,
}

/// Path of the per-user configuration file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("paddle-webhooks").join("config.toml"))
}

/// Load configuration.
///
/// Sources, later ones overriding earlier ones:
///  1. Built-in defaults
///  2. `<user config dir>/paddle-webhooks/config.toml`
///  3. `./paddle-webhooks.toml`
///  4. The explicit file, which must exist when given
///  5. Environment variables prefixed `PADDLE_WEBHOOKS__`
pub fn load_configuration(explicit_path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(user_path) = user_config_path() {
        builder = builder.add_source(
            config::File::from(user_path)
                .required(false)
                .format(config::FileFormat::Toml),
        );
    }

    builder = builder.add_source(
        config::File::from(Path::new(LOCAL_CONFIG_FILE))
            .required(false)
            .format(config::FileFormat::Toml),
    );

    if let Some(path) = explicit_path {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        builder = builder.add_source(
            config::File::from(path)
                .required(true)
                .format(config::FileFormat::Toml),
        );
    }

    let config: CliConfig = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref())?;
    initialize_logging(&cli, &config.logging)?;
    debug!(config = ?config, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &config, &mut out)
}

/// Execute a parsed command, writing its output to `out`
pub fn run(command: Commands, config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Commands::Verify {
            body,
            content_type,
            public_key,
            raw,
        } => execute_verify_command(&body, content_type, public_key.as_deref(), raw, config, out),
        Commands::Serialize { body } => execute_serialize_command(&body, out),
        Commands::Decode { body } => execute_decode_command(&body, out),
        Commands::Alerts { format } => execute_alerts_command(format, out),
        Commands::Config { show } => execute_config_command(show, config, out),
        Commands::Completions { shell } => execute_completions_command(shell, out),
    }
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins over `--log-level`, which wins over `logging.level`.
fn initialize_logging(cli: &Cli, logging: &LoggingConfig) -> Result<(), CliError> {
    let level = cli.log_level.as_deref().unwrap_or(&logging.level);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| CliError::InvalidArgument {
            arg: "--log-level".to_string(),
            message: e.to_string(),
        })?,
    };

    let json = cli.json_logs || logging.format == LogFormat::Json;
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| CliError::CommandFailed {
        message: format!("Failed to initialize logging: {}", e),
    })
}

// ============================================================================
// Command Implementations
// ============================================================================

/// JSON document printed by `verify` and `decode`
#[derive(Debug, Serialize)]
struct Report<'a> {
    verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<AlertKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<&'a Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a WebhookFields>,
}

impl<'a> Report<'a> {
    fn for_alert(verified: bool, alert: &'a Alert) -> Self {
        Self {
            verified,
            kind: Some(alert.kind()),
            alert_id: alert.alert_id(),
            alert: Some(alert),
            fields: None,
        }
    }

    fn for_fields(fields: &'a WebhookFields) -> Self {
        Self {
            verified: true,
            kind: None,
            alert_id: None,
            alert: None,
            fields: Some(fields),
        }
    }
}

/// Read a delivery body from a file, or stdin for `-`
fn read_body(path: &Path) -> Result<Vec<u8>, CliError> {
    let mut body = Vec::new();
    let result = if path == Path::new("-") {
        std::io::stdin().read_to_end(&mut body).map(|_| ())
    } else {
        std::fs::File::open(path).and_then(|mut file| file.read_to_end(&mut body).map(|_| ()))
    };

    result.map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(body)
}

/// Load the public key named by `--public-key` or `public_key_path`
fn load_public_key(
    override_path: Option<&Path>,
    config: &CliConfig,
) -> Result<PublicKey, ConfigError> {
    let path = override_path
        .or(config.public_key_path.as_deref())
        .ok_or_else(|| ConfigError::MissingRequired {
            key: "public_key_path".to_string(),
        })?;

    let pem = std::fs::read_to_string(path).map_err(|source| ConfigError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let key = PublicKey::from_pem(&pem)?;

    debug!(path = %path.display(), bits = key.bits(), "Loaded public key");
    Ok(key)
}

/// Form-decode a body and drop its signature
fn unsigned_fields(body: &[u8]) -> Result<WebhookFields, CliError> {
    let mut fields = parse_form(body)?;
    fields.remove(SIGNATURE_FIELD);
    Ok(fields)
}

fn write_json<T: Serialize>(value: &T, out: &mut impl Write) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Execute verify command
fn execute_verify_command(
    body_path: &Path,
    content_type: String,
    public_key_path: Option<&Path>,
    raw: bool,
    config: &CliConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    info!(
        body = %body_path.display(),
        content_type = %content_type,
        raw = raw,
        "Verifying webhook delivery"
    );

    let validator = WebhookValidator::new(load_public_key(public_key_path, config)?);
    let request = WebhookRequest::new(content_type, read_body(body_path)?);

    if raw {
        let fields = validator.validate(&request)?;
        write_json(&Report::for_fields(&fields), out)
    } else {
        let webhook = validator.parse(&request)?;
        info!(kind = %webhook.alert.kind(), "Webhook verified");
        write_json(&Report::for_alert(true, &webhook.alert), out)
    }
}

/// Execute serialize command
fn execute_serialize_command(body_path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    info!(body = %body_path.display(), "Serializing webhook fields");

    let fields = unsigned_fields(&read_body(body_path)?)?;
    out.write_all(&php_serialize(&fields))?;
    writeln!(out)?;
    Ok(())
}

/// Execute decode command
fn execute_decode_command(body_path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    warn!(
        body = %body_path.display(),
        "Decoding without signature verification; output is untrusted"
    );

    let fields = unsigned_fields(&read_body(body_path)?)?;
    let alert = decode(&fields).map_err(WebhookError::from)?;
    write_json(&Report::for_alert(false, &alert), out)
}

/// Execute alerts command
fn execute_alerts_command(format: OutputFormat, out: &mut impl Write) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for kind in AlertKind::ALL {
                match kind.alert_name() {
                    Some(alert_name) => writeln!(out, "{}", alert_name)?,
                    None => writeln!(out, "{} (no alert_name, identified by p_order_id)", kind)?,
                }
            }
            Ok(())
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = AlertKind::ALL
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "kind": kind,
                        "alert_name": kind.alert_name(),
                    })
                })
                .collect();
            write_json(&entries, out)
        }
    }
}

/// Execute config command
fn execute_config_command(
    show: bool,
    config: &CliConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    info!(show = show, "Processing config command");

    match &config.public_key_path {
        Some(_) => {
            let key = load_public_key(None, config)?;
            writeln!(out, "Public key: RSA {} bits", key.bits())?;
        }
        None => writeln!(out, "Public key: not configured")?,
    }
    writeln!(out, "Configuration is valid")?;

    if show {
        let rendered = toml::to_string_pretty(config).map_err(ConfigError::from)?;
        writeln!(out)?;
        write!(out, "{}", rendered)?;
    }
    Ok(())
}

/// Execute completions command
fn execute_completions_command(
    shell: clap_complete::Shell,
    out: &mut impl Write,
) -> Result<(), CliError> {
    info!(shell = ?shell, "Generating shell completions");

    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "paddle-webhooks", out);
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
