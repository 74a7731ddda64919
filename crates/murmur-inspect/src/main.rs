//! murmur envelope inspector
//!
//! Runs a single raw envelope through the receive pipeline with in-memory
//! collaborators and prints the classified message as JSON. Useful for
//! debugging envelopes captured from the wire.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use murmur_core::{
    DecryptionSelector, InMemoryStorage, MessageReceiver, ReceiverConfig, SessionProtocolStrategy,
};
use murmur_crypto::X25519StaticPrivateKey;
use murmur_protocol::session_id;

/// murmur envelope inspector
///
/// Decrypts, classifies and validates one envelope.
#[derive(Parser, Debug)]
#[command(name = "murmur-inspect")]
#[command(version, about, long_about = None)]
struct Args {
    /// Raw envelope file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    envelope: PathBuf,

    /// Local X25519 private key (64 hex characters)
    #[arg(long, env = "MURMUR_IDENTITY_KEY", hide_env_values = true)]
    identity_key: Option<String>,

    /// Closed group key pair as `<GROUP_SESSION_ID>:<PRIVATE_KEY_HEX>` (repeatable)
    #[arg(long = "group-key", value_name = "GROUP:KEY")]
    group_keys: Vec<String>,

    /// Treat the envelope as fetched from an open group with this server message id
    #[arg(long)]
    open_group_server_id: Option<u64>,

    /// Maximum accepted envelope size in bytes
    #[arg(long, env = "MURMUR_MAX_ENVELOPE_SIZE")]
    max_envelope_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MURMUR_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log format (plain, json)
    #[arg(long, env = "MURMUR_LOG_FORMAT", default_value = "plain")]
    log_format: String,
}

fn setup_logging(log_level: &str, log_format: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout stays machine-readable.
    match log_format.to_lowercase().as_str() {
        "json" => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
        _ => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    }

    Ok(())
}

fn parse_private_key(hex_key: &str) -> Result<X25519StaticPrivateKey> {
    let bytes = hex::decode(hex_key.trim()).context("Private key is not valid hex")?;
    X25519StaticPrivateKey::from_bytes(&bytes).context("Invalid X25519 private key")
}

fn parse_group_key(spec: &str) -> Result<(String, X25519StaticPrivateKey)> {
    let Some((group, key)) = spec.split_once(':') else {
        bail!("Group key must be <GROUP_SESSION_ID>:<PRIVATE_KEY_HEX>, got {spec:?}");
    };
    if group.is_empty() {
        bail!("Group session id is empty");
    }
    Ok((group.to_string(), parse_private_key(key)?))
}

fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("Failed to read envelope from stdin")?;
        return Ok(data);
    }
    fs::read(path).with_context(|| format!("Failed to read envelope from {}", path.display()))
}

/// Build receiver configuration from CLI arguments
fn build_config(args: &Args) -> Result<ReceiverConfig> {
    let mut builder = ReceiverConfig::builder();
    if let Some(size) = args.max_envelope_size {
        builder = builder.with_max_envelope_size(size);
    }
    builder
        .build_validated()
        .context("Invalid receiver configuration")
}

fn build_storage(args: &Args) -> Result<InMemoryStorage> {
    let storage = InMemoryStorage::new();
    if let Some(hex_key) = &args.identity_key {
        let key_pair = parse_private_key(hex_key)?;
        debug!(session_id = %session_id(&key_pair.public_key()), "Loaded identity");
        storage.set_identity(key_pair);
    }
    for spec in &args.group_keys {
        let (group, key_pair) = parse_group_key(spec)?;
        debug!(group = %group, "Loaded closed group key pair");
        storage.add_closed_group_key_pair(group, key_pair);
    }
    Ok(storage)
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = build_config(args)?;
    let storage = Arc::new(build_storage(args)?);
    let data = read_envelope(&args.envelope)?;

    let selector = DecryptionSelector::new(SessionProtocolStrategy::new(Arc::clone(&storage)));
    let receiver: MessageReceiver<()> =
        MessageReceiver::with_config(storage.clone(), storage, selector, config);

    match receiver.receive(&data, args.open_group_server_id, &mut ()) {
        Ok(message) => {
            println!("{}", serde_json::to_string_pretty(&message)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let report = serde_json::json!({
                "error": format!("{error:?}"),
                "message": error.to_string(),
                "retryable": error.is_retryable(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    setup_logging(&args.log_level, &args.log_format)?;
    run(&args)
}
