// txsmoke - Wallet API Smoke-Test Client
//
// Connects to a wallet API server, sends one tx_list request framed with
// a trailing newline, waits for a single newline-framed JSON response,
// reports it, and closes the connection. No retries, no timeouts: a
// failed connect or an unparseable response exits non-zero, and a silent
// server makes the run hang on purpose.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;
use txsmoke::config::Config;
use txsmoke::rpc::{SmokeClient, TcpTransport};

/// Smoke-test client for a wallet API server (JSON-RPC 2.0 over TCP)
#[derive(Parser, Debug)]
#[command(name = "txsmoke")]
#[command(version = "0.1.0")]
#[command(about = "Send one tx_list request to a wallet API server", long_about = None)]
struct Args {
    /// Server host (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Server TCP port (overrides config file)
    #[arg(long)]
    port: Option<u16>,

    /// Maximum number of transactions to request (overrides config file)
    #[arg(long)]
    count: Option<u32>,

    /// Number of transactions to skip (overrides config file)
    #[arg(long)]
    skip: Option<u32>,

    /// Path to a TOML config file (default: ~/.config/txsmoke/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration and apply CLI overrides
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(count) = args.count {
        config.request.count = count;
    }
    if let Some(skip) = args.skip {
        config.request.skip = skip;
    }
    config.validate()?;

    // Initialize tracing
    let filter = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level()?
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter.into())
                .from_env_lossy(),
        )
        .init();

    // Connect to the wallet API server
    let transport = TcpTransport::connect(&config.server.host, config.server.port)
        .await
        .with_context(|| {
            format!(
                "Could not reach wallet API server at {}:{}",
                config.server.host, config.server.port
            )
        })?;

    info!("Connected to {}", transport.peer());

    // Send the request and wait for the single framed response
    let mut client = SmokeClient::new(transport);
    let request = config.request.to_request();

    match client.run(&request).await? {
        Some(doc) => {
            println!("got: {}", doc);
        }
        None => {
            warn!("Server closed the connection before sending a response");
        }
    }

    info!("Connection closed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["txsmoke", "--host", "10.0.0.1", "--port", "20000"]);
        assert_eq!(args.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(args.port, Some(20000));
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["txsmoke"]);
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(args.count.is_none());
        assert!(args.skip.is_none());
        assert!(args.config.is_none());
    }
}
