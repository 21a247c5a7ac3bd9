//! BlockHub lookup proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──GET /api/*?address=..|txid=..──▶ http::server (lookup handler)
//!                                                  │
//!                                                  ▼
//!                                          upstream::Query
//!                                                  │
//!                                                  ▼
//!              identity::IdentityRotator ──▶ upstream::UpstreamGateway ──GET──▶ explorer API
//!                 (User-Agent per call)             │
//!                                                  ▼
//!   Client ◀── 200 JSON passthrough | 404/400/405 {"error": ...}
//! ```
//!
//! Without `--config` the proxy runs the reference setup: port 9000,
//! btcbook.guarda.co, five rotated browser identities.

use std::path::PathBuf;

use clap::Parser;

use blockhub_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use blockhub_proxy::lifecycle;

#[derive(Parser)]
#[command(name = "blockhub-proxy")]
#[command(about = "Address and transaction lookup proxy for a block explorer API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    lifecycle::run(config).await?;
    Ok(())
}
