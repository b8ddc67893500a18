//! dnslog-api - serve a static DNS traffic log over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use dnslog_api::config::Overrides;
use dnslog_api::logging::{self, LogFormat};
use dnslog_api::ServerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Query API over a static DNS traffic log
#[derive(Parser, Debug)]
#[command(name = "dnslog-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (TOML); missing file means defaults
    #[arg(short, long, env = "DNSLOG_CONFIG", default_value = "dnslog-api.toml")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = "DNSLOG_LISTEN")]
    listen: Option<SocketAddr>,

    /// Dataset location: http(s) URL or CSV file path
    #[arg(short, long, env = "DNSLOG_SOURCE")]
    source: Option<String>,

    /// Log line format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Send tables as a JSON string holding the table object
    #[arg(long, env = "DNSLOG_DOUBLE_ENCODE")]
    double_encode: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ServerConfig::load(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?
        .with_overrides(Overrides {
            listen: args.listen,
            source: args.source,
            log_format: args.log_format,
            double_encode: args.double_encode,
        });

    logging::init(config.log.format, &config.log.level);

    if let Err(e) = dnslog_api::server::run(&config).await {
        tracing::error!(error = %e, "dnslog-api failed");
        return Err(e.into());
    }

    Ok(())
}
