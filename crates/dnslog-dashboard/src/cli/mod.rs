//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use dnslog_client::DEFAULT_API_HOST;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Determine output format
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // API host from CLI or env, then config, then the default
    let api_host = cli
        .api_host
        .filter(|h| !h.trim().is_empty())
        .or_else(|| config.api_host.clone())
        .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout_secs));

    // Create context for commands
    let ctx = commands::Context {
        api_host,
        output_format,
        timeout,
        view: config.view(),
    };

    // Dispatch to appropriate command
    match cli.command {
        None => commands::dashboard::execute(ctx, args::DashboardArgs::default()).await,
        Some(Commands::Dashboard(args)) => commands::dashboard::execute(ctx, args).await,
        Some(Commands::All) => commands::view::all(ctx).await,
        Some(Commands::Unique) => commands::view::unique(ctx).await,
        Some(Commands::Bytes(args)) => commands::view::bytes(ctx, args.threshold).await,
        Some(Commands::Ip(args)) => commands::view::ip(ctx, &args.ip).await,
        Some(Commands::Config(args)) => commands::config::execute(ctx, args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
