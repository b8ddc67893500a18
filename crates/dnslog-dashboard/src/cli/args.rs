//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::controls::FilterMode;
use crate::output::OutputFormat;

/// Terminal dashboard for the DNS log analytics API
///
/// Without a subcommand, opens the interactive dashboard.
#[derive(Parser, Debug)]
#[command(name = "dnslog-dashboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data service base URL (default: http://localhost:7000)
    #[arg(long, env = "API_HOST", global = true)]
    pub api_host: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the dashboard page (interactive unless a filter is given)
    Dashboard(DashboardArgs),

    /// Print every row
    All,

    /// Print the distinct source IPs
    Unique,

    /// Print rows with more than THRESHOLD bytes
    Bytes(BytesArgs),

    /// Print rows for one source IP
    Ip(IpArgs),

    /// Manage dashboard configuration
    Config(ConfigArgs),
}

// ============================================================================
// Dashboard command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Render once with this filter instead of prompting
    #[arg(long, value_enum)]
    pub mode: Option<FilterMode>,

    /// Slider value for `--mode bytes` (snapped to the slider steps)
    #[arg(long, requires = "mode")]
    pub threshold: Option<u64>,

    /// IP for `--mode ip` (default: first unique IP)
    #[arg(long, requires = "mode")]
    pub ip: Option<String>,
}

// ============================================================================
// Data commands
// ============================================================================

#[derive(Args, Debug)]
pub struct BytesArgs {
    /// Byte threshold (non-negative integer)
    pub threshold: u64,
}

#[derive(Args, Debug)]
pub struct IpArgs {
    /// Source IP, matched exactly
    pub ip: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., api_host, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
