//! Command implementations.

pub mod config;
pub mod dashboard;
pub mod view;

use dnslog_client::{ClientConfig, DnsLogClient};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

use crate::output::{OutputFormat, ViewSettings};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Data service base URL
    pub api_host: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Per-request timeout
    pub timeout: Duration,

    /// Pretty rendering limits
    pub view: ViewSettings,
}

impl Context {
    /// Create a data service client for the configured host.
    pub fn client(&self) -> anyhow::Result<DnsLogClient> {
        let config = ClientConfig {
            api_host: self.api_host.clone(),
            timeout: self.timeout,
        };
        Ok(DnsLogClient::from_config(&config)?)
    }
}

/// Await `fut` behind a spinner on stderr (hidden when not a terminal).
pub async fn with_spinner<T>(message: &str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
