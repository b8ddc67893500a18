//! dnslog-dashboard - terminal dashboard for the DNS log analytics API.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dnslog_dashboard::run().await
}
