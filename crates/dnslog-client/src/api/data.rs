//! Data query endpoints.

use crate::DnsLogClient;
use dnslog_core::{IpQuery, LogTable, Result, UniqueIps};

/// Data query endpoints
pub struct DataApi<'a> {
    client: &'a DnsLogClient,
}

impl<'a> DataApi<'a> {
    pub(crate) const fn new(client: &'a DnsLogClient) -> Self {
        Self { client }
    }

    /// Fetch the full dataset
    pub async fn all(&self) -> Result<LogTable> {
        self.client.get("/alldata").await
    }

    /// Fetch the distinct source IPs
    pub async fn unique_ips(&self) -> Result<UniqueIps> {
        self.client.get("/uniqueip").await
    }

    /// Fetch rows with more than `threshold` bytes
    pub async fn above(&self, threshold: u64) -> Result<LogTable> {
        self.client.get(&format!("/data/{threshold}")).await
    }

    /// Fetch rows whose IP equals `ip`
    pub async fn by_ip(&self, ip: &str) -> Result<LogTable> {
        self.client.post("/data/ip", &IpQuery::new(ip)).await
    }
}
