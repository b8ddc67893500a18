//! Read-only queries over the loaded [`Dataset`].
//!
//! Every query is a pure projection: the dataset is never modified and the
//! returned [`TableView`] re-indexes its rows from zero.

use std::collections::HashSet;

use crate::types::{Dataset, TableView, UniqueIps};
use crate::{DnsLogError, Result};

impl Dataset {
    /// Every row in load order
    #[must_use]
    pub fn all(&self) -> TableView<'_> {
        TableView::new(self.schema(), self.records().iter().collect())
    }

    /// Distinct IPs in first-seen order
    #[must_use]
    pub fn unique_ips(&self) -> UniqueIps {
        let mut seen = HashSet::new();
        let uniqueips = self
            .records()
            .iter()
            .filter(|r| seen.insert(r.ip.as_str()))
            .map(|r| r.ip.clone())
            .collect();
        UniqueIps { uniqueips }
    }

    /// Rows whose byte count strictly exceeds `threshold`
    #[must_use]
    pub fn above_threshold(&self, threshold: u64) -> TableView<'_> {
        TableView::new(
            self.schema(),
            self.records().iter().filter(|r| r.bytes > threshold).collect(),
        )
    }

    /// Rows whose IP equals `ip` exactly
    #[must_use]
    pub fn by_ip(&self, ip: &str) -> TableView<'_> {
        TableView::new(
            self.schema(),
            self.records().iter().filter(|r| r.ip == ip).collect(),
        )
    }
}

/// Parse a threshold path segment.
///
/// Only plain decimal digits that fit in a `u64` are accepted; signs,
/// whitespace and fractions are rejected.
pub fn parse_threshold(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DnsLogError::InvalidThreshold(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| DnsLogError::InvalidThreshold(raw.to_string()))
}
