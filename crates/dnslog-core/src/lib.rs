//! Core types and query operations for the DNS log analytics API.
//!
//! This crate provides the pieces shared by the API server and the dashboard:
//!
//! - **Dataset**: the immutable table of DNS log records, loaded once from CSV
//! - **Queries**: full dump, unique IPs, byte threshold and IP equality filters
//! - **Payloads**: the JSON wire types exchanged over HTTP
//! - **Errors**: a single error enum, [`DnsLogError`]
//!
//! # Example
//!
//! ```rust
//! use dnslog_core::Dataset;
//!
//! let csv = ",IP,Bytes\n0,1.1.1.1,50000\n1,2.2.2.2,200000\n2,1.1.1.1,10\n";
//! let dataset = Dataset::from_csv_str(csv).unwrap();
//!
//! let big = dataset.above_threshold(100_000);
//! assert_eq!(big.len(), 1);
//! assert_eq!(dataset.unique_ips().uniqueips, vec!["1.1.1.1", "2.2.2.2"]);
//! ```

mod error;
mod loader;
pub mod query;
pub mod types;

pub use error::{DnsLogError, Result};
pub use query::parse_threshold;
pub use types::*;
