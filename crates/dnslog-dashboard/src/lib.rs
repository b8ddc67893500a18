//! # dnslog-dashboard
//!
//! Terminal dashboard for the DNS log analytics API.
//!
//! ## Features
//!
//! - **Dashboard page**: unique IPs, full data table and a filtered view
//! - **Controls**: byte threshold slider and IP selector
//! - **Byte Distribution**: histogram of the `Bytes` column
//! - **Scripting**: one command per endpoint, in pretty, JSON, CSV or YAML

pub mod chart;
pub mod cli;
pub mod config;
pub mod controls;
pub mod output;
pub mod panel;

pub use cli::run;
