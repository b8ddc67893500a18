//! HTTP client for the DNS log analytics API.
//!
//! This crate provides [`DnsLogClient`], used by the dashboard to call the
//! data service. Tables come back as [`dnslog_core::LogTable`].

mod client;
mod config;
pub mod api;

pub use client::{DnsLogClient, DnsLogClientBuilder};
pub use config::*;
pub use dnslog_core::{DnsLogError, Result};
