//! dnslog-api: HTTP query API over a static DNS traffic log.
//!
//! The dataset is loaded once at startup from a CSV source (URL or file)
//! and served read-only:
//!
//! - `GET /alldata` - every row
//! - `GET /uniqueip` - distinct source IPs
//! - `GET /data/{threshold}` - rows with more than `threshold` bytes
//! - `POST /data/ip` - rows for one IP, body `{"ip": "..."}`
//!
//! Tables are serialized column-oriented with rows re-indexed from zero.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod source;

// Re-exports for convenience.
pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::AppState;

/// Result type for dnslog-api operations.
pub type Result<T> = std::result::Result<T, ServerError>;
