//! API endpoint modules.

mod data;

pub use data::DataApi;
