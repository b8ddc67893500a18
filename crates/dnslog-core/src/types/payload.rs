use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /uniqueip`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIps {
    /// Distinct source IPs in first-seen order
    pub uniqueips: Vec<String>,
}

/// Request body of `POST /data/ip`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpQuery {
    /// IP to match exactly
    pub ip: String,
}

impl IpQuery {
    /// Create a query for the given IP
    #[must_use]
    pub fn new(ip: impl Into<String>) -> Self {
        Self { ip: ip.into() }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable reason
    pub detail: String,
}

/// A named group of endpoints, listed in the service index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointTag {
    /// Tag name
    pub name: String,
    /// What the endpoints under this tag return
    pub description: String,
}

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIndex {
    /// API title
    pub title: String,

    /// API description
    pub description: String,

    /// Server version
    pub version: String,

    /// Endpoint groups
    #[serde(default)]
    pub tags: Vec<EndpointTag>,

    /// Rows in the loaded dataset
    pub rows: usize,

    /// When the dataset was loaded
    pub loaded_at: DateTime<Utc>,
}

impl ServiceIndex {
    /// API title shown in the index
    pub const TITLE: &'static str = "DNS Analytics API";

    /// API description shown in the index
    pub const DESCRIPTION: &'static str = "API that serves a static DNS traffic log";

    /// Build the index for a dataset of `rows` rows loaded at `loaded_at`
    #[must_use]
    pub fn new(version: impl Into<String>, rows: usize, loaded_at: DateTime<Utc>) -> Self {
        let tag = |name: &str, description: &str| EndpointTag {
            name: name.to_string(),
            description: description.to_string(),
        };

        Self {
            title: Self::TITLE.to_string(),
            description: Self::DESCRIPTION.to_string(),
            version: version.into(),
            tags: vec![
                tag("alldata", "Get all data"),
                tag("uniqueip", "Get unique IPs"),
                tag("data", "Get subsets of data"),
            ],
            rows,
            loaded_at,
        }
    }
}
