use thiserror::Error;

/// Result type alias for DNS log operations
pub type Result<T> = std::result::Result<T, DnsLogError>;

/// Errors that can occur loading, querying or fetching the DNS log dataset
#[derive(Error, Debug)]
pub enum DnsLogError {
    /// Dataset source could not be reached or read
    #[error("dataset source unavailable: {0}")]
    Source(String),

    /// CSV could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be converted to the column's type
    #[error("invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        /// Zero-based data row (header excluded)
        row: usize,
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
    },

    /// Threshold was not a non-negative integer
    #[error("invalid threshold: {0:?} is not a non-negative integer")]
    InvalidThreshold(String),

    /// A table payload did not have the column-oriented shape
    #[error("malformed table payload: {0}")]
    Decode(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DnsLogError::InvalidValue {
            row: 2,
            column: "Bytes".into(),
            value: "-5".into(),
        };
        assert_eq!(err.to_string(), r#"invalid value "-5" in column Bytes at row 2"#);
        assert_eq!(
            DnsLogError::InvalidThreshold("abc".into()).to_string(),
            r#"invalid threshold: "abc" is not a non-negative integer"#
        );
        let api = DnsLogError::Api {
            code: 500,
            message: "boom".into(),
        };
        assert_eq!(api.to_string(), "API error (500): boom");
    }
}
