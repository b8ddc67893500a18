use serde::{Deserialize, Serialize, Serializer};

/// Header name of the identifier column (source traffic IP)
pub const IP_COLUMN: &str = "IP";

/// Header name of the measure column (byte count)
pub const BYTES_COLUMN: &str = "Bytes";

/// A typed value from one of the non-core CSV columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer column
    Int(i64),
    /// Floating point column
    Float(f64),
    /// Free text column
    Text(String),
    /// Empty cell
    Null,
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Null => Ok(()),
        }
    }
}

/// One row of the DNS traffic log
#[derive(Debug, Clone, PartialEq)]
pub struct DnsLogRecord {
    /// Source traffic IP
    pub ip: String,

    /// Byte count
    pub bytes: u64,

    /// Remaining columns, aligned with [`Schema::extra_names`]
    pub extra: Vec<CellValue>,
}

impl DnsLogRecord {
    /// Create a record with no extra columns
    #[must_use]
    pub fn new(ip: impl Into<String>, bytes: u64) -> Self {
        Self {
            ip: ip.into(),
            bytes,
            extra: Vec::new(),
        }
    }

    /// Value of this record in the given column
    #[must_use]
    pub fn cell(&self, column: Column) -> Cell<'_> {
        match column {
            Column::Ip => Cell::Text(&self.ip),
            Column::Bytes => Cell::Count(self.bytes),
            Column::Extra(i) => self.extra.get(i).map_or(Cell::Null, Cell::Value),
        }
    }
}

/// Where a column's values live inside a [`DnsLogRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// The `IP` field
    Ip,
    /// The `Bytes` field
    Bytes,
    /// Position in [`DnsLogRecord::extra`]
    Extra(usize),
}

/// Borrowed view of a single cell, serialized as a plain JSON scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Count(u64),
    Value(&'a CellValue),
    Null,
}

impl Serialize for Cell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(v) => serializer.serialize_str(v),
            Self::Count(v) => serializer.serialize_u64(*v),
            Self::Value(v) => v.serialize(serializer),
            Self::Null => serializer.serialize_none(),
        }
    }
}

/// Column layout of the loaded CSV, in source header order (index column dropped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, Column)>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            columns: vec![
                (IP_COLUMN.to_string(), Column::Ip),
                (BYTES_COLUMN.to_string(), Column::Bytes),
            ],
        }
    }
}

impl Schema {
    pub(crate) const fn from_columns(columns: Vec<(String, Column)>) -> Self {
        Self { columns }
    }

    /// Iterate over column names and their record locations
    pub fn columns(&self) -> impl Iterator<Item = (&str, Column)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), *col))
    }

    /// All column names in header order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Names of the columns stored in [`DnsLogRecord::extra`]
    #[must_use]
    pub fn extra_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, col)| matches!(col, Column::Extra(_)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Convert an integral, non-negative float to `u64`
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn integral_u64(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}
