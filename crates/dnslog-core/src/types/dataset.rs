use serde::ser::{Serialize, SerializeMap, Serializer};

use super::record::{Column, DnsLogRecord, Schema};

/// The immutable DNS log table.
///
/// Built once at startup and only read afterwards. Query methods live in
/// [`crate::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<DnsLogRecord>,
}

impl Dataset {
    pub(crate) const fn new(schema: Schema, records: Vec<DnsLogRecord>) -> Self {
        Self { schema, records }
    }

    /// Build a dataset with only the `IP` and `Bytes` columns
    #[must_use]
    pub fn from_records(records: Vec<DnsLogRecord>) -> Self {
        Self::new(Schema::default(), records)
    }

    /// Column layout
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records in load order
    #[must_use]
    pub fn records(&self) -> &[DnsLogRecord] {
        &self.records
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A query result: borrowed rows that serialize re-indexed from zero.
///
/// Serializes column-oriented, `{"IP": {"0": "1.1.1.1", ...}, "Bytes": {...}}`.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    schema: &'a Schema,
    rows: Vec<&'a DnsLogRecord>,
}

impl<'a> TableView<'a> {
    pub(crate) const fn new(schema: &'a Schema, rows: Vec<&'a DnsLogRecord>) -> Self {
        Self { schema, rows }
    }

    /// Rows in result order; row `i` is serialized under key `"i"`
    #[must_use]
    pub fn rows(&self) -> &[&'a DnsLogRecord] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for TableView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schema.len()))?;
        for (name, column) in self.schema.columns() {
            map.serialize_entry(
                name,
                &ColumnValues {
                    column,
                    rows: &self.rows,
                },
            )?;
        }
        map.end()
    }
}

struct ColumnValues<'a> {
    column: Column,
    rows: &'a [&'a DnsLogRecord],
}

impl Serialize for ColumnValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (index, record) in self.rows.iter().enumerate() {
            map.serialize_entry(&index.to_string(), &record.cell(self.column))?;
        }
        map.end()
    }
}
