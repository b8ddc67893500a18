use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::record::{integral_u64, BYTES_COLUMN, IP_COLUMN};
use crate::{DnsLogError, Result};

/// A decoded table payload as received by API consumers.
///
/// The wire form is column-oriented (`{"column": {"row": value}}`). Rows are
/// ordered by their numeric row key; cells missing from a column are `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl LogTable {
    /// Decode a table from a JSON value.
    ///
    /// Accepts either the column object itself or a JSON string containing
    /// it, since some servers encode the table twice.
    pub fn from_value(value: Value) -> Result<Self> {
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner)?,
            other => other,
        };

        let Value::Object(map) = value else {
            return Err(DnsLogError::Decode("expected an object of columns".into()));
        };

        let mut columns = Vec::with_capacity(map.len());
        let mut cells: Vec<BTreeMap<usize, Value>> = Vec::with_capacity(map.len());

        for (name, column) in map {
            let Value::Object(entries) = column else {
                return Err(DnsLogError::Decode(format!(
                    "column {name:?} is not an object"
                )));
            };

            let mut by_row = BTreeMap::new();
            for (key, cell) in entries {
                let index: usize = key.parse().map_err(|_| {
                    DnsLogError::Decode(format!("row key {key:?} in column {name:?} is not an index"))
                })?;
                by_row.insert(index, cell);
            }

            columns.push(name);
            cells.push(by_row);
        }

        let indices: BTreeSet<usize> = cells.iter().flat_map(|c| c.keys().copied()).collect();
        let rows = indices
            .into_iter()
            .map(|index| {
                cells
                    .iter_mut()
                    .map(|column| column.remove(&index).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Column names in payload order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row values, aligned with [`Self::columns`]
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the `Bytes` column that are non-negative integers
    #[must_use]
    pub fn bytes(&self) -> Vec<u64> {
        let Some(col) = self.column_index(BYTES_COLUMN) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| match row.get(col)? {
                Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral_u64)),
                _ => None,
            })
            .collect()
    }

    /// Values of the `IP` column
    #[must_use]
    pub fn ips(&self) -> Vec<&str> {
        let Some(col) = self.column_index(IP_COLUMN) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(col)?.as_str())
            .collect()
    }

    /// Render a cell as display text (`null` becomes empty)
    #[must_use]
    pub fn cell_text(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for LogTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for LogTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (col, name) in self.columns.iter().enumerate() {
            map.serialize_entry(
                name,
                &ColumnCells {
                    col,
                    rows: &self.rows,
                },
            )?;
        }
        map.end()
    }
}

struct ColumnCells<'a> {
    col: usize,
    rows: &'a [Vec<Value>],
}

impl Serialize for ColumnCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (index, row) in self.rows.iter().enumerate() {
            map.serialize_entry(&index.to_string(), row.get(self.col).unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}
