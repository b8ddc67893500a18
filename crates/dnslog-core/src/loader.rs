//! CSV loading for the DNS log dataset.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::types::{integral_u64, CellValue, Column, Dataset, DnsLogRecord, Schema, BYTES_COLUMN, IP_COLUMN};
use crate::{DnsLogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        let mut present = cells.filter(|c| !c.trim().is_empty());
        if present.clone().all(|c| c.trim().parse::<i64>().is_ok()) {
            Self::Int
        } else if present.all(|c| c.trim().parse::<f64>().is_ok()) {
            Self::Float
        } else {
            Self::Text
        }
    }

    fn convert(self, raw: String) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match self {
            Self::Int => trimmed.parse().map_or(CellValue::Text(raw.clone()), CellValue::Int),
            Self::Float => trimmed.parse().map_or(CellValue::Text(raw.clone()), CellValue::Float),
            Self::Text => CellValue::Text(raw),
        }
    }
}

struct RawRow {
    ip: String,
    bytes: u64,
    extra: Vec<String>,
}

fn parse_bytes(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    cell.parse::<u64>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().and_then(integral_u64))
}

/// Rename repeated header names to `name.1`, `name.2`, ... so every column
/// key is unique. The first occurrence keeps its name.
fn dedupe_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    let raw: Vec<String> = raw.collect();
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

impl Dataset {
    /// Parse a dataset from CSV text.
    ///
    /// The first column is a row index and is discarded. `IP` and `Bytes`
    /// columns are required; every other column is kept with an inferred type.
    /// Repeated header names are suffixed (`IP`, `IP.1`), so the first `IP`
    /// column is the identifier.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let names = dedupe_names(rdr.headers()?.iter().skip(1).map(str::to_string));

        let ip_pos = names
            .iter()
            .position(|n| n == IP_COLUMN)
            .ok_or_else(|| DnsLogError::MissingColumn(IP_COLUMN.to_string()))?;
        let bytes_pos = names
            .iter()
            .position(|n| n == BYTES_COLUMN)
            .ok_or_else(|| DnsLogError::MissingColumn(BYTES_COLUMN.to_string()))?;

        let mut columns = Vec::with_capacity(names.len());
        let mut extra_positions = Vec::new();
        for (pos, name) in names.iter().enumerate() {
            let column = if pos == ip_pos {
                Column::Ip
            } else if pos == bytes_pos {
                Column::Bytes
            } else {
                extra_positions.push(pos);
                Column::Extra(extra_positions.len() - 1)
            };
            columns.push((name.clone(), column));
        }

        let mut raw_rows = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let fields: Vec<&str> = record.iter().skip(1).collect();

            let bytes_cell = fields[bytes_pos];
            let bytes = parse_bytes(bytes_cell).ok_or_else(|| DnsLogError::InvalidValue {
                row,
                column: BYTES_COLUMN.to_string(),
                value: bytes_cell.to_string(),
            })?;

            raw_rows.push(RawRow {
                ip: fields[ip_pos].to_string(),
                bytes,
                extra: extra_positions.iter().map(|&p| fields[p].to_string()).collect(),
            });
        }

        let kinds: Vec<ColumnKind> = (0..extra_positions.len())
            .map(|j| ColumnKind::infer(raw_rows.iter().map(move |r| r.extra[j].as_str())))
            .collect();

        let records = raw_rows
            .into_iter()
            .map(|raw| DnsLogRecord {
                ip: raw.ip,
                bytes: raw.bytes,
                extra: raw
                    .extra
                    .into_iter()
                    .zip(&kinds)
                    .map(|(cell, kind)| kind.convert(cell))
                    .collect(),
            })
            .collect();

        Ok(Self::new(Schema::from_columns(columns), records))
    }

    /// Parse a dataset from an in-memory CSV string
    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Self::from_csv_reader(csv.as_bytes())
    }

    /// Load a dataset from a CSV file on disk
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| DnsLogError::Source(format!("{}: {e}", path.display())))?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
,Date,IP,Bytes,Domain,Latency
0,2022-02-01,10.0.0.1,50000,example.com,1.5
1,2022-02-01,10.0.0.2,200000,example.org,2
2,2022-02-02,10.0.0.1,10,,0.25
";

    #[test]
    fn test_load_with_extra_columns() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(
            dataset.schema().names(),
            vec!["Date", "IP", "Bytes", "Domain", "Latency"]
        );
        assert_eq!(dataset.schema().extra_names(), vec!["Date", "Domain", "Latency"]);

        let first = &dataset.records()[0];
        assert_eq!(first.ip, "10.0.0.1");
        assert_eq!(first.bytes, 50000);
        assert_eq!(first.extra[0], CellValue::Text("2022-02-01".into()));
        assert_eq!(first.extra[2], CellValue::Float(1.5));

        // Empty cell becomes null, the rest of the column keeps its type
        assert_eq!(dataset.records()[2].extra[1], CellValue::Null);
        assert_eq!(dataset.records()[1].extra[2], CellValue::Float(2.0));
    }

    #[test]
    fn test_integer_column_inferred() {
        let csv = ",IP,Bytes,Port\n0,a,1,53\n1,b,2,5353\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.records()[1].extra[0], CellValue::Int(5353));
    }

    #[test]
    fn test_integral_float_bytes_accepted() {
        let csv = ",IP,Bytes\n0,a,512.0\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.records()[0].bytes, 512);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let dataset = Dataset::from_csv_str(",IP,Bytes\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.schema().names(), vec!["IP", "Bytes"]);
    }

    #[test]
    fn test_leading_bom() {
        let dataset = Dataset::from_csv_str("\u{feff},IP,Bytes\n0,a,1\n").unwrap();
        assert_eq!(dataset.schema().names(), vec!["IP", "Bytes"]);
        assert_eq!(dataset.records()[0].bytes, 1);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let dataset = Dataset::from_csv_str(",IP,Bytes,IP,IP.1,IP\n0,1.1.1.1,5,other,x,y\n").unwrap();
        assert_eq!(
            dataset.schema().names(),
            vec!["IP", "Bytes", "IP.1", "IP.1.1", "IP.2"]
        );
        assert_eq!(dataset.records()[0].ip, "1.1.1.1");

        let all = serde_json::to_value(dataset.all()).unwrap();
        assert_eq!(all["IP"]["0"], "1.1.1.1");
        assert_eq!(all["IP.1"]["0"], "other");
        assert_eq!(dataset.unique_ips().uniqueips, vec!["1.1.1.1"]);
    }

    #[test]
    fn test_missing_column() {
        let err = Dataset::from_csv_str(",IP,Size\n0,a,1\n").unwrap_err();
        assert!(matches!(err, DnsLogError::MissingColumn(ref c) if c == "Bytes"));

        // The first column is the index, so an IP there does not count
        let err = Dataset::from_csv_str("IP,Bytes\na,1\n").unwrap_err();
        assert!(matches!(err, DnsLogError::MissingColumn(ref c) if c == "IP"));
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let err = Dataset::from_csv_str(",ip,Bytes\n0,a,1\n").unwrap_err();
        assert!(matches!(err, DnsLogError::MissingColumn(_)));
    }

    #[test]
    fn test_invalid_bytes() {
        for bad in ["abc", "-5", "1.5", ""] {
            let csv = format!(",IP,Bytes\n0,a,1\n1,b,{bad}\n");
            let err = Dataset::from_csv_str(&csv).unwrap_err();
            assert!(
                matches!(err, DnsLogError::InvalidValue { row: 1, .. }),
                "{bad:?} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = Dataset::from_csv_str(",IP,Bytes\n0,a,1,extra\n").unwrap_err();
        assert!(matches!(err, DnsLogError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_csv_path(Path::new("/nonexistent/logs.csv")).unwrap_err();
        assert!(matches!(err, DnsLogError::Source(ref m) if m.contains("/nonexistent/logs.csv")));
    }
}
