//! Output formatting for different formats.

use clap::ValueEnum;
use colored::Colorize;
use dnslog_core::{LogTable, UniqueIps};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::chart;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables and charts
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Limits for pretty rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    /// Rows shown per table before truncating
    pub max_rows: usize,
    /// Length of the longest histogram bar
    pub histogram_width: usize,
    /// Histogram bins shown before truncating
    pub max_bins: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            max_rows: 50,
            histogram_width: 40,
            max_bins: 30,
        }
    }
}

/// Render a table with a header row, truncated to `max_rows`.
pub fn table_pretty(table: &LogTable, max_rows: usize) -> String {
    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(table.columns().iter().cloned());
    builder.push_record(header);

    for (i, row) in table.rows().iter().take(max_rows).enumerate() {
        let mut record = vec![i.to_string()];
        record.extend(row.iter().map(LogTable::cell_text));
        builder.push_record(record);
    }

    let mut out = builder.build().with(Style::rounded()).to_string();
    out.push('\n');
    if table.len() > max_rows {
        let _ = writeln!(
            out,
            "{}",
            format!("... and {} more rows", table.len() - max_rows).dimmed()
        );
    }
    out
}

/// Record count, table and Byte Distribution chart.
pub fn filtered_pretty(table: &LogTable, settings: ViewSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "Number of Records:".bold(),
        table.len().to_string().cyan().bold()
    );
    out.push_str(&table_pretty(table, settings.max_rows));
    out.push('\n');
    let bins = chart::histogram(&table.bytes());
    out.push_str(&chart::render(&bins, settings.histogram_width, settings.max_bins));
    out
}

/// Render the unique IP list as a one-column table.
pub fn unique_pretty(unique: &UniqueIps, max_rows: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(["uniqueips"]);
    for ip in unique.uniqueips.iter().take(max_rows) {
        builder.push_record([ip.as_str()]);
    }

    let mut out = builder.build().with(Style::rounded()).to_string();
    out.push('\n');
    if unique.uniqueips.len() > max_rows {
        let _ = writeln!(
            out,
            "{}",
            format!("... and {} more", unique.uniqueips.len() - max_rows).dimmed()
        );
    }
    out
}

/// Table as CSV, with a header row.
pub fn table_csv(table: &LogTable) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(LogTable::cell_text))?;
    }
    finish_csv(writer)
}

/// Unique IPs as single-column CSV.
pub fn unique_csv(unique: &UniqueIps) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["uniqueips"])?;
    for ip in &unique.uniqueips {
        writer.write_record([ip])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render a table payload in the requested format.
pub fn format_table(
    table: &LogTable,
    format: OutputFormat,
    settings: ViewSettings,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(table)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(table)?,
        OutputFormat::Csv => table_csv(table)?,
        OutputFormat::Pretty => filtered_pretty(table, settings),
    })
}

/// Render the unique IP payload in the requested format.
pub fn format_unique(
    unique: &UniqueIps,
    format: OutputFormat,
    settings: ViewSettings,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(unique)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(unique)?,
        OutputFormat::Csv => unique_csv(unique)?,
        OutputFormat::Pretty => unique_pretty(unique, settings.max_rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LogTable {
        LogTable::from_value(json!({
            "IP": {"0": "1.1.1.1", "1": "2.2.2.2", "2": "1.1.1.1"},
            "Bytes": {"0": 50000, "1": 200_000, "2": 10},
            "Domain": {"0": "a.example", "1": null, "2": "c.example"}
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_csv() {
        let csv = table_csv(&sample()).unwrap();
        assert_eq!(
            csv,
            "IP,Bytes,Domain\n1.1.1.1,50000,a.example\n2.2.2.2,200000,\n1.1.1.1,10,c.example\n"
        );
    }

    #[test]
    fn test_unique_csv() {
        let unique = UniqueIps {
            uniqueips: vec!["1.1.1.1".into(), "2.2.2.2".into()],
        };
        assert_eq!(unique_csv(&unique).unwrap(), "uniqueips\n1.1.1.1\n2.2.2.2\n");
    }

    #[test]
    fn test_table_pretty_truncates() {
        colored::control::set_override(false);
        let text = table_pretty(&sample(), 2);
        assert!(text.contains("2.2.2.2"));
        assert!(!text.contains("c.example"));
        assert!(text.contains("... and 1 more rows"));
    }

    #[test]
    fn test_filtered_pretty_has_count_and_chart() {
        colored::control::set_override(false);
        let text = filtered_pretty(&sample(), ViewSettings::default());
        assert!(text.contains("Number of Records: 3"));
        assert!(text.contains("Byte Distribution"));
        assert!(text.contains("200000"));
    }

    #[test]
    fn test_json_output_is_column_oriented() {
        let text = format_table(&sample(), OutputFormat::Json, ViewSettings::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Bytes"]["1"], 200_000);
    }
}
