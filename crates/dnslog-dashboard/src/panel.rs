//! Page panels. A failed fetch renders an error panel instead of the body,
//! so one broken request never takes the rest of the page down.

use colored::Colorize;
use dnslog_core::DnsLogError;
use std::fmt::Write;

/// Render a titled panel from a fetch result.
pub fn render<T>(
    title: &str,
    result: Result<T, DnsLogError>,
    body: impl FnOnce(&T) -> String,
) -> (String, Option<T>) {
    let mut out = heading(title);
    match result {
        Ok(value) => {
            out.push_str(&body(&value));
            (out, Some(value))
        }
        Err(err) => {
            tracing::warn!(panel = title, error = %err, "panel failed");
            out.push_str(&error_body(&err));
            (out, None)
        }
    }
}

/// Bold underlined section title followed by a blank line.
pub fn heading(title: &str) -> String {
    format!("\n{}\n", title.bold().underline())
}

/// Body shown in place of a panel whose request failed.
pub fn error_body(err: &DnsLogError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {} {}", "Error:".red().bold(), err);
    let hint = match err {
        DnsLogError::Connection(_) | DnsLogError::Timeout(_) => {
            Some("Is the data service running? Check API_HOST.")
        }
        DnsLogError::Json(_) | DnsLogError::Decode(_) => {
            Some("The data service returned a response this dashboard cannot read.")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        let _ = writeln!(out, "  {}", hint.dimmed());
    }
    out
}
