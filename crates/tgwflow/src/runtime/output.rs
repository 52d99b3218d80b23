//! Output — renders a decoded corpus for the CLI.

use std::io::{self, Write};

use chrono::SecondsFormat;

use crate::conf::OutputFormat;
use crate::logs::{LogRecord, Logs};

pub fn write_logs<W: Write>(out: &mut W, logs: &Logs, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, logs)?;
            writeln!(out)
        }
        OutputFormat::Text => {
            for record in logs.log_records() {
                writeln!(out, "{}", format_record(record))?;
            }
            Ok(())
        }
    }
}

/// `<rfc3339 timestamp | -> key=value ...`, keys sorted.
pub fn format_record(record: &LogRecord) -> String {
    let timestamp = record
        .timestamp
        .and_then(|ts| ts.to_datetime())
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_else(|| "-".to_string());

    let mut attrs: Vec<(&str, &str)> = record.attributes.iter().collect();
    attrs.sort_unstable_by_key(|(k, _)| *k);

    let mut line = timestamp;
    for (key, value) in attrs {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(value);
    }
    line
}
