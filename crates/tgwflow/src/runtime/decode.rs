//! Decode — runs the unmarshaler over CLI inputs.

use std::fs::File;
use std::io::{self, Read, Write};

use tracing::{error, info};

use super::output::write_logs;
use crate::conf::OutputFormat;
use crate::parser::AwsLogsUnmarshaler;

/// Decode every path in `inputs` (stdin when empty) and write the results to stdout.
///
/// A failing input is logged and does not stop the remaining ones; the
/// overall result reports how many failed.
pub fn run(
    unmarshaler: &dyn AwsLogsUnmarshaler,
    output: OutputFormat,
    inputs: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if inputs.is_empty() {
        let records = decode_into(unmarshaler, &mut io::stdin().lock(), output, &mut out)?;
        info!("Decoded {} records from stdin", records);
        return Ok(());
    }

    let mut failures = 0usize;
    for path in inputs {
        let result = File::open(path)
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|mut file| decode_into(unmarshaler, &mut file, output, &mut out));
        match result {
            Ok(records) => info!("Decoded {} records from {}", records, path),
            Err(e) => {
                error!("Failed to decode {}: {}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} inputs failed to decode", failures, inputs.len()).into());
    }
    Ok(())
}

/// Decode one input and render it, returning the number of records.
pub fn decode_into<W: Write>(
    unmarshaler: &dyn AwsLogsUnmarshaler,
    reader: &mut dyn Read,
    output: OutputFormat,
    out: &mut W,
) -> Result<usize, Box<dyn std::error::Error>> {
    let logs = unmarshaler.unmarshal_aws_logs(reader)?;
    write_logs(out, &logs, output)?;
    Ok(logs.log_record_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{BuildInfo, DecoderConfig};
    use crate::unmarshaler::TgwFlowLogUnmarshaler;

    fn unmarshaler(file_format: &str) -> TgwFlowLogUnmarshaler {
        let config = DecoderConfig {
            file_format: file_format.to_string(),
            ..DecoderConfig::default()
        };
        TgwFlowLogUnmarshaler::new(&config, BuildInfo::default())
    }

    #[test]
    fn test_decode_into_text() {
        let mut input: &[u8] = b"srcaddr end\n10.0.0.1 1700000000\n- -\n";
        let mut out = Vec::new();
        let records = decode_into(&unmarshaler("plain-text"), &mut input, OutputFormat::Text, &mut out).unwrap();

        assert_eq!(records, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "2023-11-14T22:13:20Z source.address=10.0.0.1\n-\n");
    }

    #[test]
    fn test_decode_into_reports_format_error() {
        let mut input: &[u8] = b"srcaddr\n10.0.0.1\n";
        let mut out = Vec::new();
        let err = decode_into(&unmarshaler("parquet"), &mut input, OutputFormat::Json, &mut out).unwrap_err();

        assert!(err.to_string().contains("not yet supported"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_counts_missing_files() {
        let inputs = vec!["/nonexistent/tgwflow/input.log".to_string()];
        let err = run(&unmarshaler("plain-text"), OutputFormat::Json, &inputs).unwrap_err();
        assert_eq!(err.to_string(), "1 of 1 inputs failed to decode");
    }
}
