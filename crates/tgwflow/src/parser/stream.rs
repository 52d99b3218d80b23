use std::io::{BufRead, Read};
use std::iter::FusedIterator;

use tracing::{debug, warn};

use super::line::{decode_line, Header};
use super::model::DecodeError;
use super::{FORMAT_IDENTIFICATION_TAG, FORMAT_TGW_FLOW_LOG, MAX_LINE_SIZE};
use crate::conf::BuildInfo;
use crate::logs::{Logs, Scope};

/// Single-pass iterator over the raw lines of a reader.
///
/// Strips the `\n` terminator and a trailing `\r`, including on a last line
/// that has no `\n`. Invalid UTF-8 is replaced rather than rejected. Yields
/// at most one error, after which it is exhausted.
pub struct RawLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    max_line_size: usize,
    finished: bool,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_line_size(reader, MAX_LINE_SIZE)
    }

    pub fn with_max_line_size(reader: R, max_line_size: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
            max_line_size,
            finished: false,
        }
    }

    /// Number of lines yielded so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = Result<String, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.buf.clear();
        // Room for the longest allowed line plus "\r\n".
        let limit = self.max_line_size as u64 + 2;
        match (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                // A final line without "\n" may still end in "\r".
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
                if self.buf.len() > self.max_line_size {
                    self.finished = true;
                    return Some(Err(DecodeError::LineTooLarge(
                        self.line_number,
                        self.max_line_size,
                    )));
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(DecodeError::Io(e)))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for RawLines<R> {}

/// Decode a plain-text Transit Gateway flow log stream.
///
/// The first line is the header; every following non-blank line becomes one
/// record. An empty stream yields a corpus without records. Only read
/// failures and over-long lines are returned as errors, and are logged at
/// warn level before the decode is abandoned.
///
/// Invalid UTF-8 is replaced with U+FFFD, so attribute values are always
/// valid strings rather than the raw bytes of the input.
pub fn decode_plain_text<R: BufRead>(reader: R, build_info: &BuildInfo) -> Result<Logs, DecodeError> {
    let mut logs = Logs::new();
    let resource_logs = logs.append_resource_logs();
    resource_logs
        .resource
        .attributes
        .put_str(FORMAT_IDENTIFICATION_TAG, FORMAT_TGW_FLOW_LOG);
    let scope_logs = resource_logs.append_scope_logs();
    scope_logs.scope = Scope::new(&build_info.command, &build_info.version);

    let mut lines = RawLines::new(reader);

    let header = match lines.next() {
        Some(Ok(line)) => Header::parse(&line),
        Some(Err(e)) => {
            warn!(line = 1, "Abandoned Transit Gateway flow log decode reading header: {}", e);
            return Err(e);
        }
        None => {
            debug!("Empty Transit Gateway flow log stream");
            return Ok(logs);
        }
    };

    let mut skipped = 0usize;
    while let Some(line) = lines.next() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    line = lines.line_number(),
                    records = scope_logs.log_records.len(),
                    "Abandoned Transit Gateway flow log decode: {}",
                    e
                );
                return Err(e);
            }
        };
        if line.trim().is_empty() {
            skipped += 1;
            continue;
        }
        scope_logs.append(decode_line(&header, &line));
    }

    debug!(
        fields = header.len(),
        records = scope_logs.log_records.len(),
        skipped,
        lines = lines.line_number(),
        "Decoded Transit Gateway flow log stream"
    );

    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor};
    use std::sync::{Arc, Mutex};

    fn build_info() -> BuildInfo {
        BuildInfo::new("tgwflow-test", "1.2.3")
    }

    fn decode(input: &str) -> Logs {
        decode_plain_text(Cursor::new(input), &build_info()).unwrap()
    }

    /// Serves `data` and then fails every read.
    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream truncated"));
            }
            Ok(n)
        }
    }

    /// Collects formatted tracing output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn decode_with_logs<R: BufRead>(reader: R) -> (Result<Logs, DecodeError>, String) {
        let captured = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || {
            decode_plain_text(reader, &build_info())
        });
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (result, output)
    }

    #[test]
    fn test_raw_lines_strip_terminators() {
        let lines: Vec<String> = RawLines::new(Cursor::new("a b\r\nc d\n\ne"))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["a b", "c d", "", "e"]);
    }

    #[test]
    fn test_raw_lines_strip_cr_without_final_newline() {
        let lines: Vec<String> = RawLines::new(Cursor::new("a b\r\nc d\r"))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["a b", "c d"]);
    }

    #[test]
    fn test_crlf_last_line_without_newline_keeps_timestamp() {
        let logs = decode("srcaddr end\r\n10.0.0.1 1700000000\r");
        let record = logs.log_records().next().unwrap();
        assert_eq!(
            record.timestamp.map(|ts| ts.as_nanos()),
            Some(1_700_000_000_000_000_000)
        );

        let logs = decode("end srcaddr\r\n1700000000 10.0.0.1\r");
        let record = logs.log_records().next().unwrap();
        assert_eq!(record.attributes.get("source.address"), Some("10.0.0.1"));
    }

    #[test]
    fn test_too_large_data_line_aborts_decode() {
        let long = "x".repeat(MAX_LINE_SIZE + 1);
        let input = format!("srcaddr\n10.0.0.1\n{long}\n10.0.0.2\n");
        let err = decode_plain_text(Cursor::new(input), &build_info()).unwrap_err();
        assert!(matches!(err, DecodeError::LineTooLarge(3, MAX_LINE_SIZE)));
    }

    #[test]
    fn test_abandoned_data_line_is_logged() {
        let long = "x".repeat(MAX_LINE_SIZE + 1);
        let input = format!("srcaddr\n10.0.0.1\n{long}\n");
        let (result, output) = decode_with_logs(Cursor::new(input));

        assert!(matches!(result, Err(DecodeError::LineTooLarge(3, _))));
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("Abandoned Transit Gateway flow log decode"));
        assert!(output.contains("line=3"));
        assert!(output.contains("records=1"));
    }

    #[test]
    fn test_abandoned_header_is_logged() {
        let reader = BufReader::new(FailAfter {
            data: Cursor::new(Vec::new()),
        });
        let (result, output) = decode_with_logs(reader);

        assert!(matches!(result, Err(DecodeError::Io(_))));
        assert!(output.contains("WARN"), "output: {output}");
        assert!(output.contains("reading header"));
        assert!(output.contains("line=1"));
        assert!(output.contains("stream truncated"));
    }

    #[test]
    fn test_successful_decode_logs_no_warning() {
        let (result, output) = decode_with_logs(Cursor::new("srcaddr\n10.0.0.1\n"));
        assert_eq!(result.unwrap().log_record_count(), 1);
        assert!(output.is_empty(), "output: {output}");
    }

    #[test]
    fn test_raw_lines_lossy_utf8() {
        let lines: Vec<String> = RawLines::new(Cursor::new(b"ok \xFF\n".to_vec()))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["ok \u{FFFD}"]);
    }

    #[test]
    fn test_raw_lines_size_limit() {
        let mut lines = RawLines::with_max_line_size(Cursor::new("1234\n12345\nabc\n"), 4);
        assert_eq!(lines.next().unwrap().unwrap(), "1234");
        assert!(matches!(lines.next(), Some(Err(DecodeError::LineTooLarge(2, 4)))));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_raw_lines_limit_excludes_crlf() {
        let lines: Vec<String> = RawLines::with_max_line_size(Cursor::new("1234\r\n"), 4)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["1234"]);
    }

    #[test]
    fn test_empty_stream() {
        let logs = decode("");
        assert_eq!(logs.log_record_count(), 0);
        assert_eq!(logs.resource_logs.len(), 1);
        assert_eq!(logs.resource_logs[0].scope_logs.len(), 1);
    }

    #[test]
    fn test_header_only() {
        assert_eq!(decode("srcaddr dstaddr\n").log_record_count(), 0);
        assert_eq!(decode("srcaddr dstaddr").log_record_count(), 0);
    }

    #[test]
    fn test_corpus_metadata() {
        let logs = decode("srcaddr\n10.0.0.1\n");
        let rl = &logs.resource_logs[0];
        assert_eq!(rl.resource.attributes.get("encoding.format"), Some("aws.tgwflow"));
        assert_eq!(rl.scope_logs[0].scope, Scope::new("tgwflow-test", "1.2.3"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let logs = decode("srcaddr dstport\n10.0.0.1 443\n   \n\t\n\n10.0.0.2 80\n");
        let records: Vec<_> = logs.log_records().collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attributes.get("source.address"), Some("10.0.0.1"));
        assert_eq!(records[1].attributes.get("source.address"), Some("10.0.0.2"));
        assert_eq!(records[1].attributes.get("destination.port"), Some("80"));
    }

    #[test]
    fn test_crlf_input() {
        let logs = decode("srcaddr end\r\n10.0.0.1 1700000000\r\n");
        let record = logs.log_records().next().unwrap();
        assert_eq!(
            record.timestamp.map(|ts| ts.as_nanos()),
            Some(1_700_000_000_000_000_000)
        );
    }

    #[test]
    fn test_sentinel_record_is_still_appended() {
        let logs = decode("a b c\n- - -\n");
        let records: Vec<_> = logs.log_records().collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].attributes.is_empty());
        assert_eq!(records[0].timestamp, None);
    }

    #[test]
    fn test_io_error_is_propagated() {
        let reader = BufReader::new(FailAfter {
            data: Cursor::new(b"srcaddr\n10.0.0.1\n".to_vec()),
        });
        let err = decode_plain_text(reader, &build_info()).unwrap_err();
        assert!(matches!(err, DecodeError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_io_error_on_header() {
        let reader = BufReader::new(FailAfter {
            data: Cursor::new(Vec::new()),
        });
        assert!(matches!(
            decode_plain_text(reader, &build_info()),
            Err(DecodeError::Io(_))
        ));
    }
}
