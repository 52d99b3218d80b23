use super::field_map::semantic_key;
use super::{SENTINEL, START_ATTRIBUTE};
use crate::logs::{LogRecord, Timestamp};

/// How a header column is turned into record data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `end`: Unix seconds, becomes the record timestamp
    End,
    /// `start`: kept verbatim as an attribute
    Start,
    /// Known field stored under its semantic key
    Mapped(&'static str),
    /// Consumes its token, emits nothing
    Unknown,
}

impl FieldKind {
    pub fn resolve(name: &str) -> Self {
        match name {
            "end" => FieldKind::End,
            "start" => FieldKind::Start,
            other => semantic_key(other).map_or(FieldKind::Unknown, FieldKind::Mapped),
        }
    }
}

/// Column layout of a stream, taken from its first line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    kinds: Vec<FieldKind>,
}

impl Header {
    pub fn parse(line: &str) -> Self {
        let names: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let kinds = names.iter().map(|name| FieldKind::resolve(name)).collect();
        Self { names, kinds }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn kinds(&self) -> &[FieldKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Decode one data line against `header`.
///
/// Tokens are cut at single spaces and paired with header columns in order.
/// A line shorter than the header leaves the trailing columns unset; tokens
/// past the last column are ignored. Never fails: the worst outcome is a
/// record with no attributes and no timestamp.
pub fn decode_line(header: &Header, line: &str) -> LogRecord {
    let mut record = LogRecord::default();
    let mut rest = line;

    for kind in header.kinds() {
        if rest.is_empty() {
            break;
        }
        let (value, remainder) = rest.split_once(' ').unwrap_or((rest, ""));
        rest = remainder;

        if value == SENTINEL {
            continue;
        }

        match *kind {
            FieldKind::End => {
                if let Some(ts) = parse_unix_seconds(value) {
                    record.timestamp = Some(ts);
                }
            }
            FieldKind::Start => record.attributes.put_str(START_ATTRIBUTE, value),
            FieldKind::Mapped(key) => record.attributes.put_str(key, value),
            FieldKind::Unknown => {}
        }
    }

    record
}

/// Strict base-10 seconds. Any non-digit, an empty token or overflow yields `None`.
fn parse_unix_seconds(value: &str) -> Option<Timestamp> {
    if value.is_empty() {
        return None;
    }
    let mut seconds: u64 = 0;
    for b in value.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        seconds = seconds.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Timestamp::from_unix_seconds(seconds)
}
