use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::serde_utils::serialize_attributes_as_map;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Instant with nanosecond resolution, counted from the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Returns `None` when the value does not fit in the nanosecond range.
    pub fn from_unix_seconds(seconds: u64) -> Option<Self> {
        seconds.checked_mul(NANOS_PER_SECOND).map(Self)
    }

    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0).ok().map(DateTime::from_timestamp_nanos)
    }
}

/// String-valued attributes with unique keys.
///
/// Insertion order is kept for stable output, but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value stored under `key`.
    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_attributes_as_map(&self.0, serializer)
    }
}

/// A single decoded flow record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Unset when the line carried no usable `end` value
    #[serde(rename = "time_unix_nano", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,

    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub attributes: Attributes,
}

/// Producer identity of the records in a scope group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub name: String,
    pub version: String,
}

impl Scope {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeLogs {
    pub scope: Scope,
    pub log_records: Vec<LogRecord>,
}

impl ScopeLogs {
    pub fn append(&mut self, record: LogRecord) {
        self.log_records.push(record);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceLogs {
    pub resource: Resource,
    pub scope_logs: Vec<ScopeLogs>,
}

impl ResourceLogs {
    /// Append an empty scope group and hand it back for population.
    pub fn append_scope_logs(&mut self) -> &mut ScopeLogs {
        self.scope_logs.push(ScopeLogs::default());
        let last = self.scope_logs.len() - 1;
        &mut self.scope_logs[last]
    }
}

/// Root of a decoded corpus. Owned by the caller once a decode returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Logs {
    pub resource_logs: Vec<ResourceLogs>,
}

impl Logs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_resource_logs(&mut self) -> &mut ResourceLogs {
        self.resource_logs.push(ResourceLogs::default());
        let last = self.resource_logs.len() - 1;
        &mut self.resource_logs[last]
    }

    /// Every record of the corpus, in decode order.
    pub fn log_records(&self) -> impl Iterator<Item = &LogRecord> {
        self.resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .flat_map(|sl| sl.log_records.iter())
    }

    pub fn log_record_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .map(|sl| sl.log_records.len())
            .sum()
    }
}
