//! Logs module — the decoded corpus: resource, scope and record hierarchy.

pub mod model;
mod serde_utils;

pub use model::{Attributes, LogRecord, Logs, Resource, ResourceLogs, Scope, ScopeLogs, Timestamp};
