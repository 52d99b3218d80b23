use serde::{Deserialize, Serialize};

use crate::parser::FileFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// `plain-text` (default) or `parquet`; an empty value means plain text
    pub file_format: String,
    pub output: OutputFormat,
}

/// How the CLI renders a decoded corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            file_format: FileFormat::PlainText.as_str().to_string(),
            output: OutputFormat::default(),
        }
    }
}

/// Identity of the producer, attached to every decoded corpus as its scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub command: String,
    pub version: String,
}

impl BuildInfo {
    pub fn new(command: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            version: version.into(),
        }
    }

    /// Name and version of this crate.
    pub fn current() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
