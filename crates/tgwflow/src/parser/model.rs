use std::fmt;
use thiserror::Error;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileFormat {
    /// Space-separated text with a header line
    #[default]
    PlainText,
    /// Columnar export, reserved
    Parquet,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::PlainText => "plain-text",
            FileFormat::Parquet => "parquet",
        }
    }

    /// Resolve a configured format name. An empty name means plain text.
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        match value {
            "" | "plain-text" => Ok(FileFormat::PlainText),
            "parquet" => Ok(FileFormat::Parquet),
            other => Err(DecodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {0} too large (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("{0} format not yet supported for Transit Gateway flow logs")]
    NotYetSupported(FileFormat),

    #[error("unsupported file format {0:?}")]
    UnsupportedFormat(String),
}
