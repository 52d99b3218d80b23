//! Load — config loading from file and environment variables.

use std::path::Path;
use std::fs::File;
use std::io::Read;

use super::model::{DecoderConfig, OutputFormat};
use crate::parser::FileFormat;

impl DecoderConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("TGWFLOW_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/tgwflow/decoder.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        if let Ok(format) = std::env::var("TGWFLOW_FILE_FORMAT") {
            config.file_format = format;
        }
        if let Some(output) = std::env::var("TGWFLOW_OUTPUT").ok().and_then(|s| OutputFormat::parse(&s)) {
            config.output = output;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Ok(Self::from_toml(&contents)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            file_format: std::env::var("TGWFLOW_FILE_FORMAT")
                .unwrap_or(defaults.file_format),
            output: std::env::var("TGWFLOW_OUTPUT")
                .ok()
                .and_then(|s| OutputFormat::parse(&s))
                .unwrap_or(defaults.output),
        }
    }

    /// Reject format names no decoder recognizes.
    ///
    /// `parquet` passes: it is a known format whose decoder reports itself
    /// as unsupported at decode time.
    pub fn validate(&self) -> Result<(), String> {
        FileFormat::parse(&self.file_format)
            .map(|_| ())
            .map_err(|e| format!("file_format: {}", e))
    }
}
