//! Unmarshaler — picks the decoder for the configured file format.

use std::io::{BufReader, Read};

use crate::conf::{BuildInfo, DecoderConfig};
use crate::logs::Logs;
use crate::parser::{decode_plain_text, AwsLogsUnmarshaler, DecodeError, FileFormat};

/// Transit Gateway flow log unmarshaler.
#[derive(Debug, Clone)]
pub struct TgwFlowLogUnmarshaler {
    build_info: BuildInfo,
    file_format: String,
}

impl TgwFlowLogUnmarshaler {
    pub fn new(config: &DecoderConfig, build_info: BuildInfo) -> Self {
        let file_format = if config.file_format.is_empty() {
            FileFormat::PlainText.as_str().to_string()
        } else {
            config.file_format.clone()
        };

        Self {
            build_info,
            file_format,
        }
    }

    pub fn file_format(&self) -> &str {
        &self.file_format
    }
}

impl AwsLogsUnmarshaler for TgwFlowLogUnmarshaler {
    fn unmarshal_aws_logs(&self, reader: &mut dyn Read) -> Result<Logs, DecodeError> {
        match FileFormat::parse(&self.file_format)? {
            FileFormat::PlainText => decode_plain_text(BufReader::new(reader), &self.build_info),
            FileFormat::Parquet => Err(DecodeError::NotYetSupported(FileFormat::Parquet)),
        }
    }
}
