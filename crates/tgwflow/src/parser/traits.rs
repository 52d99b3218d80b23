use std::io::Read;

pub use super::model::{DecodeError, FileFormat};
pub use crate::logs::Logs;

pub trait AwsLogsUnmarshaler: Send + Sync {
    /// decode a complete, already decompressed object into a corpus
    fn unmarshal_aws_logs(&self, reader: &mut dyn Read) -> Result<Logs, DecodeError>;
}
