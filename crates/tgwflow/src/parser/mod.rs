/// Transit Gateway flow log decoding
///
/// Converts the plain-text flow log format (a space-separated header line
/// followed by positionally aligned records) into a [`Logs`](crate::logs::Logs)
/// corpus with semantic attribute names.
///
/// # Architecture
///
/// - `field_map.rs`: vendor field name → semantic attribute key
/// - `line.rs`: header resolution and per-line record decoding
/// - `stream.rs`: line iteration and corpus assembly
/// - `model.rs`: file formats and decode errors
/// - `traits.rs`: the unmarshaler seam used by the dispatcher
///
/// # Tolerance
///
/// Content problems never fail a decode. Unknown fields, `-` values,
/// malformed `end` timestamps and short lines are absorbed per field.
/// Only I/O failures (and over-long lines) abort a stream.

pub mod field_map;
pub mod line;
pub mod model;
pub mod stream;
pub mod traits;

pub use field_map::semantic_key;
pub use line::{decode_line, FieldKind, Header};
pub use model::{DecodeError, FileFormat};
pub use stream::{decode_plain_text, RawLines};
pub use traits::AwsLogsUnmarshaler;

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
pub const SENTINEL: &str = "-";
pub const START_ATTRIBUTE: &str = "aws.tgw.flow.start";
pub const FORMAT_IDENTIFICATION_TAG: &str = "encoding.format";
pub const FORMAT_TGW_FLOW_LOG: &str = "aws.tgwflow";
