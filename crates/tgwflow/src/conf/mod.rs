//! Conf module — decoder configuration model, loading, and build identity.

pub mod model;
pub mod load;

pub use model::{BuildInfo, DecoderConfig, OutputFormat};
