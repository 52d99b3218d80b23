//! Boot — logging init, config load, unmarshaler creation.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{BuildInfo, DecoderConfig};
use crate::unmarshaler::TgwFlowLogUnmarshaler;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout carries only decoded output.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tgwflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then build the unmarshaler.
///
/// Returns `(TgwFlowLogUnmarshaler, DecoderConfig)` on success.
pub fn boot() -> Result<(TgwFlowLogUnmarshaler, DecoderConfig), Box<dyn std::error::Error>> {
    let build_info = BuildInfo::current();
    info!("Starting {} v{}", build_info.command, build_info.version);

    let config = DecoderConfig::load()?;
    config.validate()?;
    info!(
        "Loaded configuration: file_format={}, output={:?}",
        config.file_format, config.output
    );

    let unmarshaler = TgwFlowLogUnmarshaler::new(&config, build_info);
    Ok((unmarshaler, config))
}
