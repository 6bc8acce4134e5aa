//! Tracing setup for the demo binary.
//!
//! The filter resolves from `RUST_LOG` when set, otherwise from the
//! configured level. Development gets the default human-readable format;
//! everywhere else logs compact without ANSI codes.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppEnvironment, TelemetryConfig};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = resolve_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match environment {
        AppEnvironment::Development => builder.try_init(),
        AppEnvironment::Test | AppEnvironment::Production => builder
            .compact()
            .with_ansi(false)
            .with_target(false)
            .try_init(),
    }
    .map_err(TelemetryError::Subscriber)
}

fn resolve_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        value: config.log_level.clone(),
        source,
    })
}
