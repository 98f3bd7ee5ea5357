use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;
use crate::error::{AppError, AppResult};

/// Filter directives: `RUST_LOG` when set, otherwise the configured default.
pub fn filter_directives(config: &LoggingConfig, env_override: Option<String>) -> String {
    env_override
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.filter.clone())
}

/// Installs the global stderr subscriber. Later calls fail.
pub fn init(config: &LoggingConfig) -> AppResult<()> {
    let directives = filter_directives(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::builder()
        .parse(&directives)
        .map_err(|err| AppError::invalid_argument(format!("invalid log filter: {err}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|err| AppError::unsupported(format!("logging already initialized: {err}")))
}
