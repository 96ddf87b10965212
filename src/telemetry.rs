//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::BriefingError;
use crate::config::LoggingConfig;

/// Build the level filter: `RUST_LOG` if set, otherwise the configured level
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for JSON output.
pub fn init_tracing(config: &LoggingConfig) -> crate::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| BriefingError::config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
