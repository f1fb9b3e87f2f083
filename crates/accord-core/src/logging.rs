#![forbid(unsafe_code)]

//! Logging setup for binaries.
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! install a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`
//! (falling back to the supplied default directive).

/// Environment variable consulted for the filter directive.
pub const LOG_ENV: &str = "RUST_LOG";

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line (requires `logging-json`).
    Json,
}

/// Failure installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },
    /// JSON output was requested without the `logging-json` feature.
    #[error("JSON log output requires the `logging-json` feature")]
    JsonUnavailable,
    /// A global subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Install the global subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset or empty.
#[cfg(feature = "logging")]
pub fn init(default_directive: &str, format: LogFormat) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let directive = std::env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default_directive.to_owned());
    let filter = EnvFilter::try_new(&directive).map_err(|e| LoggingError::Filter {
        directive: directive.clone(),
        reason: e.to_string(),
    })?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder
            .try_init()
            .map_err(|_| LoggingError::AlreadyInstalled),
        #[cfg(feature = "logging-json")]
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|_| LoggingError::AlreadyInstalled),
        #[cfg(not(feature = "logging-json"))]
        LogFormat::Json => Err(LoggingError::JsonUnavailable),
    }
}

#[cfg(all(test, feature = "logging"))]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_is_reported() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        let err = init("accord=loud", LogFormat::Pretty).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { .. }));
    }
}
