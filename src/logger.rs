//! Logging initialisation via tracing-subscriber.
//!
//! [`init`] runs once at startup, before settings are loaded, so warnings
//! raised while reading the environment are not lost. Once settings are known,
//! [`LogHandle::set_level`] swaps in the configured filter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::errors::AppError;

/// Handle for changing the active filter after startup
pub struct LogHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Replace the active filter; `RUST_LOG` still takes precedence
    pub fn set_level(&self, level: &str) -> Result<(), AppError> {
        let filter = build_filter(level)?;
        self.inner
            .reload(filter)
            .map_err(|e| AppError::Logger(format!("failed to reload filter: {e}")))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` is used when it is unset or invalid.
pub fn init(level: &str) -> Result<LogHandle, AppError> {
    let (filter, inner) = reload::Layer::new(build_filter(level)?);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(LogHandle { inner })
}

fn build_filter(level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels_build() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(build_filter(level).is_ok(), "expected '{level}' to be valid");
        }
    }

    #[test]
    fn test_init_then_set_level() {
        // Another test in the same process may have installed a subscriber first.
        match init("info") {
            Ok(handle) => assert!(handle.set_level("debug").is_ok()),
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
