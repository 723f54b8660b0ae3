//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Raised when a global subscriber is already installed.
#[derive(Debug, Error)]
#[error("tracing init failed: {message}")]
pub struct TelemetryInitError {
    message: String,
}

/// Install a JSON formatter filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns [`TelemetryInitError`] when a global subscriber already exists.
/// Callers typically log and continue.
pub fn init_tracing() -> Result<(), TelemetryInitError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
        .map_err(|error| TelemetryInitError {
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_install_reports_error() {
        let _first = init_tracing();
        let error = init_tracing().expect_err("subscriber already installed");
        assert!(error.to_string().starts_with("tracing init failed"));
    }
}
