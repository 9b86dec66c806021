//! Tracing subscriber bootstrap.

use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        /// Rejected directive.
        filter: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
}

/// Installs a formatting subscriber filtered by `filter`, for example
/// `"info"` or `"taskdesk=debug"`.
///
/// Only the first successful call installs anything. When another global
/// subscriber is already present it is left in place.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] when `filter` is not a valid
/// `EnvFilter` directive.
pub fn init_logging(filter: &str) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.to_owned(),
        source,
    })?;
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
    {
        tracing::debug!(error = %err, "global tracing subscriber already installed");
    }
    INSTALLED.get_or_init(|| ());
    Ok(())
}
