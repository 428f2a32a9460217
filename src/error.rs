use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level error type for the ini-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("unknown configuration source type: {0}")]
    UnknownSourceType(String),
}
