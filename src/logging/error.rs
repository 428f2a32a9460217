use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("logging section [{0}] not found")]
    MissingSection(String),

    #[error("logging section [{section}] has no `{option}`")]
    MissingOption {
        section: String,
        option: &'static str,
    },

    #[error("invalid level `{level}` in logging section [{section}]")]
    InvalidLevel { section: String, level: String },

    #[error("unsupported handler class `{0}`")]
    UnsupportedHandler(String),

    #[error("invalid arguments for handler [{handler}]: {args}")]
    InvalidHandlerArgs { handler: String, args: String },

    #[error("invalid log format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    #[error("failed to open log file '{path}': {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("another logger is already installed")]
    ForeignLogger,
}
