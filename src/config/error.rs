use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("`{0}` not defined")]
    MissingOption(&'static str),

    #[error("invalid value for `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("failed to decode source options: {0}")]
    InvalidOptions(#[from] toml::de::Error),

    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: ini::ParseError,
    },

    #[error("config file '{0}' has entries before the first section header")]
    MissingSectionHeader(PathBuf),

    #[error("config file '{path}' defines section [{section}] more than once")]
    DuplicateSection { path: PathBuf, section: String },

    #[error("config file '{path}' defines `{key}` more than once in section [{section}]")]
    DuplicateKey {
        path: PathBuf,
        section: String,
        key: String,
    },

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("key `{key}` not found in section [{section}]")]
    KeyNotFound { section: String, key: String },
}
