pub mod config;
mod error;
pub mod logging;

pub use config::{
    ConfigError, ConfigFactory, ConfigSource, EnvConfig, EnvOptions, IniConfig, IniOptions,
    Section,
};
pub use error::Error;
pub use logging::{LoggingConfig, LoggingError};
