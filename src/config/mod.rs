//! Configuration sources and the factory that creates them.

mod env;
mod error;
mod factory;
mod ini;
mod options;
mod section;
mod source;

pub use env::EnvConfig;
pub use error::ConfigError;
pub use factory::{ConfigFactory, SourceConstructor};
pub use ini::IniConfig;
pub use options::{EnvOptions, IniOptions};
pub use section::{Entries, Keys, Section};
pub use source::ConfigSource;
