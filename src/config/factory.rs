use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};
use toml::Table;

use super::env::EnvConfig;
use super::ini::IniConfig;
use super::options::{EnvOptions, IniOptions};
use super::source::ConfigSource;
use crate::{logging, Error};

/// Builds a configuration source from an option table.
pub type SourceConstructor = fn(&Table) -> Result<Box<dyn ConfigSource>, Error>;

/// Registry of configuration sources by type tag.
///
/// The default factory knows `"ini"` ([`IniConfig`]) and `"env"`
/// ([`EnvConfig`]).
///
/// ## Example
///
/// ```no_run
/// use ini_config::ConfigFactory;
///
/// let options: toml::Table = toml::from_str(r#"
///     ini_file = "app.ini"
///     ini_logging = true
/// "#)?;
///
/// let config = ConfigFactory::default().create("ini", &options)?;
/// let key = &config["TESTING"]["key"];
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct ConfigFactory {
    constructors: BTreeMap<String, SourceConstructor>,
}

impl ConfigFactory {
    /// Creates a factory with no registered sources.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registers `constructor` under `source_type`, replacing any previous one.
    pub fn register(
        &mut self,
        source_type: impl Into<String>,
        constructor: SourceConstructor,
    ) -> &mut Self {
        self.constructors.insert(source_type.into(), constructor);
        self
    }

    /// Creates the source registered under `source_type`.
    pub fn create(
        &self,
        source_type: &str,
        options: &Table,
    ) -> Result<Box<dyn ConfigSource>, Error> {
        let constructor = self
            .constructors
            .get(source_type)
            .ok_or_else(|| Error::UnknownSourceType(source_type.to_string()))?;

        debug!("creating {source_type} configuration source");
        constructor(options)
    }

    /// Registered type tags, sorted.
    pub fn source_types(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl fmt::Debug for ConfigFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFactory")
            .field("source_types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ConfigFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register("ini", create_ini).register("env", create_env);
        factory
    }
}

/// Loads an INI source, then runs the logging bootstrap if `ini_logging` is set.
///
/// The bootstrap reads the logging sections of the already parsed file,
/// without the prefix, and leaves the configuration untouched.
fn create_ini(options: &Table) -> Result<Box<dyn ConfigSource>, Error> {
    let options = IniOptions::from_table(options)?;
    let config = IniConfig::load(&options)?;

    if options.logging() {
        logging::LoggingConfig::from_ini(&config, options.logging_disable_existing())?
            .install()?;
        info!("logging configured from {}", config.path().display());
    }

    Ok(Box::new(config))
}

fn create_env(options: &Table) -> Result<Box<dyn ConfigSource>, Error> {
    let options = EnvOptions::from_table(options)?;
    Ok(Box::new(EnvConfig::load(&options)?))
}
