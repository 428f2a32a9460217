//! Logging bootstrap from the logging sections of an INI file.
//!
//! Loading an [`IniConfig`](crate::IniConfig) never changes logging state.
//! Installing a [`LoggingConfig`] is the explicit step that does, and it
//! affects the whole process: later installs replace earlier ones.

mod config;
mod error;
mod format;
mod install;

use std::path::Path;

use log::debug;

pub use config::{Handler, LoggingConfig, Output};
pub use error::LoggingError;
pub use format::{Template, DEFAULT_FORMAT};

use crate::{Error, IniConfig};

impl LoggingConfig {
    /// Installs this configuration as the process-wide logger.
    ///
    /// Fails with [`LoggingError::ForeignLogger`] if a logger not created by
    /// this crate already owns the `log` facade.
    pub fn install(&self) -> Result<(), LoggingError> {
        install::install(self.build_logger()?)?;

        if !self.ignored_handlers().is_empty() {
            debug!(
                "root handlers not attached to any output: {}",
                self.ignored_handlers().join(", ")
            );
        }
        Ok(())
    }
}

/// Reads the logging sections of the INI file at `path` and installs them.
///
/// `disable_existing` controls whether directives from `RUST_LOG` are
/// discarded (`true`) or layered over the file's (`false`).
pub fn init_from_file(path: impl AsRef<Path>, disable_existing: bool) -> Result<(), Error> {
    let config = IniConfig::open(path)?;
    LoggingConfig::from_ini(&config, disable_existing)?.install()?;
    Ok(())
}
