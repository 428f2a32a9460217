//! The process-wide logger behind the `log` facade.
//!
//! `log` accepts a single logger for the life of the process. The first
//! bootstrap installs [`ReloadableLogger`]; every bootstrap, including the
//! first, swaps the `env_logger` instance it forwards to.

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};

use env_logger::Logger;
use log::{Log, Metadata, Record};

use super::LoggingError;

struct ReloadableLogger {
    active: RwLock<Option<Logger>>,
}

impl ReloadableLogger {
    fn active(&self) -> RwLockReadGuard<'_, Option<Logger>> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Log for ReloadableLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.active()
            .as_ref()
            .is_some_and(|logger| logger.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if let Some(logger) = self.active().as_ref() {
            logger.log(record);
        }
    }

    fn flush(&self) {
        if let Some(logger) = self.active().as_ref() {
            logger.flush();
        }
    }
}

static LOGGER: ReloadableLogger = ReloadableLogger {
    active: RwLock::new(None),
};

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Makes `logger` the active logger and raises or lowers the global max
/// level to match it.
pub(super) fn install(logger: Logger) -> Result<(), LoggingError> {
    let installed = *INSTALLED.get_or_init(|| log::set_logger(&LOGGER).is_ok());
    if !installed {
        return Err(LoggingError::ForeignLogger);
    }

    let max_level = logger.filter();
    *LOGGER.active.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    log::set_max_level(max_level);

    Ok(())
}
