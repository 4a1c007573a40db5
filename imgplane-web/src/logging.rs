//! Browser console logging through `console_log`
use std::sync::Once;

use log::{Level, LevelFilter};

/// Logger configuration.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    pub level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the console logger once.
///
/// The logger itself accepts every level; the `log` max level does the
/// filtering, so [`set_level`] can raise or lower verbosity later.
/// Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if console_log::init_with_level(Level::Trace).is_ok() {
            set_level(config.level);
        }
        log::debug!("logging initialized");
    });
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
