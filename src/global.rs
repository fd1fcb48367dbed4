//! Process-wide default logger
//!
//! A thin wrapper over one installed [`Logger`]. Every free function is a
//! no-op until [`init`] has succeeded and after [`cleanup`].

use crate::core::logger::Message;
use crate::core::{Arg, Config, LogLevel, Logger, Result};
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Install a new default logger, cleaning up the previous one first
pub fn init(config: Config) -> Result<()> {
    let mut slot = DEFAULT.write();
    if let Some(previous) = slot.take() {
        if let Err(e) = previous.cleanup() {
            eprintln!("[LOGGER WARNING] Failed to clean up previous default logger: {}", e);
        }
    }
    *slot = Some(Arc::new(Logger::new(config)?));
    Ok(())
}

/// Same as [`init`]
pub fn set_config(config: Config) -> Result<()> {
    init(config)
}

/// Remove the default logger and close its files
pub fn cleanup() -> Result<()> {
    let previous = DEFAULT.write().take();
    match previous {
        Some(logger) => logger.cleanup(),
        None => Ok(()),
    }
}

pub fn flush() -> Result<()> {
    match default_logger() {
        Some(logger) => logger.flush(),
        None => Ok(()),
    }
}

pub fn is_initialized() -> bool {
    DEFAULT.read().is_some()
}

/// Configuration of the default logger
pub fn config() -> Option<Config> {
    DEFAULT.read().as_ref().map(|logger| logger.config().clone())
}

/// Shared handle to the default logger
pub fn default_logger() -> Option<Arc<Logger>> {
    DEFAULT.read().clone()
}

/// Log joined arguments at `level` through the default logger
#[inline(never)]
#[track_caller]
pub fn log(level: LogLevel, args: &[Arg<'_>], silent: bool) {
    if let Some(logger) = default_logger() {
        logger.emit(level, Message::Join(args), silent);
    }
}

/// Log a template at `level` through the default logger
#[inline(never)]
#[track_caller]
pub fn logf(level: LogLevel, template: &str, args: &[Arg<'_>], silent: bool) {
    if let Some(logger) = default_logger() {
        logger.emit(level, Message::Template(template, args), silent);
    }
}

macro_rules! level_functions {
    ($($level:ident => $join:ident, $silent:ident, $template:ident;)+) => {
        $(
            #[doc = concat!("Log at `", stringify!($level), "` level through the default logger")]
            #[inline(never)]
            #[track_caller]
            pub fn $join(args: &[Arg<'_>]) {
                if let Some(logger) = default_logger() {
                    logger.emit(LogLevel::$level, Message::Join(args), false);
                }
            }

            #[inline(never)]
            #[track_caller]
            pub fn $silent(args: &[Arg<'_>]) {
                if let Some(logger) = default_logger() {
                    logger.emit(LogLevel::$level, Message::Join(args), true);
                }
            }

            #[inline(never)]
            #[track_caller]
            pub fn $template(template: &str, args: &[Arg<'_>]) {
                if let Some(logger) = default_logger() {
                    logger.emit(LogLevel::$level, Message::Template(template, args), false);
                }
            }
        )+
    };
}

level_functions! {
    Panic => panic, spanic, panicf;
    Error => error, serror, errorf;
    Warn => warn, swarn, warnf;
    Info => info, sinfo, infof;
    Debug => debug, sdebug, debugf;
    Success => success, ssuccess, successf;
}
