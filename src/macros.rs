//! Logging macros.
//!
//! The level macros take a logger and a comma-separated argument list and
//! build the [`Arg`](crate::Arg) slice in place. A trailing `; silent` keeps
//! the entry out of the console.
//!
//! # Examples
//!
//! ```no_run
//! use flog::{info, warn, Logger};
//!
//! let logger = Logger::builder().log_folder("/tmp/app").build()?;
//!
//! info!(logger, "server started");
//! info!(logger, "listening on port", 8080);
//! warn!(logger, "retry %d of %d", 3, 5);
//! info!(logger, "written to file only"; silent);
//! # Ok::<(), flog::LoggerError>(())
//! ```

/// Build an array of log arguments from ordinary values.
///
/// ```
/// use flog::{args, prepare, Arg};
///
/// let name = String::from("worker");
/// let args: [Arg<'_>; 3] = args![name, 7, 'x'];
/// assert_eq!(prepare(&args), "worker 7 x");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::AsArg::as_arg(&$arg)),*]
    };
}

/// Log at an explicit level.
///
/// ```no_run
/// # let logger = flog::Logger::builder().log_folder("/tmp/app").build().unwrap();
/// use flog::{log, LogLevel};
/// log!(logger, LogLevel::Info, "simple message");
/// log!(logger, LogLevel::Error, "error code:", 500; silent);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ ; silent) => {
        $logger.log($level, &$crate::args![$($arg),+], true)
    };
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, &$crate::args![$($arg),+], false)
    };
}

/// Log a panic-level message. Logging never unwinds.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Panic, $($rest)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($rest)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($rest)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log a success-level message.
#[macro_export]
macro_rules! success {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Success, $($rest)+)
    };
}
