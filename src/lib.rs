//! # flog
//!
//! A buffered, multi-level file logger. Every level writes to its own file,
//! every line records the calling function and line number, and a background
//! thread flushes the buffers once a second.
//!
//! ## Features
//!
//! - **Per-level files**: `<folder>/logs/<level>/<prefix>log_<level>_<nanos>.log`
//! - **Call sites**: `[12:00:00.000] [my_app::handler → 42]: message`
//! - **Two message styles**: space-joined (or printf-style) arguments and
//!   indexed templates (`"!1 took !2ms"`)
//! - **Console echo**: colored level tags, suppressible per call
//! - **Explicit handles**: a [`Logger`] value, plus an optional process-wide
//!   default behind free functions
//!
//! ## Example
//!
//! ```no_run
//! use flog::{args, Config, Logger};
//!
//! let logger = Logger::new(Config::default().with_log_folder("/tmp/my_app"))?;
//! logger.info(&args!["started with", 4, "workers"]);
//! logger.successf("!1 finished in !2ms", &args!["job", 118]);
//! logger.cleanup()?;
//! # Ok::<(), flog::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Arg, AsArg, Colors, Config, LogLevel, Logger, LoggerBuilder, LoggerError, Result, Rgb,
    };
    pub use crate::{args, debug_arg, display_arg, error_arg};
}

pub use appenders::{ConsoleEmitter, SinkSet};
pub use core::{
    debug_arg, display_arg, error_arg, format_template, prepare, Arg, AsArg, CallerInfo,
    CallerResolver, Colors, Config, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    Result, Rgb,
};
pub use global::{
    cleanup, config, debug, debugf, default_logger, error, errorf, flush, info, infof, init,
    is_initialized, log, logf, panic, panicf, sdebug, serror, set_config, sinfo, spanic,
    ssuccess, success, successf, swarn, warn, warnf,
};
