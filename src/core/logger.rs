//! Main logger implementation

use super::{
    buffer_pool::BufferPool,
    caller::{CallerInfo, CallerResolver},
    config::{Colors, Config},
    error::{LoggerError, Result},
    flush_daemon::{FlushDaemon, DEFAULT_FLUSH_INTERVAL},
    format::{self, Arg},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    timestamp,
};
use crate::appenders::{ConsoleEmitter, SinkSet};
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Frames between the resolver and the real call site: `emit`, then the
/// public entry point.
const CALLER_SKIP: usize = 2;

/// Write failures are reported on the first drop and then every this many
const DROP_ALERT_EVERY: u64 = 1000;

/// How the message of a call is built
pub(crate) enum Message<'a> {
    Join(&'a [Arg<'a>]),
    Template(&'a str, &'a [Arg<'a>]),
}

/// A buffered per-level file logger.
///
/// Building a logger creates one file per level and starts a flush thread.
/// [`Logger::cleanup`] (or dropping the logger) stops the thread and closes
/// the files; any call after that is a no-op.
///
/// # Example
///
/// ```no_run
/// use flog::{args, Logger};
///
/// let logger = Logger::builder().log_folder("/tmp/my_app").build()?;
/// logger.info(&args!["listening on port", 8080]);
/// logger.warnf("retry !1 of !2", &args![1, 3]);
/// logger.sinfo(&args!["file only"]);
/// logger.cleanup()?;
/// # Ok::<(), flog::LoggerError>(())
/// ```
pub struct Logger {
    config: Config,
    log_folder: PathBuf,
    sinks: Arc<Mutex<Option<SinkSet>>>,
    daemon: Mutex<Option<FlushDaemon>>,
    console: Option<ConsoleEmitter>,
    pool: BufferPool,
    resolver: &'static CallerResolver,
    metrics: Arc<LoggerMetrics>,
    active: AtomicBool,
    log_files: Vec<(LogLevel, PathBuf)>,
}

impl Logger {
    /// Build a logger from a configuration with default runtime settings
    pub fn new(config: Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolved base folder
    pub fn log_folder(&self) -> &Path {
        &self.log_folder
    }

    /// Files created for this logger, one per level
    pub fn log_files(&self) -> &[(LogLevel, PathBuf)] {
        &self.log_files
    }

    pub fn log_file(&self, level: LogLevel) -> &Path {
        &self.log_files[level.index()].1
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// `false` once [`Logger::cleanup`] has run
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Join-style formatting, see [`format::prepare`]
    pub fn prepare(&self, args: &[Arg<'_>]) -> String {
        format::prepare(args)
    }

    /// Template-style formatting with the configured placeholder prefix
    pub fn format_template(&self, template: &str, args: &[Arg<'_>]) -> String {
        format::format_template(template, &self.config.format_prefix, args)
    }

    /// Log joined arguments at `level`; `silent` suppresses the console echo
    #[inline(never)]
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: &[Arg<'_>], silent: bool) {
        self.emit(level, Message::Join(args), silent);
    }

    /// Log a template at `level`; `silent` suppresses the console echo
    #[inline(never)]
    #[track_caller]
    pub fn logf(&self, level: LogLevel, template: &str, args: &[Arg<'_>], silent: bool) {
        self.emit(level, Message::Template(template, args), silent);
    }

    /// Flush every sink to its file. Fails with
    /// [`LoggerError::LoggerStopped`] after [`Logger::cleanup`].
    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        let set = sinks.as_mut().ok_or(LoggerError::LoggerStopped)?;
        let result = set.flush_all();
        self.metrics.record_flush(result.is_err());
        result
    }

    /// Stop the flush thread, then flush, sync and close every file.
    ///
    /// Calling it again does nothing.
    pub fn cleanup(&self) -> Result<()> {
        self.active.store(false, Ordering::Release);

        let daemon = self.daemon.lock().take();
        if let Some(mut daemon) = daemon {
            daemon.stop();
        }

        let sinks = self.sinks.lock().take();
        match sinks {
            Some(set) => {
                let result = set.close();
                self.metrics.record_flush(result.is_err());
                result
            }
            None => Ok(()),
        }
    }

    /// Shared body of every entry point. Must stay exactly one frame below
    /// the entry point for [`CALLER_SKIP`] to hold.
    #[inline(never)]
    #[track_caller]
    pub(crate) fn emit(&self, level: LogLevel, message: Message<'_>, silent: bool) {
        if !self.is_active() {
            return;
        }

        let caller = self.resolver.resolve(CALLER_SKIP);

        let mut text = self.pool.get();
        match message {
            Message::Join(args) => format::prepare_into(&mut text, args),
            Message::Template(template, args) => {
                format::format_template_into(&mut text, template, &self.config.format_prefix, args)
            }
        }

        self.write_entry(level, &caller, &text, silent);
    }

    fn write_entry(&self, level: LogLevel, caller: &CallerInfo, message: &str, silent: bool) {
        let mut line = self.pool.get();
        line.push('[');
        timestamp::write_now(&mut line);
        line.push_str("] [");
        line.push_str(&caller.function);
        line.push_str(" → ");
        let _ = write!(line, "{}", caller.line);
        line.push_str("]: ");
        line.push_str(message);
        line.push('\n');

        let written = {
            let mut sinks = self.sinks.lock();
            sinks.as_mut().map(|set| set.write(level, line.as_bytes()))
        };

        match written {
            // Closed while this call was in flight
            None => return,
            Some(Ok(())) => {
                self.metrics.record_written();
            }
            Some(Err(e)) => self.report_write_failure(level, &e),
        }

        if !silent {
            if let Some(console) = &self.console {
                console.emit(level, &line);
            }
        }
    }

    fn report_write_failure(&self, level: LogLevel, err: &std::io::Error) {
        let dropped = self.metrics.record_dropped() + 1;
        if dropped == 1 || dropped % DROP_ALERT_EVERY == 0 {
            eprintln!(
                "[LOGGER ERROR] Failed to write {} entry: {} ({} entries dropped, {:.2}% of all)",
                level,
                err,
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

macro_rules! level_methods {
    ($($level:ident => $join:ident, $silent:ident, $template:ident;)+) => {
        impl Logger {
            $(
                #[doc = concat!("Log at `", stringify!($level), "` level, joining the arguments")]
                #[inline(never)]
                #[track_caller]
                pub fn $join(&self, args: &[Arg<'_>]) {
                    self.emit(LogLevel::$level, Message::Join(args), false);
                }

                #[doc = concat!("Log at `", stringify!($level), "` level to the file only")]
                #[inline(never)]
                #[track_caller]
                pub fn $silent(&self, args: &[Arg<'_>]) {
                    self.emit(LogLevel::$level, Message::Join(args), true);
                }

                #[doc = concat!("Log a template at `", stringify!($level), "` level")]
                #[inline(never)]
                #[track_caller]
                pub fn $template(&self, template: &str, args: &[Arg<'_>]) {
                    self.emit(LogLevel::$level, Message::Template(template, args), false);
                }
            )+
        }
    };
}

level_methods! {
    Panic => panic, spanic, panicf;
    Error => error, serror, errorf;
    Warn => warn, swarn, warnf;
    Info => info, sinfo, infof;
    Debug => debug, sdebug, debugf;
    Success => success, ssuccess, successf;
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            eprintln!("[LOGGER ERROR] Failed to close log files during shutdown: {}", e);
        }
    }
}

/// Periodic flush tick. Returns `false` once the sinks are closed.
fn flush_sinks(sinks: &Mutex<Option<SinkSet>>, metrics: &LoggerMetrics) -> bool {
    let mut guard = sinks.lock();
    let Some(set) = guard.as_mut() else {
        return false;
    };
    let result = set.flush_all();
    drop(guard);

    metrics.record_flush(result.is_err());
    if let Err(e) = result {
        eprintln!("[LOGGER ERROR] Periodic flush failed: {}", e);
    }
    true
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use flog::Logger;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .log_folder("/var/tmp/service")
///     .console(false)
///     .file_prefix("service_")
///     .flush_interval(Duration::from_millis(250))
///     .build()?;
/// # Ok::<(), flog::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    config: Config,
    flush_interval: Duration,
    console_writer: Option<Box<dyn std::io::Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            console_writer: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.log_folder = Some(folder.into());
        self
    }

    /// Enable or disable the console echo
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.config.log_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: Colors) -> Self {
        self.config.colors = colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_file_prefix = prefix.into();
        self
    }

    /// Placeholder token for template entry points
    #[must_use = "builder methods return a new value"]
    pub fn format_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.format_prefix = prefix.into();
        self
    }

    /// Interval of the background flush, one second by default
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Send the console echo somewhere other than stdout
    ///
    /// Whether the tag is colored still follows stdout's terminal state and
    /// `NO_COLOR`; see `colored::control::set_override`.
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: impl std::io::Write + Send + 'static) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Create the log files and start the flush thread
    pub fn build(self) -> Result<Logger> {
        let LoggerBuilder {
            mut config,
            flush_interval,
            console_writer,
        } = self;

        config.validate()?;
        if flush_interval.is_zero() {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "flush_interval must be greater than zero",
            ));
        }

        let log_folder = config.resolved_log_folder();
        let sink_set = SinkSet::create(
            &log_folder,
            &config.log_file_prefix,
            timestamp::unix_nanos(),
        )?;
        config.log_folder = Some(log_folder.clone());

        let log_files = sink_set.paths();
        let sinks = Arc::new(Mutex::new(Some(sink_set)));
        let metrics = Arc::new(LoggerMetrics::new());

        let daemon = {
            let sinks = Arc::clone(&sinks);
            let metrics = Arc::clone(&metrics);
            FlushDaemon::spawn(flush_interval, move || flush_sinks(&sinks, &metrics))?
        };

        let console = config.log_console.then(|| match console_writer {
            Some(writer) => ConsoleEmitter::with_writer(config.colors, writer),
            None => ConsoleEmitter::stdout(config.colors),
        });

        Ok(Logger {
            config,
            log_folder,
            sinks,
            daemon: Mutex::new(Some(daemon)),
            console,
            pool: BufferPool::default(),
            resolver: CallerResolver::global(),
            metrics,
            active: AtomicBool::new(true),
            log_files,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
