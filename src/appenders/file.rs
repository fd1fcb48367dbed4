//! Per-level file sinks
//!
//! Every level owns one buffered, append-only file at
//! `<base>/logs/<level>/<prefix>log_<level>_<unix nanos>.log`.

use crate::core::{LogLevel, LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Directory created under the base folder
pub const LOGS_DIR: &str = "logs";

/// Bytes buffered per sink before the file is written
pub const SINK_BUFFER_CAPACITY: usize = 32 * 1024;

/// One level's buffered log file
pub struct Sink {
    level: LogLevel,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Sink {
    fn create(logs_dir: &Path, prefix: &str, level: LogLevel, stamp: i64) -> Result<Self> {
        let dir = logs_dir.join(level.as_str());
        fs::create_dir_all(&dir)
            .map_err(|e| LoggerError::io_operation("creating log directory", &dir, e))?;

        let path = dir.join(format!("{}log_{}_{}.log", prefix, level.as_str(), stamp));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", &path, e))?;

        Ok(Self {
            level,
            path,
            writer: BufWriter::with_capacity(SINK_BUFFER_CAPACITY, file),
        })
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush, sync to disk and release the file handle
    fn close(self) -> Result<()> {
        let Sink { path, writer, .. } = self;
        let file = writer
            .into_inner()
            .map_err(|e| LoggerError::io_operation("flushing log file", &path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| LoggerError::io_operation("syncing log file", &path, e))
    }
}

/// The sinks of every level, indexed by level
pub struct SinkSet {
    sinks: [Sink; LogLevel::COUNT],
}

impl SinkSet {
    /// Create the directory layout and open one file per level.
    ///
    /// `stamp` is the Unix time in nanoseconds that names this run's files.
    pub fn create(base: &Path, prefix: &str, stamp: i64) -> Result<Self> {
        let logs_dir = base.join(LOGS_DIR);
        let sinks = LogLevel::ALL
            .iter()
            .map(|&level| Sink::create(&logs_dir, prefix, level, stamp))
            .collect::<Result<Vec<_>>>()?;

        let sinks: [Sink; LogLevel::COUNT] = sinks
            .try_into()
            .map_err(|_| LoggerError::other("one sink per level expected"))?;
        Ok(Self { sinks })
    }

    pub fn sink(&self, level: LogLevel) -> &Sink {
        &self.sinks[level.index()]
    }

    pub fn write(&mut self, level: LogLevel, bytes: &[u8]) -> io::Result<()> {
        self.sinks[level.index()].write(bytes)
    }

    /// Flush every sink. All sinks are attempted; the first failure is returned.
    pub fn flush_all(&mut self) -> Result<()> {
        let mut first_err = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(LoggerError::io_operation(
                    "flushing log file",
                    &sink.path,
                    e,
                ));
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Flush and close every sink. All sinks are closed; the first failure is returned.
    pub fn close(self) -> Result<()> {
        let mut first_err = None;
        for sink in self.sinks {
            if let Err(e) = sink.close() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn paths(&self) -> Vec<(LogLevel, PathBuf)> {
        self.sinks
            .iter()
            .map(|sink| (sink.level, sink.path.clone()))
            .collect()
    }
}
