//! Output destinations: per-level files and the console

pub mod console;
pub mod file;

pub use console::ConsoleEmitter;
pub use file::{Sink, SinkSet, LOGS_DIR, SINK_BUFFER_CAPACITY};
