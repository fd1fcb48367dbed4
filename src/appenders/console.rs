//! Console emitter
//!
//! Mirrors log lines to a terminal with a colored level tag:
//! `<color>[INFO] <reset>[12:00:00.000] [app::main → 3]: message`.
//!
//! Escape codes are decided by `colored` for the whole process, not per
//! writer: they are dropped when stdout is not a terminal or `NO_COLOR` is
//! set, and forced on by `CLICOLOR_FORCE`. Call
//! `colored::control::set_override` to pin the choice, for example before
//! redirecting the echo to a file or an in-memory writer.

use crate::core::{Colors, LogLevel};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct ConsoleEmitter {
    colors: Colors,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEmitter {
    /// Emit to standard output
    pub fn stdout(colors: Colors) -> Self {
        Self::with_writer(colors, Box::new(io::stdout()))
    }

    /// Emit to an arbitrary writer
    pub fn with_writer(colors: Colors, writer: Box<dyn Write + Send>) -> Self {
        Self {
            colors,
            out: Mutex::new(writer),
        }
    }

    /// Write one formatted line. Console failures are ignored.
    pub fn emit(&self, level: LogLevel, line: &str) {
        let color: colored::Color = self.colors.for_level(level).into();
        let tag = format!("[{}] ", level.tag()).color(color);

        let mut out = self.out.lock();
        let _ = write!(out, "{}{}", tag, line);
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_prefixes_level_tag() {
        let buffer = SharedBuffer::default();
        let emitter = ConsoleEmitter::with_writer(Colors::default(), Box::new(buffer.clone()));

        emitter.emit(LogLevel::Warn, "[10:00:00.000] [app::run → 7]: careful\n");

        let output = buffer.contents();
        assert!(output.contains("[WARN] "));
        assert!(output.ends_with("[10:00:00.000] [app::run → 7]: careful\n"));
    }

    #[test]
    fn test_panic_shares_error_color() {
        colored::control::set_override(true);

        let buffer = SharedBuffer::default();
        let emitter = ConsoleEmitter::with_writer(Colors::default(), Box::new(buffer.clone()));
        emitter.emit(LogLevel::Panic, "p\n");
        emitter.emit(LogLevel::Error, "e\n");

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\x1b[38;2;234;1;1m[PANIC] "));
        assert!(lines[1].starts_with("\x1b[38;2;234;1;1m[ERROR] "));
    }
}
