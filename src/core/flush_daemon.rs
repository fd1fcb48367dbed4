//! Background flushing
//!
//! A single thread wakes up every interval and runs a tick (the logger's tick
//! flushes all sinks). Dropping the stop sender wakes the thread immediately,
//! so stopping never waits for a full interval.

use super::error::Result;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Interval between periodic flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

const THREAD_NAME: &str = "flog-flush";

pub struct FlushDaemon {
    stop: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FlushDaemon {
    /// Start the daemon. `tick` runs once per interval until it returns
    /// `false` or the daemon is stopped.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !tick() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit. Safe to call repeatedly.
    pub fn stop(&mut self) {
        drop(self.stop.take());

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Flush thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for FlushDaemon {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_ticks_periodically_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let ticks_clone = Arc::clone(&ticks);

        let mut daemon = FlushDaemon::spawn(Duration::from_millis(10), move || {
            ticks_clone.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        std::thread::sleep(Duration::from_millis(150));
        assert!(daemon.is_running());
        daemon.stop();
        assert!(!daemon.is_running());

        let after_stop = ticks.load(Ordering::SeqCst);
        assert!(after_stop >= 1, "expected at least one tick, got {}", after_stop);

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_does_not_wait_for_interval() {
        let mut daemon = FlushDaemon::spawn(Duration::from_secs(60), || true).unwrap();

        let start = Instant::now();
        daemon.stop();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_tick_returning_false_ends_thread() {
        let mut daemon = FlushDaemon::spawn(Duration::from_millis(5), || false).unwrap();

        let start = Instant::now();
        while daemon.is_running() && start.elapsed() < Duration::from_secs(5) {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!daemon.is_running());
        daemon.stop();
    }
}
