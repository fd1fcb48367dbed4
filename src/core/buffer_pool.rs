//! Reusable scratch buffers for formatting
//!
//! Every log call needs two short-lived strings (the message and the full
//! line). Recycling them through a bounded queue keeps the hot path free of
//! allocations once the pool is warm.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Capacity given to freshly allocated buffers
const INITIAL_CAPACITY: usize = 256;

/// Buffers that grew beyond this are not returned to the pool
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

pub struct BufferPool {
    sender: Sender<String>,
    receiver: Receiver<String>,
}

impl BufferPool {
    /// Create a pool retaining at most `max_idle` buffers
    pub fn new(max_idle: usize) -> Self {
        let (sender, receiver) = bounded(max_idle.max(1));
        Self { sender, receiver }
    }

    /// Take a cleared buffer, allocating one if the pool is empty
    pub fn get(&self) -> PooledBuffer<'_> {
        let buf = self
            .receiver
            .try_recv()
            .unwrap_or_else(|_| String::with_capacity(INITIAL_CAPACITY));
        PooledBuffer {
            buf: Some(buf),
            pool: self,
        }
    }

    /// Number of idle buffers
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    fn put(&self, mut buf: String) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        // Full pool: let the buffer go.
        let _ = self.sender.try_send(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(32)
    }
}

/// A buffer borrowed from a [`BufferPool`], returned on drop
pub struct PooledBuffer<'a> {
    buf: Option<String>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        self.buf.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        self.buf.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.put(buf);
        }
    }
}
