//! Mock hardware for integration tests.
//!
//! Records every LED write and every delay so tests can assert on the full
//! output history without touching real LEDC registers.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use rgbled_widget::app::ports::ColorSink;
use rgbled_widget::queue::BlinkQueue;
use rgbled_widget::{Color, Result};

// ── Recording sink ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Write {
    pub color: Color,
    pub at: Instant,
}

/// Sink that appends each write, with its timestamp, to a shared log.
#[derive(Clone)]
pub struct RecordingSink {
    writes: Arc<Mutex<Vec<Write>>>,
    ready: bool,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self {
            writes: Arc::default(),
            ready: true,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.writes().iter().map(|w| w.color).collect()
    }

    /// Number of writes of `color` so far.
    pub fn count(&self, color: Color) -> usize {
        self.writes().iter().filter(|w| w.color == color).count()
    }
}

impl ColorSink for RecordingSink {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write(&mut self, color: Color) -> Result<()> {
        self.writes.lock().unwrap().push(Write {
            color,
            at: Instant::now(),
        });
        Ok(())
    }
}

// ── Recording delay ───────────────────────────────────────────

/// Delay that records the requested duration and returns immediately.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    sleeps: Arc<Mutex<Vec<u32>>>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleeps.lock().unwrap().push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps.lock().unwrap().push(ms);
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// A private `'static` queue per test.
pub fn leak_queue() -> &'static BlinkQueue {
    Box::leak(Box::new(BlinkQueue::new()))
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}
