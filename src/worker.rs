//! Blink worker: the single consumer of the blink queue.
//!
//! Owns the sink and the persistent colour. Every PWM write and every
//! timed hold happens on this one thread, so the sink needs no locking.
//!
//! ## Per-request sequence
//!
//! | Request     | Writes                         | Holds                          |
//! |-------------|--------------------------------|--------------------------------|
//! | Persistent  | new colour                     | none                            |
//! | Transient   | blink colour, then persistent  | `active_ms`, then `max(hold_ms, interval)` |
//!
//! Restoring the persistent colour after every blink means the LED never
//! stays on a stale transient colour, and the trailing hold spaces out
//! back-to-back blinks. A dequeued blink always runs to completion.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::app::ports::ColorSink;
use crate::color::Color;
use crate::drivers::task_pin::{self, Core};
use crate::queue::{BlinkKind, BlinkQueue, BlinkRequest};

/// Read-only view of the colour currently on the LED.
///
/// Written only by the worker; anyone may read it.
#[derive(Debug, Default)]
pub struct ColorSnapshot(AtomicU64);

impl ColorSnapshot {
    pub fn new() -> Self {
        Self(AtomicU64::new(Color::BLACK.pack()))
    }

    pub fn get(&self) -> Color {
        Color::unpack(self.0.load(Ordering::Acquire))
    }

    fn set(&self, color: Color) {
        self.0.store(color.pack(), Ordering::Release);
    }
}

pub struct BlinkWorker<S, D> {
    sink: S,
    delay: D,
    interval_ms: u16,
    persistent: Color,
    displayed: Arc<ColorSnapshot>,
}

impl<S: ColorSink, D: DelayNs> BlinkWorker<S, D> {
    /// `interval_ms` is the minimum hold after every transient blink.
    pub fn new(sink: S, delay: D, interval_ms: u16) -> Self {
        Self {
            sink,
            delay,
            interval_ms,
            persistent: Color::BLACK,
            displayed: Arc::new(ColorSnapshot::new()),
        }
    }

    /// Handle for observing the displayed colour from other threads.
    pub fn snapshot(&self) -> Arc<ColorSnapshot> {
        Arc::clone(&self.displayed)
    }

    pub fn persistent(&self) -> Color {
        self.persistent
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Execute one request to completion.
    pub fn process(&mut self, request: BlinkRequest) {
        match request.kind() {
            BlinkKind::Persistent => {
                debug!("persistent colour: {}", request.color);
                self.persistent = request.color;
                self.show(request.color);
            }
            BlinkKind::Transient => {
                debug!("blink: {}, duration {}ms", request.color, request.active_ms);
                self.show(request.color);
                self.delay.delay_ms(request.active_ms as u32);

                self.show(self.persistent);
                let hold = request.hold_ms.max(self.interval_ms);
                self.delay.delay_ms(hold as u32);
            }
        }
    }

    /// Drain `queue` forever.
    pub fn run(mut self, queue: &BlinkQueue) -> ! {
        info!("blink worker running (interval {}ms)", self.interval_ms);
        loop {
            let request = queue.dequeue_blocking();
            self.process(request);
        }
    }

    /// Write to the sink. Failures were already logged per channel; timing
    /// carries on regardless.
    fn show(&mut self, color: Color) {
        if let Err(e) = self.sink.write(color) {
            debug!("sink write incomplete ({}), continuing", e);
        }
        self.displayed.set(color);
    }
}

impl<S, D> BlinkWorker<S, D>
where
    S: ColorSink + Send + 'static,
    D: DelayNs + Send + 'static,
{
    /// Move the worker onto its own thread, consuming `queue`.
    pub fn spawn(self, queue: &'static BlinkQueue) -> io::Result<JoinHandle<()>> {
        task_pin::spawn_on_core(
            Core::App,
            task_pin::INDICATOR_PRIORITY,
            task_pin::INDICATOR_STACK_KB,
            "led-blink\0",
            move || {
                self.run(queue);
            },
        )
    }
}
