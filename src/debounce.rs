//! Single-slot debounce timer.
//!
//! A rapidly repeating signal (layer changes while a momentary layer key
//! is rolled) should produce one indication once it settles. Each
//! [`reschedule`](Debouncer::reschedule) pushes the deadline out to
//! `now + window`; the callback runs once, on the timer thread, after the
//! latest deadline passes unchanged.
//!
//! ```text
//!  notify ─┐  notify ─┐ notify ─┐
//!          ▼          ▼         ▼
//!  ────────[──────────[─────────[────── window ──────]▶ fire (once)
//! ```
//!
//! Producers only store an atomic deadline and unpark the timer thread,
//! so rescheduling never blocks. The timer thread re-checks the deadline
//! with a compare-exchange before firing, which makes a reschedule that
//! races with expiry simply start a new window.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, Thread};
use std::time::Duration;

use log::debug;

use crate::adapters::time::MonotonicClock;
use crate::drivers::task_pin::{self, Core};

/// Deadline value meaning "nothing scheduled".
const IDLE: u64 = u64::MAX;

struct Shared {
    deadline_ms: AtomicU64,
    closed: AtomicBool,
    window_ms: u64,
    clock: MonotonicClock,
}

pub struct Debouncer {
    shared: Arc<Shared>,
    timer: Thread,
}

impl Debouncer {
    /// Start the timer thread. `on_expire` runs on that thread.
    pub fn spawn<F>(name: &'static str, window_ms: u16, on_expire: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let shared = Arc::new(Shared {
            deadline_ms: AtomicU64::new(IDLE),
            closed: AtomicBool::new(false),
            window_ms: window_ms.max(1) as u64,
            clock: MonotonicClock::new(),
        });
        let timer_shared = Arc::clone(&shared);
        let handle = task_pin::spawn_on_core(
            Core::App,
            task_pin::INDICATOR_PRIORITY,
            task_pin::INDICATOR_STACK_KB,
            name,
            move || timer_loop(&timer_shared, on_expire),
        )?;
        Ok(Self {
            shared,
            timer: handle.thread().clone(),
        })
    }

    /// (Re)start the window. Replaces any pending deadline.
    pub fn reschedule(&self) {
        let deadline = self.shared.clock.uptime_ms() + self.shared.window_ms;
        self.shared.deadline_ms.store(deadline, Ordering::Release);
        self.timer.unpark();
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&self) {
        self.shared.deadline_ms.store(IDLE, Ordering::Release);
        self.timer.unpark();
    }

    pub fn is_pending(&self) -> bool {
        self.shared.deadline_ms.load(Ordering::Acquire) != IDLE
    }

    pub fn window_ms(&self) -> u64 {
        self.shared.window_ms
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
        self.timer.unpark();
    }
}

fn timer_loop(shared: &Shared, mut on_expire: impl FnMut()) {
    while !shared.closed.load(Ordering::Acquire) {
        let deadline = shared.deadline_ms.load(Ordering::Acquire);
        if deadline == IDLE {
            thread::park();
            continue;
        }

        let now = shared.clock.uptime_ms();
        if now < deadline {
            thread::park_timeout(Duration::from_millis(deadline - now));
            continue;
        }

        // Fire only if nobody moved the deadline since we read it.
        if shared
            .deadline_ms
            .compare_exchange(deadline, IDLE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            debug!("debounce window elapsed");
            on_expire();
        }
    }
}
