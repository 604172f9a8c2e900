//! Blink requests and the bounded queue that carries them to the worker.
//!
//! Uses an `embassy-sync` bounded channel so that listener callbacks and
//! the debounce timer (many producers) can hand value-typed requests to the
//! single blink worker without sharing any other state.
//!
//! ```text
//! ┌──────────────┐
//! │ Listeners    │──┐ try_enqueue   ┌────────────┐ dequeue_blocking ┌────────┐
//! │ Debounce tmr │──┼──────────────▶│ BlinkQueue │─────────────────▶│ Worker │
//! │ Startup      │──┘ (never blocks)│  (16 deep) │   (waits forever)└────────┘
//! └──────────────┘                  └────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::color::Color;
use crate::error::{Error, Result};

/// Queue depth: headroom for a burst of indicator events.
pub const BLINK_QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkKind {
    /// Flash a colour, then fall back to the persistent colour.
    Transient,
    /// Replace the persistent colour.
    Persistent,
}

/// A single LED instruction.
///
/// `active_ms == 0` marks a persistent colour change; anything else is a
/// transient blink shown for `active_ms` and followed by `hold_ms` of the
/// persistent colour (never less than the configured interval).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkRequest {
    pub color: Color,
    pub active_ms: u16,
    pub hold_ms: u16,
}

impl BlinkRequest {
    /// Transient blink. `hold_ms == 0` means "use the default interval".
    pub const fn blink(color: Color, active_ms: u16, hold_ms: u16) -> Self {
        Self {
            color,
            active_ms,
            hold_ms,
        }
    }

    /// Persistent colour change.
    pub const fn persistent(color: Color) -> Self {
        Self {
            color,
            active_ms: 0,
            hold_ms: 0,
        }
    }

    pub const fn kind(&self) -> BlinkKind {
        if self.active_ms == 0 {
            BlinkKind::Persistent
        } else {
            BlinkKind::Transient
        }
    }
}

/// Bounded FIFO of [`BlinkRequest`]s.
pub struct BlinkQueue {
    channel: Channel<CriticalSectionRawMutex, BlinkRequest, BLINK_QUEUE_DEPTH>,
}

/// The firmware's one queue. Tests build private ones with [`BlinkQueue::new`].
pub static BLINK_QUEUE: BlinkQueue = BlinkQueue::new();

impl BlinkQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Non-blocking enqueue. On overflow the new request is dropped and
    /// [`Error::QueueFull`] returned; queued items are never displaced.
    pub fn try_enqueue(&self, request: BlinkRequest) -> Result<()> {
        self.channel.try_send(request).map_err(|_| {
            warn!(
                "blink queue full, dropping {:?} request ({})",
                request.kind(),
                request.color
            );
            Error::QueueFull
        })
    }

    /// Block the calling thread until a request is available.
    ///
    /// Only the blink worker calls this.
    pub fn dequeue_blocking(&self) -> BlinkRequest {
        futures_lite::future::block_on(self.channel.receive())
    }

    /// Non-blocking dequeue.
    pub fn try_dequeue(&self) -> Option<BlinkRequest> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    /// Discard every pending request.
    pub fn clear(&self) {
        self.channel.clear();
    }
}

impl Default for BlinkQueue {
    fn default() -> Self {
        Self::new()
    }
}
