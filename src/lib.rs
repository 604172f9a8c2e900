//! RGB LED indicator widget for keyboard firmware.
//!
//! Renders battery level, connectivity state and the active keymap layer
//! as colours on one RGB LED. Exposes the pure-logic modules for
//! integration testing; ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.
//!
//! ```text
//!  events ──▶ Listeners ──▶ BlinkQueue ──▶ BlinkWorker ──▶ PwmSink
//!              │ Dispatcher      (16)      (own thread)    (R/G/B)
//!              └ Debouncer (layers)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod color;
pub mod config;
pub mod debounce;
pub mod drivers;
pub mod error;
pub mod events;
pub mod pins;
pub mod queue;
pub mod worker;

mod esp_link_shims;

pub use app::startup::{Indicator, start};
pub use color::{Color, ColorTable};
pub use config::IndicatorConfig;
pub use error::{Error, Result};
pub use queue::{BLINK_QUEUE, BlinkQueue, BlinkRequest};
