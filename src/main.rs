//! RGB LED widget: board entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  keyboard firmware (battery · BLE/USB · keymap)              │
//! │        │ KeyboardState setters + IndicatorEvent              │
//! │  ──────┼──────────── Port Trait Boundary ────────────────    │
//! │        ▼                                                     │
//! │  Listeners ─▶ BLINK_QUEUE ─▶ BlinkWorker ─▶ LEDC R/G/B       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing or broken LED disables the indicator and nothing else.
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};

use rgbled_widget::adapters::delay::ThreadDelay;
use rgbled_widget::adapters::state::KeyboardState;
use rgbled_widget::app::ports::{LinkState, Transport};
use rgbled_widget::drivers::status_led::board_sink;
use rgbled_widget::{BLINK_QUEUE, ColorTable, IndicatorConfig, start};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("rgbled-widget v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Keyboard state seen by the indicator ───────────────
    let state = Arc::new(KeyboardState::new());
    state.set_transport(Transport::Usb);
    state.set_link(LinkState::Disconnected);

    // ── 3. Indicator ──────────────────────────────────────────
    let config = IndicatorConfig::default();
    let indicator = match start(
        board_sink(),
        ThreadDelay,
        config,
        ColorTable::default(),
        &BLINK_QUEUE,
        state.providers(),
    ) {
        Ok(indicator) => Some(indicator),
        Err(e) => {
            warn!("running without LED indicator: {}", e);
            None
        }
    };

    // ── 4. Idle ───────────────────────────────────────────────
    // Events arrive from the firmware's own threads via `on_event`.
    let mut last = None;
    loop {
        std::thread::sleep(Duration::from_secs(1));
        if let Some(indicator) = &indicator {
            let shown = indicator.displayed();
            if last != Some(shown) {
                debug!("LED now {}", shown);
                last = Some(shown);
            }
        }
    }
}
