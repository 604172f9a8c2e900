//! Port traits: the boundary between the indicator core and the firmware.
//!
//! ```text
//!   State providers ──▶ Listeners ──▶ BlinkQueue ──▶ Worker ──▶ ColorSink
//! ```
//!
//! Driven adapters (PWM hardware, fuel gauge, connection manager, keymap)
//! implement these traits. The core only ever sees them through generics
//! or trait objects, so every path is testable with mocks.

use crate::color::Color;
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Output port (core → hardware)
// ───────────────────────────────────────────────────────────────

/// Anything that can show a [`Color`].
pub trait ColorSink {
    /// True only if every underlying channel is initialised.
    fn is_ready(&self) -> bool;

    /// Apply `color`. Channels are written independently; a failure on one
    /// is reported in the error but does not stop the others.
    fn write(&mut self, color: Color) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// State providers (firmware → core)
// ───────────────────────────────────────────────────────────────

/// Battery fuel gauge.
pub trait BatteryGauge {
    /// State of charge in percent. 0 means no reading / no battery.
    fn state_of_charge(&self) -> u8;
}

/// Endpoint currently selected for HID reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Usb,
    Ble,
}

/// State of the active BLE profile (or, on a split peripheral, of the link
/// to the central).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    /// Profile is unbonded and advertising for a new host.
    Advertising,
    Disconnected,
}

/// Connection / profile manager.
pub trait ConnectivityProvider {
    fn transport(&self) -> Transport;
    fn link_state(&self) -> LinkState;
}

/// Active-layer resolver.
pub trait LayerProvider {
    /// Index of the highest active layer; 0 is the base layer.
    fn highest_active_layer(&self) -> u8;
}
