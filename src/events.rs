//! Keyboard events the indicator reacts to.
//!
//! The host firmware raises these from its own event bus; the indicator
//! never polls. Each event carries only what the bus delivers, and the
//! listener queries the relevant provider for the current state.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ battery bus  │────▶│               │     │              │
//! │ conn. bus    │────▶│   Listeners   │────▶│ Blink Queue  │
//! │ layer bus    │────▶│ (+ debounce)  │     │              │
//! └──────────────┘     └───────────────┘     └──────────────┘
//! ```

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    /// Battery state of charge changed.
    BatteryChanged,
    /// Transport switched or the active profile's link state changed.
    ConnectivityChanged,
    /// A layer was turned on (`active`) or off.
    LayerChanged { active: bool },
}

impl IndicatorEvent {
    /// Whether the event concerns the keymap layer state.
    pub const fn is_layer(self) -> bool {
        matches!(self, Self::LayerChanged { .. })
    }
}

impl fmt::Display for IndicatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatteryChanged => write!(f, "battery changed"),
            Self::ConnectivityChanged => write!(f, "connectivity changed"),
            Self::LayerChanged { active: true } => write!(f, "layer on"),
            Self::LayerChanged { active: false } => write!(f, "layer off"),
        }
    }
}
