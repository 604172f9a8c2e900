//! Indicator configuration.
//!
//! Every tunable of the widget: colour indices per device state, blink and
//! debounce durations, and feature toggles. Resolved once at start-up and
//! read-only afterwards; the widget persists nothing of its own.

use heapless::Vec;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::ColorTable;
use crate::error::{Error, Result};

/// Maximum number of keymap layers with a dedicated persistent colour.
pub const MAX_LAYERS: usize = 32;

/// Role of this half in a split keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitRole {
    /// Not a split keyboard.
    #[default]
    Standalone,
    /// Split half that owns the host connection and the keymap.
    Central,
    /// Split half that only talks to the central.
    Peripheral,
}

impl SplitRole {
    /// Whether this node owns the keymap (and therefore the layer display).
    pub fn owns_keymap(self) -> bool {
        !matches!(self, SplitRole::Peripheral)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    // --- Timing ---
    /// Default spacing between queued items (milliseconds)
    pub interval_ms: u16,

    // --- Battery ---
    /// Blink own battery level on start-up and on change
    pub battery_show_self: bool,
    pub battery_blink_ms: u16,
    /// Levels at or above this percentage use the "high" colour
    pub battery_level_high: u8,
    /// Levels at or above this percentage use the "medium" colour
    pub battery_level_low: u8,
    pub battery_color_high: u8,
    pub battery_color_medium: u8,
    pub battery_color_low: u8,
    /// Used when the fuel gauge reports 0 %
    pub battery_color_missing: u8,

    // --- Connectivity ---
    pub conn_blink_ms: u16,
    /// Use `conn_color_usb` while the selected endpoint is USB
    pub conn_show_usb: bool,
    pub conn_color_connected: u8,
    pub conn_color_advertising: u8,
    pub conn_color_disconnected: u8,
    pub conn_color_usb: u8,

    // --- Layers ---
    /// Blink once per active layer after the debounce window
    pub show_layer_change: bool,
    /// Show a persistent colour for the highest active layer
    pub show_layer_colors: bool,
    pub layer_blink_ms: u16,
    pub layer_debounce_ms: u16,
    pub layer_color: u8,
    /// Persistent colour index per layer (missing entries → black)
    pub layer_colors: Vec<u8, MAX_LAYERS>,

    // --- Split ---
    pub split_role: SplitRole,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500,

            battery_show_self: true,
            battery_blink_ms: 2000,
            battery_level_high: 80,
            battery_level_low: 20,
            battery_color_high: 2,    // green
            battery_color_medium: 3,  // yellow
            battery_color_low: 1,     // red
            battery_color_missing: 5, // magenta

            conn_blink_ms: 1000,
            conn_show_usb: false,
            conn_color_connected: 4,    // blue
            conn_color_advertising: 6,  // cyan
            conn_color_disconnected: 1, // red
            conn_color_usb: 5,          // magenta

            show_layer_change: true,
            show_layer_colors: false,
            layer_blink_ms: 100,
            layer_debounce_ms: 100,
            layer_color: 7, // white
            layer_colors: Vec::new(),

            split_role: SplitRole::Standalone,
        }
    }
}

impl IndicatorConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the widget cannot honour.
    ///
    /// Colour indices outside the table are legal (they render black) and
    /// only produce a warning.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::Config("interval_ms must be > 0"));
        }
        if self.layer_debounce_ms == 0 {
            return Err(Error::Config("layer_debounce_ms must be > 0"));
        }
        if self.battery_level_high > 100 {
            return Err(Error::Config("battery_level_high must be <= 100"));
        }
        if self.battery_level_low > self.battery_level_high {
            return Err(Error::Config(
                "battery_level_low must not exceed battery_level_high",
            ));
        }

        let table = ColorTable::default();
        let named = [
            ("battery_color_high", self.battery_color_high),
            ("battery_color_medium", self.battery_color_medium),
            ("battery_color_low", self.battery_color_low),
            ("battery_color_missing", self.battery_color_missing),
            ("conn_color_connected", self.conn_color_connected),
            ("conn_color_advertising", self.conn_color_advertising),
            ("conn_color_disconnected", self.conn_color_disconnected),
            ("conn_color_usb", self.conn_color_usb),
            ("layer_color", self.layer_color),
        ];
        for (name, index) in named {
            if !table.contains(index) {
                warn!("config: {} = {} is outside the colour table, renders black", name, index);
            }
        }
        for (layer, &index) in self.layer_colors.iter().enumerate() {
            if !table.contains(index) {
                warn!("config: layer {} colour {} is outside the colour table", layer, index);
            }
        }
        Ok(())
    }

    /// Debounced layer blinks are shown by the keymap-owning node only.
    pub fn layer_change_enabled(&self) -> bool {
        self.show_layer_change && self.split_role.owns_keymap()
    }

    /// Persistent layer colours are shown by the keymap-owning node only.
    pub fn layer_colors_enabled(&self) -> bool {
        self.show_layer_colors && self.split_role.owns_keymap()
    }

    /// Colour index for `layer`, black (0) if none is configured.
    pub fn layer_color_index(&self, layer: u8) -> u8 {
        self.layer_colors.get(layer as usize).copied().unwrap_or(0)
    }
}
