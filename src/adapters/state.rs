//! Atomic keyboard-state cell.
//!
//! The firmware's battery, connection and keymap code stores the latest
//! value here and then raises the matching [`IndicatorEvent`]; the
//! listeners read it back through the provider traits. Every field is a
//! single atomic, so writers never block and readers never see a torn
//! value.
//!
//! [`IndicatorEvent`]: crate::events::IndicatorEvent

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::app::listeners::Providers;
use crate::app::ports::{BatteryGauge, ConnectivityProvider, LayerProvider, LinkState, Transport};

#[derive(Debug, Default)]
pub struct KeyboardState {
    battery: AtomicU8,
    transport: AtomicU8,
    link: AtomicU8,
    layer: AtomicU8,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_battery(&self, percent: u8) {
        self.battery.store(percent.min(100), Ordering::Release);
    }

    pub fn set_transport(&self, transport: Transport) {
        let raw = match transport {
            Transport::Ble => 0,
            Transport::Usb => 1,
        };
        self.transport.store(raw, Ordering::Release);
    }

    pub fn set_link(&self, link: LinkState) {
        let raw = match link {
            LinkState::Disconnected => 0,
            LinkState::Advertising => 1,
            LinkState::Connected => 2,
        };
        self.link.store(raw, Ordering::Release);
    }

    pub fn set_highest_layer(&self, layer: u8) {
        self.layer.store(layer, Ordering::Release);
    }

    /// Provider handles for [`Listeners`](crate::app::listeners::Listeners).
    pub fn providers(self: &Arc<Self>) -> Providers {
        Providers {
            battery: self.clone(),
            connectivity: self.clone(),
            layers: self.clone(),
        }
    }
}

impl BatteryGauge for KeyboardState {
    fn state_of_charge(&self) -> u8 {
        self.battery.load(Ordering::Acquire)
    }
}

impl ConnectivityProvider for KeyboardState {
    fn transport(&self) -> Transport {
        match self.transport.load(Ordering::Acquire) {
            1 => Transport::Usb,
            _ => Transport::Ble,
        }
    }

    fn link_state(&self) -> LinkState {
        match self.link.load(Ordering::Acquire) {
            2 => LinkState::Connected,
            1 => LinkState::Advertising,
            _ => LinkState::Disconnected,
        }
    }
}

impl LayerProvider for KeyboardState {
    fn highest_active_layer(&self) -> u8 {
        self.layer.load(Ordering::Acquire)
    }
}
