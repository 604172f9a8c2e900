//! Event listeners: keyboard events in, blink requests out.
//!
//! Battery and connectivity events are dispatched immediately: one event,
//! one enqueue attempt. Layer events go through a [`Debouncer`] so that a
//! burst of layer toggles produces a single indication, read from the
//! layer provider when the burst settles rather than when it started.
//!
//! Layer events are ignored until start-up has finished its own
//! indication ([`Listeners::mark_initialized`]), so boot-time layer
//! activity cannot interleave with the battery/connectivity blinks.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::debounce::Debouncer;
use crate::error::Result;
use crate::events::IndicatorEvent;

use super::dispatch::Dispatcher;
use super::ports::{BatteryGauge, ConnectivityProvider, LayerProvider};

/// State providers shared with the firmware.
#[derive(Clone)]
pub struct Providers {
    pub battery: Arc<dyn BatteryGauge + Send + Sync>,
    pub connectivity: Arc<dyn ConnectivityProvider + Send + Sync>,
    pub layers: Arc<dyn LayerProvider + Send + Sync>,
}

pub struct Listeners {
    dispatcher: Dispatcher,
    providers: Providers,
    initialized: AtomicBool,
    layer_debounce: Option<Debouncer>,
}

impl Listeners {
    /// Bind `dispatcher` to `providers`. Starts the layer debounce thread
    /// when layer blinks are enabled for this node.
    pub fn new(dispatcher: Dispatcher, providers: Providers) -> io::Result<Self> {
        let config = dispatcher.config();
        let layer_debounce = if config.layer_change_enabled() {
            let window = config.layer_debounce_ms;
            let on_expire = {
                let dispatcher = dispatcher.clone();
                let layers = Arc::clone(&providers.layers);
                move || {
                    // Result already logged by the queue on drop.
                    let _ = dispatcher.indicate_layer(layers.highest_active_layer());
                }
            };
            Some(Debouncer::spawn("led-layer\0", window, on_expire)?)
        } else {
            None
        };

        Ok(Self {
            dispatcher,
            providers,
            initialized: AtomicBool::new(false),
            layer_debounce,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Let layer events through from now on.
    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Whether a debounced layer indication is waiting for its window.
    pub fn layer_pending(&self) -> bool {
        self.layer_debounce.as_ref().is_some_and(Debouncer::is_pending)
    }

    /// Entry point for the firmware's event bus.
    pub fn on_event(&self, event: IndicatorEvent) {
        debug!("event: {}", event);
        let res = match event {
            IndicatorEvent::BatteryChanged => self.on_battery_changed(),
            IndicatorEvent::ConnectivityChanged => self.on_connectivity_changed(),
            IndicatorEvent::LayerChanged { active } => {
                self.on_layer_changed(active);
                Ok(())
            }
        };
        if let Err(e) = res {
            debug!("{} not indicated: {}", event, e);
        }
    }

    pub fn on_battery_changed(&self) -> Result<()> {
        if !self.dispatcher.config().battery_show_self {
            return Ok(());
        }
        self.indicate_battery()
    }

    pub fn on_connectivity_changed(&self) -> Result<()> {
        self.indicate_connectivity()
    }

    pub fn on_layer_changed(&self, active: bool) {
        if !self.is_initialized() {
            return;
        }

        if self.dispatcher.config().layer_colors_enabled() {
            let highest = self.providers.layers.highest_active_layer();
            if let Err(e) = self.dispatcher.update_layer_color(highest) {
                warn!("layer colour not updated: {}", e);
            }
        }

        if !active {
            return;
        }
        if let Some(debounce) = &self.layer_debounce {
            debounce.reschedule();
        }
    }

    // ── Immediate indications (used by start-up) ──────────────

    pub fn indicate_battery(&self) -> Result<()> {
        let level = self.providers.battery.state_of_charge();
        self.dispatcher.indicate_battery(level)
    }

    pub fn indicate_connectivity(&self) -> Result<()> {
        let conn = &self.providers.connectivity;
        self.dispatcher
            .indicate_connectivity(conn.transport(), conn.link_state())
    }

    pub fn update_layer_color(&self) -> Result<()> {
        let highest = self.providers.layers.highest_active_layer();
        self.dispatcher.update_layer_color(highest)
    }
}
