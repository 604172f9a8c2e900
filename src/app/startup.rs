//! Boot sequence for the indicator.
//!
//! ```text
//!  sink ready? ──no──▶ error!, Err(NotReady)   (nothing spawned)
//!      │yes
//!      ▼
//!  listeners (+ layer debounce thread)
//!  worker thread
//!  battery blink ─▶ pause battery_blink_ms + interval_ms
//!  connectivity blink
//!  initial layer colour
//!  initialized ─▶ layer events accepted
//! ```
//!
//! [`start`] runs on the caller's thread and returns once the boot
//! indication is queued, so call it from an init thread if the pause after
//! the battery blink must not hold up the caller.

use std::sync::Arc;
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::color::{Color, ColorTable};
use crate::config::IndicatorConfig;
use crate::error::{Error, Result};
use crate::events::IndicatorEvent;
use crate::queue::BlinkQueue;
use crate::worker::{BlinkWorker, ColorSnapshot};

use super::dispatch::Dispatcher;
use super::listeners::{Listeners, Providers};
use super::ports::ColorSink;

/// Running indicator.
pub struct Indicator {
    listeners: Arc<Listeners>,
    displayed: Arc<ColorSnapshot>,
    worker: JoinHandle<()>,
}

impl Indicator {
    /// Forward a keyboard event.
    pub fn on_event(&self, event: IndicatorEvent) {
        self.listeners.on_event(event);
    }

    pub fn listeners(&self) -> &Arc<Listeners> {
        &self.listeners
    }

    /// Colour currently on the LED.
    pub fn displayed(&self) -> Color {
        self.displayed.get()
    }

    pub fn worker_running(&self) -> bool {
        !self.worker.is_finished()
    }
}

/// Validate, spawn and show the boot indication.
pub fn start<S, D>(
    sink: S,
    mut delay: D,
    config: IndicatorConfig,
    table: ColorTable,
    queue: &'static BlinkQueue,
    providers: Providers,
) -> Result<Indicator>
where
    S: ColorSink + Send + 'static,
    D: DelayNs + Clone + Send + 'static,
{
    config.validate()?;
    if !sink.is_ready() {
        error!("PWM devices not ready, RGB LED indicator disabled");
        return Err(Error::NotReady);
    }

    let config = Arc::new(config);
    let dispatcher = Dispatcher::new(queue, table, Arc::clone(&config));
    let listeners = Listeners::new(dispatcher, providers).map_err(|e| {
        error!("layer debounce thread: {}", e);
        Error::Spawn
    })?;
    let listeners = Arc::new(listeners);

    let worker = BlinkWorker::new(sink, delay.clone(), config.interval_ms);
    let displayed = worker.snapshot();
    let worker = worker.spawn(queue).map_err(|e| {
        error!("blink worker thread: {}", e);
        Error::Spawn
    })?;

    if config.battery_show_self {
        if let Err(e) = listeners.indicate_battery() {
            warn!("boot battery indication: {}", e);
        }
        let pause = config.battery_blink_ms as u32 + config.interval_ms as u32;
        delay.delay_ms(pause);
    }
    if let Err(e) = listeners.indicate_connectivity() {
        warn!("boot connectivity indication: {}", e);
    }
    if config.layer_colors_enabled() {
        if let Err(e) = listeners.update_layer_color() {
            warn!("boot layer colour: {}", e);
        }
    }

    listeners.mark_initialized();
    info!("RGB LED indicator started");

    Ok(Indicator {
        listeners,
        displayed,
        worker,
    })
}
