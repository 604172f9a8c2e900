//! State → colour → blink request.
//!
//! [`Dispatcher`] is the producer side of the blink queue. It turns a
//! battery level, a connectivity state or a layer number into one or more
//! [`BlinkRequest`]s with resolved colours and enqueues them without
//! blocking. It is cheap to clone so every listener, and the debounce
//! timer thread, can hold its own copy.
//!
//! | Indication   | Request(s)                                   |
//! |--------------|----------------------------------------------|
//! | battery      | 1 × blink, `battery_blink_ms`                 |
//! | connectivity | 1 × blink, `conn_blink_ms`                    |
//! | layer        | `highest` × blink, `layer_blink_ms` on + hold |
//! | layer colour | 1 × persistent, skipped if unchanged          |

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};

use crate::color::{Color, ColorTable};
use crate::config::{IndicatorConfig, SplitRole};
use crate::error::Result;
use crate::queue::{BlinkQueue, BlinkRequest};

use super::ports::{LinkState, Transport};

/// No layer colour requested yet.
const NO_LAYER_COLOR: u64 = u64::MAX;

#[derive(Clone)]
pub struct Dispatcher {
    queue: &'static BlinkQueue,
    table: ColorTable,
    config: Arc<IndicatorConfig>,
    /// Packed colour of the last persistent layer request.
    last_layer_color: Arc<AtomicU64>,
}

impl Dispatcher {
    pub fn new(queue: &'static BlinkQueue, table: ColorTable, config: Arc<IndicatorConfig>) -> Self {
        Self {
            queue,
            table,
            config,
            last_layer_color: Arc::new(AtomicU64::new(NO_LAYER_COLOR)),
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn queue(&self) -> &'static BlinkQueue {
        self.queue
    }

    // ── Battery ───────────────────────────────────────────────

    /// Table index for a state of charge. Level 0 means no reading.
    pub fn battery_color_index(&self, level: u8) -> u8 {
        let c = &self.config;
        if level == 0 {
            c.battery_color_missing
        } else if level >= c.battery_level_high {
            c.battery_color_high
        } else if level >= c.battery_level_low {
            c.battery_color_medium
        } else {
            c.battery_color_low
        }
    }

    pub fn indicate_battery(&self, level: u8) -> Result<()> {
        let color = self.table.resolve(self.battery_color_index(level));
        info!("indicating battery {}% with {}", level, color);
        self.queue
            .try_enqueue(BlinkRequest::blink(color, self.config.battery_blink_ms, 0))
    }

    // ── Connectivity ──────────────────────────────────────────

    pub fn connectivity_color_index(&self, transport: Transport, link: LinkState) -> u8 {
        let c = &self.config;
        match c.split_role {
            SplitRole::Peripheral => match link {
                LinkState::Connected => c.conn_color_connected,
                LinkState::Advertising | LinkState::Disconnected => c.conn_color_disconnected,
            },
            SplitRole::Standalone | SplitRole::Central => {
                if transport == Transport::Usb && c.conn_show_usb {
                    return c.conn_color_usb;
                }
                match link {
                    LinkState::Connected => c.conn_color_connected,
                    LinkState::Advertising => c.conn_color_advertising,
                    LinkState::Disconnected => c.conn_color_disconnected,
                }
            }
        }
    }

    pub fn indicate_connectivity(&self, transport: Transport, link: LinkState) -> Result<()> {
        let color = self
            .table
            .resolve(self.connectivity_color_index(transport, link));
        info!("indicating connectivity {:?}/{:?} with {}", transport, link, color);
        self.queue
            .try_enqueue(BlinkRequest::blink(color, self.config.conn_blink_ms, 0))
    }

    // ── Layers ────────────────────────────────────────────────

    /// One blink per active layer above base. Stops at the first drop,
    /// since a partial count would misreport the layer.
    pub fn indicate_layer(&self, highest: u8) -> Result<()> {
        let color = self.table.resolve(self.config.layer_color);
        let ms = self.config.layer_blink_ms;
        info!("indicating layer {} with {}", highest, color);
        for _ in 0..highest {
            self.queue.try_enqueue(BlinkRequest::blink(color, ms, ms))?;
        }
        Ok(())
    }

    /// Make the layer's colour the persistent colour.
    pub fn update_layer_color(&self, highest: u8) -> Result<()> {
        let color = self.table.resolve(self.config.layer_color_index(highest));
        let packed = color.pack();
        let prev = self.last_layer_color.swap(packed, Ordering::AcqRel);
        if prev == packed {
            debug!("layer {} colour unchanged", highest);
            return Ok(());
        }

        debug!("layer {} colour {}", highest, color);
        let res = self.queue.try_enqueue(BlinkRequest::persistent(color));
        if res.is_err() {
            // Dropped: the next request for this colour must not be skipped.
            self.last_layer_color.store(NO_LAYER_COLOR, Ordering::Release);
        }
        res
    }

    /// Colour most recently requested by [`update_layer_color`](Self::update_layer_color).
    pub fn last_layer_color(&self) -> Option<Color> {
        match self.last_layer_color.load(Ordering::Acquire) {
            NO_LAYER_COLOR => None,
            packed => Some(Color::unpack(packed)),
        }
    }
}
