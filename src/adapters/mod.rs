//! Adapters: platform services the indicator core consumes.
//!
//! | Adapter | Provides          | Connects to                      |
//! |---------|-------------------|----------------------------------|
//! | `delay` | `DelayNs`         | FreeRTOS / OS thread sleep       |
//! | `state` | state providers   | firmware battery / BLE / keymap  |
//! | `time`  | monotonic clock   | `esp_timer` / `std::time::Instant` |

pub mod delay;
pub mod state;
pub mod time;
