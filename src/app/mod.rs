//! Application layer: ports, dispatch, listeners and boot sequencing.

pub mod dispatch;
pub mod listeners;
pub mod ports;
pub mod startup;
