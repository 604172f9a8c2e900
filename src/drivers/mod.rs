//! LED drivers, LEDC initialisation, and thread helpers.

pub mod hw_init;
pub mod status_led;
pub mod task_pin;
