//! GPIO / PWM assignments for the indicator LED.
//!
//! Single source of truth: the LEDC setup and the channel wrappers
//! reference this module rather than hard-coding numbers.

// ---------------------------------------------------------------------------
// Status LED (discrete or common-cathode RGB)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

/// LEDC channel numbers driving the three colours.
pub const LEDC_CH_LED_R: u32 = 0;
pub const LEDC_CH_LED_G: u32 = 1;
pub const LEDC_CH_LED_B: u32 = 2;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  13-bit gives 0 – 8191 duty levels.
pub const LED_PWM_RESOLUTION_BITS: u32 = 13;
/// Highest duty value at [`LED_PWM_RESOLUTION_BITS`].
pub const LED_PWM_MAX_DUTY: u16 = (1 << LED_PWM_RESOLUTION_BITS) - 1;
/// LEDC frequency for the RGB LED (1 kHz, 1 ms period).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
