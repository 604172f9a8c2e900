//! One-shot LEDC initialisation for the indicator LED.
//!
//! Configures the LEDC timer and the three RGB channels using raw
//! ESP-IDF sys calls. Each channel reports its own result so that a
//! single miswired channel can be told apart from a dead timer.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    LedcTimerFailed(i32),
    LedcChannelFailed { channel: u32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed { channel, rc } => {
                write!(f, "LEDC channel {} config failed (rc={})", channel, rc)
            }
        }
    }
}

// ── LEDC timer ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_led_timer() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: pins::LED_PWM_RESOLUTION_BITS,
        freq_hz: pins::LED_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: Called once from main() before the blink worker exists.
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK {
        return Err(HwInitError::LedcTimerFailed(ret));
    }
    info!("hw_init: LED timer configured ({} Hz, {}-bit)", pins::LED_PWM_FREQ_HZ, pins::LED_PWM_RESOLUTION_BITS);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_timer() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): LED timer init skipped");
    Ok(())
}

// ── LEDC channels ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_led_channel(channel: u32, gpio: i32) -> Result<(), HwInitError> {
    // SAFETY: Single-threaded init path; the timer was configured first.
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK {
        return Err(HwInitError::LedcChannelFailed { channel, rc: ret });
    }
    info!("hw_init: LEDC CH{} → GPIO{}", channel, gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_channel(_channel: u32, _gpio: i32) -> Result<(), HwInitError> {
    Ok(())
}

/// Write a raw duty value. Returns the ESP-IDF error code on failure.
#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u16) -> Result<(), i32> {
    // SAFETY: The channel was configured in init_led_channel(); only the
    // blink worker thread writes duty registers.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        if ret != ESP_OK {
            return Err(ret);
        }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK {
            return Err(ret);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u16) -> Result<(), i32> {
    Ok(())
}
