//! RGB status LED driver.
//!
//! Three independent PWM channels drive the R/G/B dies of one LED. Each
//! channel is an `embedded-hal` [`SetDutyCycle`] plus a readiness flag, so
//! the sink works with any HAL's PWM output.
//!
//! ## Partial-failure tolerance
//!
//! A channel that is not ready or rejects a write is logged and skipped;
//! the other two are still written. One miswired channel must not take
//! the whole indicator down.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`LedcChannel`] drives LEDC via hw_init.
//! On host/test: [`SimChannel`] tracks duty in memory only.

use embedded_hal::pwm::{Error as _, ErrorKind, ErrorType, SetDutyCycle};
use log::{debug, error, info};

use crate::app::ports::ColorSink;
use crate::color::Color;
use crate::drivers::hw_init;
use crate::error::{Channel, ChannelMask, Error, Result};
use crate::pins;

/// One PWM output of the LED.
pub trait PwmChannel: SetDutyCycle {
    /// Whether the underlying device was initialised and can be written.
    fn is_ready(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// PwmSink
// ───────────────────────────────────────────────────────────────

/// [`ColorSink`] over three PWM channels.
pub struct PwmSink<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Color,
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> PwmSink<R, G, B> {
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: Color::BLACK,
        }
    }

    /// Channels whose device is down.
    pub fn unready(&self) -> ChannelMask {
        let mut mask = ChannelMask::empty();
        for (channel, ready) in [
            (Channel::Red, self.red.is_ready()),
            (Channel::Green, self.green.is_ready()),
            (Channel::Blue, self.blue.is_ready()),
        ] {
            if !ready {
                mask.insert(channel);
            }
        }
        mask
    }

    /// Last colour requested (whether or not every channel accepted it).
    pub fn current(&self) -> Color {
        self.current
    }

    pub fn channels(&self) -> (&R, &G, &B) {
        (&self.red, &self.green, &self.blue)
    }
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> ColorSink for PwmSink<R, G, B> {
    fn is_ready(&self) -> bool {
        self.red.is_ready() && self.green.is_ready() && self.blue.is_ready()
    }

    fn write(&mut self, color: Color) -> Result<()> {
        let mut failed = ChannelMask::empty();
        apply(&mut self.red, Channel::Red, color.r, &mut failed);
        apply(&mut self.green, Channel::Green, color.g, &mut failed);
        apply(&mut self.blue, Channel::Blue, color.b, &mut failed);
        self.current = color;

        if failed.is_empty() {
            debug!("LED → {}", color);
            Ok(())
        } else {
            Err(Error::Pwm(failed))
        }
    }
}

/// Scale a 16-bit intensity onto `pwm` and record any failure.
fn apply<C: PwmChannel>(pwm: &mut C, channel: Channel, value: u16, failed: &mut ChannelMask) {
    if !pwm.is_ready() {
        error!("{} PWM device is not ready", channel);
        failed.insert(channel);
        return;
    }
    if let Err(e) = pwm.set_duty_cycle_fraction(value, u16::MAX) {
        error!("Failed to set {} PWM: {:?}", channel, e.kind());
        failed.insert(channel);
    }
}

// ───────────────────────────────────────────────────────────────
// LEDC channel (ESP-IDF; no-op on host)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcError(pub i32);

impl embedded_hal::pwm::Error for LedcError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One LEDC channel configured by [`hw_init::init_led_channel`].
pub struct LedcChannel {
    channel: u32,
    ready: bool,
}

impl LedcChannel {
    /// Configure `channel` on `gpio`. A failed configuration leaves the
    /// channel not-ready rather than returning an error.
    pub fn new(channel: u32, gpio: i32) -> Self {
        let ready = match hw_init::init_led_channel(channel, gpio) {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        };
        Self { channel, ready }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }
}

impl ErrorType for LedcChannel {
    type Error = LedcError;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        pins::LED_PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), LedcError> {
        hw_init::ledc_set(self.channel, duty).map_err(LedcError)
    }
}

impl PwmChannel for LedcChannel {
    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Sink on the board's LEDC channels (see [`pins`]).
pub type LedcSink = PwmSink<LedcChannel, LedcChannel, LedcChannel>;

/// Configure the LED timer and all three channels.
///
/// Never fails: a dead timer marks every channel not-ready, which the
/// start-up sequence reports and turns into a disabled indicator.
pub fn board_sink() -> LedcSink {
    let timer_ok = match hw_init::init_led_timer() {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    };
    let mut channels = [
        LedcChannel::new(pins::LEDC_CH_LED_R, pins::LED_R_GPIO),
        LedcChannel::new(pins::LEDC_CH_LED_G, pins::LED_G_GPIO),
        LedcChannel::new(pins::LEDC_CH_LED_B, pins::LED_B_GPIO),
    ];
    if !timer_ok {
        for ch in &mut channels {
            ch.ready = false;
        }
    }
    let [red, green, blue] = channels;
    info!("status LED: LEDC CH{}/{}/{}", red.channel, green.channel, blue.channel);
    PwmSink::new(red, green, blue)
}

// ───────────────────────────────────────────────────────────────
// Simulated channel (host)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPwmError;

impl embedded_hal::pwm::Error for SimPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// In-memory PWM channel for host builds.
#[derive(Debug, Clone)]
pub struct SimChannel {
    duty: u16,
    max_duty: u16,
    ready: bool,
    failing: bool,
    writes: u32,
}

impl SimChannel {
    pub fn new(max_duty: u16) -> Self {
        Self {
            duty: 0,
            max_duty,
            ready: true,
            failing: false,
            writes: 0,
        }
    }

    /// A channel whose device never came up.
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new(u16::MAX)
        }
    }

    /// A ready channel whose every write fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(u16::MAX)
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Successful writes so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl Default for SimChannel {
    fn default() -> Self {
        Self::new(u16::MAX)
    }
}

impl ErrorType for SimChannel {
    type Error = SimPwmError;
}

impl SetDutyCycle for SimChannel {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), SimPwmError> {
        if self.failing {
            return Err(SimPwmError);
        }
        self.duty = duty;
        self.writes += 1;
        Ok(())
    }
}

impl PwmChannel for SimChannel {
    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Sink on three [`SimChannel`]s.
pub type SimSink = PwmSink<SimChannel, SimChannel, SimChannel>;
