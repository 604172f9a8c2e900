//! Unified error types for the indicator subsystem.
//!
//! A single `Error` enum that every component converts into. All variants
//! are `Copy` so they travel through the worker and listeners without
//! allocation. None of them is fatal to the host firmware: the worst case
//! is an LED that shows nothing useful.

use core::fmt;

// ---------------------------------------------------------------------------
// PWM channels
// ---------------------------------------------------------------------------

/// One of the three PWM channels that make up the RGB LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    Red = 0b0000_0001,
    Green = 0b0000_0010,
    Blue = 0b0000_0100,
}

impl Channel {
    /// All channels in write order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Return the bitmask for this channel.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Blue => write!(f, "blue"),
        }
    }
}

/// Set of channels that failed during one sink write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelMask(u8);

impl ChannelMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, channel: Channel) {
        self.0 |= channel.mask();
    }

    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for channel in Channel::ALL {
            if self.contains(channel) {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{channel}")?;
                first = false;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Top-level indicator error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The PWM channels were not initialised when the subsystem started.
    NotReady,
    /// One or more channels rejected a duty-cycle write.
    Pwm(ChannelMask),
    /// The blink queue was full; the newest request was dropped.
    QueueFull,
    /// Configuration is invalid.
    Config(&'static str),
    /// The OS refused to start an indicator thread.
    Spawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "PWM devices not ready"),
            Self::Pwm(mask) => write!(f, "PWM write failed on {mask}"),
            Self::QueueFull => write!(f, "blink queue full, request dropped"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Spawn => write!(f, "thread spawn failed"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ChannelMask> for Error {
    fn from(mask: ChannelMask) -> Self {
        Self::Pwm(mask)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_tracks_each_channel() {
        let mut mask = ChannelMask::empty();
        assert!(mask.is_empty());
        mask.insert(Channel::Green);
        assert!(mask.contains(Channel::Green));
        assert!(!mask.contains(Channel::Red));
        assert_eq!(mask.bits(), 0b010);
    }

    #[test]
    fn mask_display_lists_failed_channels() {
        let mut mask = ChannelMask::empty();
        mask.insert(Channel::Red);
        mask.insert(Channel::Blue);
        assert_eq!(Error::from(mask).to_string(), "PWM write failed on red+blue");
        assert_eq!(ChannelMask::empty().to_string(), "none");
    }
}
