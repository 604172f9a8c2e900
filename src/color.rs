//! Colors and the index → color lookup table.
//!
//! Listeners pick a small integer index from the configuration for every
//! device state (battery high, USB connected, layer active, ...) and the
//! table turns it into a 16-bit-per-channel PWM triplet.
//!
//! | Index | Colour     | Index | Colour     |
//! |-------|------------|-------|------------|
//! | 0     | black      | 6     | cyan       |
//! | 1     | red        | 7     | white      |
//! | 2     | green      | 8     | dark red   |
//! | 3     | yellow     | 9     | dark green |
//! | 4     | blue       | 10    | dark blue  |
//! | 5     | magenta    | 11    | orange     |

use serde::{Deserialize, Serialize};

const FULL: u16 = 0xFFFF;
const HALF: u16 = 0x8000;

/// PWM colour, one duty cycle per channel (0 = off, `0xFFFF` = full).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(FULL, 0, 0);
    pub const GREEN: Color = Color::new(0, FULL, 0);
    pub const BLUE: Color = Color::new(0, 0, FULL);
    pub const YELLOW: Color = Color::new(FULL, FULL, 0);
    pub const MAGENTA: Color = Color::new(FULL, 0, FULL);
    pub const CYAN: Color = Color::new(0, FULL, FULL);
    pub const WHITE: Color = Color::new(FULL, FULL, FULL);
    pub const DARK_RED: Color = Color::new(HALF, 0, 0);
    pub const DARK_GREEN: Color = Color::new(0, HALF, 0);
    pub const DARK_BLUE: Color = Color::new(0, 0, HALF);
    pub const ORANGE: Color = Color::new(FULL, HALF, 0);

    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    pub const fn is_off(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Pack into the low 48 bits of a `u64` (for atomic snapshots).
    pub const fn pack(self) -> u64 {
        ((self.r as u64) << 32) | ((self.g as u64) << 16) | self.b as u64
    }

    /// Inverse of [`pack`](Self::pack); bits above 48 are ignored.
    pub const fn unpack(raw: u64) -> Self {
        Self {
            r: (raw >> 32) as u16,
            g: (raw >> 16) as u16,
            b: raw as u16,
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "R:{:04X} G:{:04X} B:{:04X}", self.r, self.g, self.b)
    }
}

/// Built-in palette, indexed by the configuration's colour indices.
pub const BUILTIN_COLORS: [Color; 12] = [
    Color::BLACK,
    Color::RED,
    Color::GREEN,
    Color::YELLOW,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
    Color::WHITE,
    Color::DARK_RED,
    Color::DARK_GREEN,
    Color::DARK_BLUE,
    Color::ORANGE,
];

/// Total lookup from colour index to [`Color`].
#[derive(Debug, Clone, Copy)]
pub struct ColorTable {
    colors: &'static [Color],
}

impl ColorTable {
    /// Use a board-specific palette instead of [`BUILTIN_COLORS`].
    pub const fn new(colors: &'static [Color]) -> Self {
        Self { colors }
    }

    /// Colour at `index`, or black for any index outside the table.
    pub fn resolve(&self, index: u8) -> Color {
        self.colors
            .get(index as usize)
            .copied()
            .unwrap_or(Color::BLACK)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Whether `index` names a real table entry.
    pub fn contains(&self, index: u8) -> bool {
        (index as usize) < self.colors.len()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new(&BUILTIN_COLORS)
    }
}
