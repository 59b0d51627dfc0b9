//! Color model: RGB, CMYK, hex text and contrast colors
//!
//! All conversions work on 8-bit channels. CMYK uses the integer
//! subtractive conversion (truncating division) so values match
//! what common image libraries report for the same pixel.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{PhibarError, Result};

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Channel-wise complement at full opacity.
    ///
    /// Always distinguishable from `self`, so it is used for guide lines
    /// drawn on top of the sampled color.
    #[inline]
    pub fn negative(self) -> Self {
        Self::opaque(255 - self.r, 255 - self.g, 255 - self.b)
    }

    pub fn cmyk(self) -> Cmyk {
        Cmyk::from_rgb(self.r, self.g, self.b)
    }

    /// Upper-case `#RRGGBB`
    pub fn to_hex(self) -> String {
        let mut hex = String::with_capacity(7);
        self.write_hex(&mut hex);
        hex
    }

    /// Overwrite `out` with `#RRGGBB`, keeping its allocation
    pub fn write_hex(self, out: &mut String) {
        out.clear();
        let _ = write!(out, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b);
    }

    /// Parse `#RRGGBB` or `RRGGBB` (either case) into an opaque color
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PhibarError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PhibarError::InvalidHex(hex.to_string()))
        };
        Ok(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// `rgb(r, g, b)` display string
    pub fn rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::opaque(r, g, b)
    }
}

/// Subtractive color, each channel 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    /// Standard RGB -> CMYK.
    /// k = 255 - max(r, g, b); c/m/y scale the remaining headroom.
    /// Pure black has no headroom, so c = m = y = 0.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let w = u32::from(r.max(g).max(b));
        if w == 0 {
            return Self { c: 0, m: 0, y: 0, k: 255 };
        }
        let scale = |channel: u8| ((w - u32::from(channel)) * 255 / w) as u8;
        Self {
            c: scale(r),
            m: scale(g),
            y: scale(b),
            k: (255 - w) as u8,
        }
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmyk({}, {}, {}, {})", self.c, self.m, self.y, self.k)
    }
}
