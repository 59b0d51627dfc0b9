//! Settings file and per-pass engine configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PhibarError, Result};
use crate::palette::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Fewest stops that still define a golden step (two seeds)
pub const MIN_STOPS: usize = 2;

/// Largest accepted palette width or height
pub const MAX_DIMENSION: u32 = 16_384;

/// Pixel extent as a signed coordinate, saturating at `i32::MAX`
pub(crate) fn signed_extent(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}

/// User-tunable settings, loaded from a JSON file.
/// Every field is optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Palette width in pixels (one full hue wheel)
    pub width: u32,
    /// Palette height in pixels (white -> hue -> black)
    pub height: u32,
    /// Height of the swatch strip below the palette
    pub output_height: u32,
    pub padding: u32,

    pub primary: i32,
    pub distance: i32,
    pub brightness: i32,

    pub step: i32,
    pub step_min: i32,
    pub step_max: i32,
    /// Step multiplier while the fast modifier is held
    pub fast_multiplier: i32,

    pub stops: usize,
    pub stop_min: usize,
    pub stop_max: usize,

    /// Entries written to a JASC PAL export
    pub pal_slots: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            output_height: 300,
            padding: 20,
            primary: 830,
            distance: -200,
            brightness: 230,
            step: 10,
            step_min: 1,
            step_max: 50,
            fast_multiplier: 10,
            stops: 3,
            stop_min: 3,
            stop_max: 16,
            pal_slots: 16,
        }
    }
}

impl Settings {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_DIMENSION
            || self.height > MAX_DIMENSION
        {
            return Err(PhibarError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.stop_min < MIN_STOPS {
            return Err(PhibarError::InvalidSettings(format!(
                "stop_min ({}) must be at least {}",
                self.stop_min, MIN_STOPS
            )));
        }
        if self.stop_min > self.stop_max {
            return Err(PhibarError::InvalidSettings(format!(
                "stop_min ({}) exceeds stop_max ({})",
                self.stop_min, self.stop_max
            )));
        }
        if self.step_min < 1 || self.step_min > self.step_max {
            return Err(PhibarError::InvalidSettings(format!(
                "step range {}..={} is empty or non-positive",
                self.step_min, self.step_max
            )));
        }
        if self.fast_multiplier < 1 {
            return Err(PhibarError::InvalidSettings(format!(
                "fast_multiplier ({}) must be positive",
                self.fast_multiplier
            )));
        }
        Ok(())
    }

    /// Initial engine configuration, clamped to these settings' bounds
    pub fn engine_config(&self) -> EngineConfig {
        let width = signed_extent(self.width);
        EngineConfig {
            width: self.width,
            height: self.height,
            brightness_y: self.brightness.min(signed_extent(self.height) - 1).max(0),
            primary: self.primary.rem_euclid(width.max(1)),
            distance: self.distance.clamp(-width, width),
            active_count: self.stops.max(self.stop_min).min(self.stop_max),
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Inputs of one evaluation pass.
///
/// Owned by the caller and mutated between passes (see `Controls`); the
/// engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    /// Palette row sampled by every stop
    pub brightness_y: i32,
    /// First seed position
    pub primary: i32,
    /// Signed offset of the second seed from `primary`
    pub distance: i32,
    /// Number of stops to evaluate
    pub active_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Settings::default().engine_config()
    }
}
