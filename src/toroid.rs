//! Toroidal (cyclic) coordinate axis
//!
//! Stop positions live on a hue wheel with no hard edges: anything that
//! walks off one side of the palette re-enters on the other.

use crate::error::{PhibarError, Result};

/// A cyclic axis covering `[0, width)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToroidalAxis {
    width: f64,
}

impl ToroidalAxis {
    /// Create an axis; `width` must be positive and finite
    pub fn new(width: f64) -> Result<Self> {
        if width.is_finite() && width > 0.0 {
            Ok(Self { width })
        } else {
            Err(PhibarError::InvalidAxis(width))
        }
    }

    /// Axis over a pixel width; zero is treated as one
    pub(crate) fn from_width(width: u32) -> Self {
        Self {
            width: f64::from(width.max(1)),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Reduce `v` into `[0, width)`.
    ///
    /// Equivalent to adding or subtracting `width` until the value lands in
    /// range, so `width` itself maps to `0`. Non-finite input maps to `0`.
    #[inline]
    pub fn wrap(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return 0.0;
        }
        if (0.0..self.width).contains(&v) {
            return v;
        }
        let wrapped = v.rem_euclid(self.width);
        // rem_euclid of a tiny negative value can round up to exactly width
        if wrapped >= self.width {
            0.0
        } else {
            wrapped
        }
    }
}

/// Wrap `v` into `[0, max)`.
///
/// # Panics
/// Panics if `max` is not a positive finite number; a zero or negative
/// period has no valid range to wrap into.
#[inline]
pub fn wrap(v: f64, max: f64) -> f64 {
    assert!(
        max.is_finite() && max > 0.0,
        "wrap: max ({}) must be positive and finite",
        max
    );
    ToroidalAxis { width: max }.wrap(v)
}
