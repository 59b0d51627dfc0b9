//! Procedural hue/brightness palette
//!
//! The palette is a `width x height` RGBA grid. The x axis walks a full hue
//! wheel in six linear ramps; the y axis fades from white at the top, through
//! the pure hue at the vertical midpoint, to black at the bottom.
//!
//! Pixels are produced by compositing three layers with 16-bit alpha-over
//! math: a white background, the hue row masked by a top alpha ramp, and a
//! black layer whose alpha ramps up over the lower half. The arithmetic is
//! bit-exact with the palette asset shipped by earlier releases, so stop
//! colors sampled from a generated buffer match those sampled from the PNG.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::color::Rgba;
use crate::error::{PhibarError, Result};
use crate::toroid::ToroidalAxis;

pub const DEFAULT_WIDTH: u32 = 1536;
pub const DEFAULT_HEIGHT: u32 = 511;

/// Positions on the hue wheel: six ramps of 256 steps
const WHEEL_STEPS: u64 = 6 * 256;

/// 16-bit channel maximum used by the compositing math
const M: u64 = 0xffff;

/// Immutable RGBA pixel grid (4 bytes per pixel, row-major)
#[derive(Clone, PartialEq, Eq)]
pub struct PaletteBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for PaletteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PaletteBuffer {
    /// Synthesize the palette for the given dimensions
    pub fn generate(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PhibarError::InvalidDimensions { width, height });
        }

        let hues: Vec<Rgba> = (0..width).map(|x| hue_at(x, width)).collect();
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

        for y in 0..height {
            let (top, bottom) = mask_alphas(y, height);
            let shade = Rgba::new(0, 0, 0, bottom);
            for &hue in &hues {
                let c = over(over_masked(Rgba::WHITE, hue, top), shade);
                pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }

        tracing::debug!(width, height, "Generated palette");
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap raw RGBA bytes; `None` if the length does not match
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if width > 0 && height > 0 && data.len() == width as usize * height as usize * 4 {
            Some(Self {
                width,
                height,
                pixels: data,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cyclic axis spanning the palette width
    #[inline]
    pub fn axis(&self) -> ToroidalAxis {
        ToroidalAxis::from_width(self.width)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixel_clamped(i64::from(x), i64::from(y)))
        } else {
            None
        }
    }

    /// Sample at a fractional column and integer row.
    ///
    /// The column is rounded to the nearest pixel; both coordinates are then
    /// clamped to the grid, so `x == width` (reachable by rounding) reads the
    /// last column instead of faulting.
    pub fn sample(&self, x: f64, y: i64) -> Rgba {
        // NaN casts to 0, infinities saturate
        self.pixel_clamped(x.round() as i64, y)
    }

    fn pixel_clamped(&self, x: i64, y: i64) -> Rgba {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        let p = &self.pixels[idx..idx + 4];
        Rgba::new(p[0], p[1], p[2], p[3])
    }

    /// Encode as an 8-bit RGBA PNG
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_png(BufWriter::new(File::create(path)?))?;
        tracing::info!(path = %path.display(), width = self.width, height = self.height, "Wrote palette asset");
        Ok(())
    }

    /// Load a precomputed palette asset (8-bit RGB or RGBA, palette images expanded)
    pub fn load_png(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut decoder = png::Decoder::new(BufReader::new(File::open(path)?));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(PhibarError::UnsupportedImage(format!(
                "bit depth {:?}",
                info.bit_depth
            )));
        }
        let data = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            other => {
                return Err(PhibarError::UnsupportedImage(format!("color type {:?}", other)));
            },
        };

        let palette = Self::from_rgba(info.width, info.height, data).ok_or_else(|| {
            PhibarError::UnsupportedImage(format!("truncated image data in {}", path.display()))
        })?;
        tracing::info!(path = %path.display(), width = palette.width, height = palette.height, "Loaded palette asset");
        Ok(palette)
    }
}

/// Pure hue for column `x` of a `width`-wide wheel.
///
/// The column is scaled onto 1536 wheel steps (identity at the default
/// width) and split into six ramps; within a ramp exactly one channel moves
/// while the others sit at 0 or 255. The moving channel is the wheel step
/// truncated to 8 bits, which is what makes consecutive ramps meet.
pub fn hue_at(x: u32, width: u32) -> Rgba {
    let step = u64::from(x) * WHEEL_STEPS / u64::from(width.max(1));
    let v = step as u8;
    match step / 256 {
        // red -> yellow
        0 => Rgba::opaque(255, v, 0),
        // yellow -> green
        1 => Rgba::opaque(255 - v, 255, 0),
        // green -> cyan
        2 => Rgba::opaque(0, 255, v),
        // cyan -> blue
        3 => Rgba::opaque(0, 255 - v, 255),
        // blue -> magenta
        4 => Rgba::opaque(v, 0, 255),
        // magenta -> red
        _ => Rgba::opaque(255, 0, 255 - v),
    }
}

/// Mask alphas for row `y`: (hue-over-white alpha, black overlay alpha).
///
/// Above the midpoint the hue fades in over white and no black is applied.
/// From the midpoint down the hue is fully opaque and black fades in.
/// At the default height of 511 these are `y` and `y - 255`.
pub fn mask_alphas(y: u32, height: u32) -> (u8, u8) {
    let half = height / 2;
    if y < half {
        ((u64::from(y) * 255 / u64::from(half)) as u8, 0)
    } else {
        let span = height - 1 - half;
        let bottom = if span == 0 {
            0
        } else {
            (u64::from(y - half) * 255 / u64::from(span)) as u8
        };
        (255, bottom)
    }
}

/// `src` over `dst` through a mask alpha, premultiplied 16-bit math.
fn over_masked(dst: Rgba, src: Rgba, mask: u8) -> Rgba {
    let ma = u64::from(mask) * 0x101;
    let sa = u64::from(src.a) * 0x101;
    let a = (M - sa * ma / M) * 0x101;
    let ch = |d: u8, s: u8| (((u64::from(d) * a + u64::from(s) * 0x101 * ma) / M) >> 8) as u8;
    Rgba::new(
        ch(dst.r, src.r),
        ch(dst.g, src.g),
        ch(dst.b, src.b),
        ch(dst.a, src.a),
    )
}

/// `src` over `dst` with no mask, premultiplied 16-bit math.
fn over(dst: Rgba, src: Rgba) -> Rgba {
    let a = (M - u64::from(src.a) * 0x101) * 0x101;
    let ch = |d: u8, s: u8| ((u64::from(d) * a / M + u64::from(s) * 0x101) >> 8) as u8;
    Rgba::new(
        ch(dst.r, src.r),
        ch(dst.g, src.g),
        ch(dst.b, src.b),
        ch(dst.a, src.a),
    )
}
