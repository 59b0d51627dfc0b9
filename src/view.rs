//! Frame composition for the picker window
//!
//! Layout, top to bottom: the palette, then a padded strip of swatches (one
//! per active stop). Each stop also gets a full-height guide line over the
//! palette in its negative color, and the sampled row is marked with a gray
//! horizontal line.

use crate::canvas::PixelBuffer;
use crate::config::{EngineConfig, Settings};
use crate::palette::PaletteBuffer;
use crate::stop::ColorStop;

/// Window background
pub const BACKGROUND: (u8, u8, u8) = (0x33, 0x33, 0x33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub palette_width: u32,
    pub palette_height: u32,
    pub output_height: u32,
    pub padding: u32,
}

impl Layout {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            palette_width: settings.width,
            palette_height: settings.height,
            output_height: settings.output_height,
            padding: settings.padding,
        }
    }

    /// Window size in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.palette_width,
            self.palette_height + self.output_height + self.padding * 2,
        )
    }

    /// Swatch rectangle `(x, y, w, h)` for stop `index` of `count`
    pub fn swatch(&self, index: usize, count: usize) -> (i32, i32, u32, u32) {
        let count = count.max(1) as u32;
        let gaps = self.padding * (count + 1);
        let w = self.palette_width.saturating_sub(gaps) / count;
        let x = self.padding + index as u32 * (w + self.padding);
        let y = self.palette_height + self.padding;
        (x as i32, y as i32, w, self.output_height)
    }
}

/// Compose one frame: background, palette, swatches, guides
pub fn render_frame(
    buffer: &mut PixelBuffer,
    layout: &Layout,
    palette: &PaletteBuffer,
    stops: &[ColorStop],
    config: &EngineConfig,
) {
    let (br, bg, bb) = BACKGROUND;
    buffer.clear(br, bg, bb);
    buffer.blit_palette(palette, 0, 0);

    let guide_bottom = layout.palette_height as i32 - 1;
    for (i, stop) in stops.iter().enumerate() {
        let guide = stop.negative();
        let x = stop.position().round() as i32;
        buffer.vline(x, 0, guide_bottom, guide.r, guide.g, guide.b);

        let (sx, sy, sw, sh) = layout.swatch(i, stops.len());
        let c = stop.color();
        buffer.fill_rect(sx, sy, sw, sh, c.r, c.g, c.b);
    }

    let gray = (config.brightness_y / 2).clamp(0, 255) as u8;
    buffer.hline(
        0,
        layout.palette_width as i32 - 1,
        config.brightness_y,
        gray,
        gray,
        gray,
    );
}
