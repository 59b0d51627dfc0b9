//! Color stops and the evaluation pass
//!
//! A pass walks the active stops strictly in index order:
//! seed (0 and 1) -> derive (golden step over the two previous raw values)
//! -> wrap onto the palette width -> sample the palette -> encode.
//! Derivation always uses the unwrapped `value` history so the golden
//! proportion survives crossing the palette edge.

use crate::color::{Cmyk, Rgba};
use crate::config::{EngineConfig, MIN_STOPS};
use crate::golden::GoldenSequence;
use crate::palette::PaletteBuffer;
use crate::toroid::ToroidalAxis;

/// Where a stop is in the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopState {
    /// Outside the active set; fields hold stale data
    #[default]
    Inert,
    /// Received a seed value (index 0 or 1)
    Seeded,
    /// Received a golden step from the two previous stops
    Derived,
    /// `position` computed
    Wrapped,
    /// `color` read from the palette
    Sampled,
    /// rgb / cmyk / hex / negative refreshed
    Encoded,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorStop {
    state: StopState,
    value: f64,
    position: f64,
    color: Rgba,
    cmyk: Cmyk,
    hex: String,
    negative: Rgba,
}

impl ColorStop {
    /// Raw position before wrapping; input to the golden recurrence
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// `value` wrapped into `[0, width)`
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn state(&self) -> StopState {
        self.state
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.color.rgb()
    }

    #[inline]
    pub fn cmyk(&self) -> Cmyk {
        self.cmyk
    }

    #[inline]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[inline]
    pub fn negative(&self) -> Rgba {
        self.negative
    }

    /// One-line readout: `#RRGGBB rgb(r, g, b) cmyk(c, m, y, k)`
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.hex, self.color.rgb_string(), self.cmyk)
    }

    fn seed(&mut self, value: f64) {
        self.value = value;
        self.state = StopState::Seeded;
    }

    fn derive(&mut self, value: f64) {
        self.value = value;
        self.state = StopState::Derived;
    }

    fn wrap(&mut self, axis: &ToroidalAxis) {
        self.position = axis.wrap(self.value);
        self.state = StopState::Wrapped;
    }

    fn sample(&mut self, palette: &PaletteBuffer, y: i64) {
        self.color = palette.sample(self.position, y);
        self.state = StopState::Sampled;
    }

    fn encode(&mut self) {
        self.cmyk = self.color.cmyk();
        self.color.write_hex(&mut self.hex);
        self.negative = self.color.negative();
        self.state = StopState::Encoded;
    }

    fn deactivate(&mut self) {
        self.state = StopState::Inert;
    }
}

/// Fixed-capacity arena of stops with a live active count.
///
/// Allocated once; evaluation never grows or shrinks it.
#[derive(Debug, Clone)]
pub struct StopPool {
    stops: Vec<ColorStop>,
    active: usize,
}

impl StopPool {
    /// Pool holding up to `capacity` stops (at least two)
    pub fn new(capacity: usize) -> Self {
        Self {
            stops: vec![ColorStop::default(); capacity.max(MIN_STOPS)],
            active: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.stops.len()
    }

    /// Number of stops computed by the last pass
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Stops computed by the last pass
    #[inline]
    pub fn active(&self) -> &[ColorStop] {
        &self.stops[..self.active]
    }

    /// Every slot, including inert ones
    #[inline]
    pub fn slots(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Run one evaluation pass and return the active stops.
    ///
    /// `active_count` is clamped to `[2, capacity]`. Slots past the active
    /// count are marked inert but keep their last values.
    pub fn evaluate(&mut self, config: &EngineConfig, palette: &PaletteBuffer) -> &[ColorStop] {
        let count = config.active_count.clamp(MIN_STOPS, self.capacity());
        let axis = palette.axis();
        let y = i64::from(config.brightness_y);
        let primary = f64::from(config.primary);
        let values = GoldenSequence::new(primary, primary + f64::from(config.distance));

        for (i, (stop, value)) in self.stops[..count].iter_mut().zip(values).enumerate() {
            if i < 2 {
                stop.seed(value);
            } else {
                stop.derive(value);
            }
            stop.wrap(&axis);
            stop.sample(palette, y);
            stop.encode();
        }
        for stop in &mut self.stops[count..] {
            stop.deactivate();
        }

        self.active = count;
        self.active()
    }

    /// Text block for the copy action, one stop per line
    pub fn copy_text(&self) -> String {
        self.active()
            .iter()
            .map(ColorStop::describe)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golden;
    use crate::palette::hue_at;

    fn palette() -> PaletteBuffer {
        PaletteBuffer::generate(1536, 511).unwrap()
    }

    fn config(primary: i32, distance: i32, active_count: usize) -> EngineConfig {
        EngineConfig {
            width: 1536,
            height: 511,
            brightness_y: 255,
            primary,
            distance,
            active_count,
        }
    }

    #[test]
    fn test_seeds_and_golden_third_stop() {
        let palette = palette();
        let mut pool = StopPool::new(16);
        let stops = pool.evaluate(&config(830, -200, 3), &palette);

        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].value(), 830.0);
        assert_eq!(stops[1].value(), 630.0);
        let expected = 630.0 - 200.0 / golden::PHI;
        assert!((stops[2].value() - expected).abs() < 1e-9);
        assert!((stops[2].value() - 506.39).abs() < 0.01);
        for stop in stops {
            assert_eq!(stop.position(), stop.value());
            assert_eq!(stop.state(), StopState::Encoded);
        }
    }

    #[test]
    fn test_sampled_colors_come_from_palette() {
        let palette = palette();
        let mut pool = StopPool::new(16);
        let stops = pool.evaluate(&config(830, -200, 3), &palette);

        assert_eq!(stops[0].color(), hue_at(830, 1536));
        assert_eq!(stops[1].color(), hue_at(630, 1536));
        assert_eq!(stops[2].color(), hue_at(506, 1536));
        assert_eq!(stops[0].hex(), stops[0].color().to_hex());
        assert_eq!(stops[0].negative(), stops[0].color().negative());
    }

    #[test]
    fn test_recurrence_uses_unwrapped_values() {
        let palette = palette();
        let mut pool = StopPool::new(8);
        let stops = pool.evaluate(&config(1500, 300, 5), &palette);

        assert_eq!(stops[1].value(), 1800.0);
        assert_eq!(stops[1].position(), 264.0);
        for i in 2..stops.len() {
            let expected = golden::next(stops[i - 2].value(), stops[i - 1].value());
            assert_eq!(stops[i].value(), expected);
            assert!(stops[i].position() >= 0.0 && stops[i].position() < 1536.0);
        }
    }

    #[test]
    fn test_negative_distance_wraps_below_zero() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        let stops = pool.evaluate(&config(100, -300, 2), &palette);
        assert_eq!(stops[1].value(), -200.0);
        assert_eq!(stops[1].position(), 1336.0);
    }

    #[test]
    fn test_zero_distance_collapses_stops() {
        let palette = palette();
        let mut pool = StopPool::new(6);
        let stops = pool.evaluate(&config(400, 0, 6), &palette);
        assert!(stops.iter().all(|s| s.value() == 400.0));
    }

    #[test]
    fn test_active_count_is_clamped_to_pool() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        assert_eq!(pool.evaluate(&config(830, -200, 99), &palette).len(), 4);
        assert_eq!(pool.evaluate(&config(830, -200, 0), &palette).len(), 2);
    }

    #[test]
    fn test_shrinking_active_count_marks_tail_inert() {
        let palette = palette();
        let mut pool = StopPool::new(8);
        pool.evaluate(&config(830, -200, 6), &palette);
        let fifth = pool.slots()[4].value();
        pool.evaluate(&config(830, -200, 3), &palette);

        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.slots()[4].state(), StopState::Inert);
        assert_eq!(pool.slots()[4].value(), fifth);
        assert_eq!(pool.capacity(), 8);
    }

    #[test]
    fn test_untouched_slots_start_inert() {
        let palette = palette();
        let mut pool = StopPool::new(16);
        pool.evaluate(&config(830, -200, 3), &palette);
        assert!(pool.slots()[3..].iter().all(|s| s.state() == StopState::Inert));
    }

    #[test]
    fn test_out_of_range_brightness_is_clamped() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        let mut cfg = config(830, -200, 2);
        cfg.brightness_y = -50;
        assert_eq!(pool.evaluate(&cfg, &palette)[0].color(), Rgba::WHITE);
        cfg.brightness_y = 4000;
        assert_eq!(pool.evaluate(&cfg, &palette)[0].color(), Rgba::BLACK);
    }

    #[test]
    fn test_encoded_fields_follow_color_changes() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        pool.evaluate(&config(0, 512, 2), &palette);
        assert_eq!(pool.active()[0].hex(), "#FF0000");
        assert_eq!(pool.active()[1].hex(), "#00FF00");

        pool.evaluate(&config(1024, 512, 2), &palette);
        assert_eq!(pool.active()[0].hex(), "#0000FF");
        assert_eq!(pool.active()[0].cmyk(), Cmyk { c: 255, m: 255, y: 0, k: 0 });
        assert_eq!(pool.active()[1].hex(), "#FF0000");
    }

    #[test]
    fn test_copy_text_lists_active_stops() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        pool.evaluate(&config(0, 512, 2), &palette);
        assert_eq!(
            pool.copy_text(),
            "#FF0000 rgb(255, 0, 0) cmyk(0, 255, 255, 0)\n#00FF00 rgb(0, 255, 0) cmyk(255, 0, 255, 0)"
        );
    }

    #[test]
    fn test_values_follow_golden_sequence() {
        let palette = palette();
        let mut pool = StopPool::new(16);
        let stops = pool.evaluate(&config(1200, 450, 9), &palette);
        let expected: Vec<f64> = GoldenSequence::new(1200.0, 1650.0).take(9).collect();
        let values: Vec<f64> = stops.iter().map(ColorStop::value).collect();
        assert_eq!(values, expected);
        assert_eq!(stops[1].state(), StopState::Encoded);
    }

    #[test]
    fn test_hex_buffer_reused_across_passes() {
        let palette = palette();
        let mut pool = StopPool::new(4);
        pool.evaluate(&config(0, 512, 2), &palette);
        let before = pool.active()[0].hex().as_ptr();

        pool.evaluate(&config(1024, 512, 2), &palette);
        assert_eq!(pool.active()[0].hex(), "#0000FF");
        assert_eq!(pool.active()[0].hex().as_ptr(), before);
    }
}
