//! Input commands and the clamping layer over `EngineConfig`
//!
//! Front ends translate whatever input they have (keys, mouse, a text line)
//! into `Command`s; `Controls` applies them to the engine configuration and
//! keeps every field inside its configured bounds.

use crate::config::{signed_extent, EngineConfig, Settings};

/// Commands understood by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the primary stop by one step (negative = left)
    MovePrimary(i32),
    /// Change the seed distance by one step (negative = shorter)
    MoveDistance(i32),
    /// Move the sampling row by one step (negative = up, brighter)
    MoveBrightness(i32),
    /// Horizontal wheel notches
    WheelX(i32),
    /// Vertical wheel notches
    WheelY(i32),
    /// Grow or shrink the step size
    AdjustStep(i32),
    /// Add or remove stops
    AdjustStops(i32),
    SetPrimary(i32),
    SetDistance(i32),
    SetBrightness(i32),
    SetStops(usize),
    /// Fast-step modifier held or released
    Modifier(bool),
    PointerDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
}

impl Command {
    /// Parse a text command such as `left`, `darker`, `stops 5` or `primary 830`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let arg = words.next();
        if words.next().is_some() {
            return None;
        }

        match (head, arg) {
            ("left", None) => Some(Self::MovePrimary(-1)),
            ("right", None) => Some(Self::MovePrimary(1)),
            ("up" | "wider", None) => Some(Self::MoveDistance(1)),
            ("down" | "narrower", None) => Some(Self::MoveDistance(-1)),
            ("brighter", None) => Some(Self::MoveBrightness(-1)),
            ("darker", None) => Some(Self::MoveBrightness(1)),
            ("more" | "+", None) => Some(Self::AdjustStops(1)),
            ("fewer" | "-", None) => Some(Self::AdjustStops(-1)),
            ("step+", None) => Some(Self::AdjustStep(1)),
            ("step-", None) => Some(Self::AdjustStep(-1)),
            ("primary", Some(n)) => n.parse().ok().map(Self::SetPrimary),
            ("distance", Some(n)) => n.parse().ok().map(Self::SetDistance),
            ("brightness", Some(n)) => n.parse().ok().map(Self::SetBrightness),
            ("stops", Some(n)) => n.parse().ok().map(Self::SetStops),
            _ => None,
        }
    }
}

/// Configuration layer: owns step size, modifier and drag state
#[derive(Debug, Clone)]
pub struct Controls {
    settings: Settings,
    step: i32,
    fast: bool,
    dragging: bool,
}

impl Controls {
    pub fn new(settings: Settings) -> Self {
        let step = settings.step.min(settings.step_max).max(settings.step_min);
        Self {
            settings,
            step,
            fast: false,
            dragging: false,
        }
    }

    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Step multiplier from the fast modifier
    fn modifier(&self) -> i32 {
        if self.fast {
            self.settings.fast_multiplier
        } else {
            1
        }
    }

    fn in_palette(&self, config: &EngineConfig, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < config.width && (y as u32) < config.height
    }

    /// Apply one command. Returns true if the engine configuration changed.
    pub fn apply(&mut self, config: &mut EngineConfig, command: Command) -> bool {
        let before = *config;
        let stride = self.step * self.modifier();

        match command {
            Command::MovePrimary(dir) => {
                if !self.dragging {
                    config.primary += dir * stride;
                }
            },
            Command::MoveDistance(dir) => config.distance += dir * stride,
            Command::MoveBrightness(dir) => {
                if !self.dragging {
                    config.brightness_y += dir * stride;
                }
            },
            // Wheel up shortens the distance and raises the sampling row
            Command::WheelX(notches) => config.distance -= notches * self.step,
            Command::WheelY(notches) => config.brightness_y -= notches * stride,
            Command::AdjustStep(dir) => {
                self.step = (self.step + dir * self.modifier())
                    .clamp(self.settings.step_min, self.settings.step_max);
            },
            Command::AdjustStops(dir) => {
                config.active_count = config.active_count.saturating_add_signed(dir as isize);
            },
            Command::SetPrimary(v) => config.primary = v.rem_euclid(signed_extent(config.width).max(1)),
            Command::SetDistance(v) => config.distance = v,
            Command::SetBrightness(v) => config.brightness_y = v,
            Command::SetStops(n) => config.active_count = n,
            Command::Modifier(held) => self.fast = held,
            Command::PointerDown { x, y } => {
                if self.in_palette(config, x, y) {
                    self.dragging = true;
                    config.primary = x;
                    config.brightness_y = y;
                }
            },
            Command::PointerMove { x, y } => {
                if self.dragging {
                    config.brightness_y = y;
                    config.distance = x - config.primary;
                }
            },
            Command::PointerUp { x, .. } => {
                if self.dragging {
                    self.dragging = false;
                    config.distance = x - config.primary;
                }
            },
        }

        self.clamp(config);
        let changed = *config != before;
        if changed {
            tracing::trace!(?command, ?config, "Config updated");
        }
        changed
    }

    /// Pull every field back into its configured range
    pub fn clamp(&self, config: &mut EngineConfig) {
        let width = signed_extent(config.width);
        let height = signed_extent(config.height);

        config.active_count = config
            .active_count
            .min(self.settings.stop_max)
            .max(self.settings.stop_min);
        config.distance = config.distance.clamp(-width, width);
        config.brightness_y = config.brightness_y.clamp(0, (height - 1).max(0));
        // A single wrap is enough: primary moves at most one stride per command
        if config.primary < 0 {
            config.primary += width;
        } else if config.primary > width {
            config.primary -= width;
        }
    }
}
