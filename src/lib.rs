//! phibar: golden-ratio color stops over a procedural hue palette
//!
//! The engine is a pure function of an [`EngineConfig`] and a
//! [`PaletteBuffer`]: two seed positions are extended by golden-ratio steps,
//! wrapped onto the palette's hue wheel, sampled, and encoded as
//! RGB / CMYK / hex. Everything here is SDL-free; the window lives in the
//! binary behind the `gui` feature.

pub mod canvas;
pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod golden;
pub mod palette;
pub mod stop;
pub mod toroid;
pub mod util;
pub mod view;

pub use color::{Cmyk, Rgba};
pub use config::{EngineConfig, Settings};
pub use controls::{Command, Controls};
pub use error::{PhibarError, Result};
pub use export::ExportFormat;
pub use palette::PaletteBuffer;
pub use stop::{ColorStop, StopPool, StopState};
pub use toroid::{wrap, ToroidalAxis};
