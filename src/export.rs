//! Palette export formats
//!
//! GIMP `.gpl` lists exactly the active stops. JASC `.pal` always has a
//! fixed number of slots; slots past the active stops are written black.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::stop::ColorStop;

pub const GPL_HEADER: &str = "GIMP Palette\nName: PhiBar\nColumns: 4\n#";
pub const PAL_HEADER: &str = "JASC-PAL\n0100";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Gpl,
    Pal,
}

impl ExportFormat {
    /// Pick a format from the file extension (`.pal` or anything else -> GPL)
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pal") => Self::Pal,
            _ => Self::Gpl,
        }
    }

    pub fn render(self, stops: &[ColorStop], pal_slots: usize) -> String {
        match self {
            Self::Gpl => gpl(stops),
            Self::Pal => pal(stops, pal_slots),
        }
    }
}

/// GIMP palette: one `R G B Index<i>` line per stop
pub fn gpl(stops: &[ColorStop]) -> String {
    let mut output = String::from(GPL_HEADER);
    for (i, stop) in stops.iter().enumerate() {
        let (r, g, b) = stop.rgb();
        let _ = write!(output, "\n{} {} {} Index{}", r, g, b, i);
    }
    output
}

/// JASC palette with `slots` entries, padded with `0 0 0`
pub fn pal(stops: &[ColorStop], slots: usize) -> String {
    let mut output = format!("{}\n{}", PAL_HEADER, slots);
    for i in 0..slots {
        let (r, g, b) = stops.get(i).map_or((0, 0, 0), ColorStop::rgb);
        let _ = write!(output, "\n{} {} {}", r, g, b);
    }
    output
}

/// Write `stops` to `path` in the format implied by its extension
pub fn write(path: impl AsRef<Path>, stops: &[ColorStop], pal_slots: usize) -> Result<ExportFormat> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path);
    fs::write(path, format.render(stops, pal_slots))?;
    tracing::info!(path = %path.display(), ?format, stops = stops.len(), "Exported palette");
    Ok(format)
}
