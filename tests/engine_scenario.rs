//! End-to-end passes through the public API: palette -> stops -> files

use phibar::{
    export, golden, Command, Controls, EngineConfig, ExportFormat, PaletteBuffer, Settings,
    StopPool, StopState,
};
use pretty_assertions::assert_eq;

fn default_palette() -> PaletteBuffer {
    PaletteBuffer::generate(1536, 511).unwrap()
}

#[test]
fn default_session_three_stops() {
    let palette = default_palette();
    let config = EngineConfig::default();
    let mut pool = StopPool::new(16);
    let stops = pool.evaluate(&config, &palette);

    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].value(), 830.0);
    assert_eq!(stops[1].value(), 630.0);
    let third = 630.0 + (630.0 - 830.0) / golden::PHI;
    assert!((stops[2].value() - third).abs() < 1e-9);
    assert!((stops[2].value() - 506.39).abs() < 0.01);

    for stop in stops {
        // All inside [0, 1536): wrapping leaves them alone
        assert_eq!(stop.position(), stop.value());
        assert_eq!(stop.state(), StopState::Encoded);
        let expected = palette.sample(stop.position(), 230);
        assert_eq!(stop.color(), expected);
        assert_eq!(stop.hex(), expected.to_hex());
        assert_eq!(stop.cmyk(), expected.cmyk());
        assert_eq!(stop.negative(), expected.negative());
    }
}

#[test]
fn stops_past_the_edge_wrap_but_keep_raw_history() {
    let palette = default_palette();
    let config = EngineConfig {
        primary: 1500,
        distance: 100,
        active_count: 5,
        ..EngineConfig::default()
    };
    let mut pool = StopPool::new(8);
    let stops = pool.evaluate(&config, &palette);

    assert_eq!(stops[1].value(), 1600.0);
    assert_eq!(stops[1].position(), 64.0);
    for pair in stops.windows(3) {
        let expected = golden::next(pair[0].value(), pair[1].value());
        assert!((pair[2].value() - expected).abs() < 1e-9);
    }
    for stop in stops {
        assert!(stop.position() >= 0.0 && stop.position() < 1536.0);
    }
    assert!(pool.slots()[5..].iter().all(|s| s.state() == StopState::Inert));
}

#[test]
fn commands_then_export_both_formats() {
    let palette = default_palette();
    let settings = Settings::default();
    let pal_slots = settings.pal_slots;
    let mut config = settings.engine_config();
    let mut controls = Controls::new(settings);

    for line in ["primary 0", "distance 512", "brightness 255", "more"] {
        let command = Command::parse(line).unwrap();
        controls.apply(&mut config, command);
    }
    assert_eq!(config.active_count, 4);

    let mut pool = StopPool::new(16);
    pool.evaluate(&config, &palette);
    assert_eq!(pool.active()[0].rgb(), (255, 0, 0));
    assert_eq!(pool.active()[1].rgb(), (0, 255, 0));

    let dir = tempfile::tempdir().unwrap();

    let gpl_path = dir.path().join("stops.gpl");
    let format = export::write(&gpl_path, pool.active(), pal_slots).unwrap();
    assert_eq!(format, ExportFormat::Gpl);
    let gpl = std::fs::read_to_string(&gpl_path).unwrap();
    let lines: Vec<&str> = gpl.lines().collect();
    assert_eq!(&lines[..4], &["GIMP Palette", "Name: PhiBar", "Columns: 4", "#"]);
    assert_eq!(lines.len(), 4 + 4);
    assert_eq!(lines[4], "255 0 0 Index0");
    assert_eq!(lines[5], "0 255 0 Index1");

    let pal_path = dir.path().join("stops.PAL");
    let format = export::write(&pal_path, pool.active(), pal_slots).unwrap();
    assert_eq!(format, ExportFormat::Pal);
    let pal = std::fs::read_to_string(&pal_path).unwrap();
    let lines: Vec<&str> = pal.lines().collect();
    assert_eq!(&lines[..3], &["JASC-PAL", "0100", "16"]);
    assert_eq!(lines.len(), 3 + 16);
    assert_eq!(lines[3], "255 0 0");
    assert!(lines[3 + 4..].iter().all(|line| *line == "0 0 0"));
}
