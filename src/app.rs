//! Interactive picker session: SDL events in, frames out

use std::path::PathBuf;
use std::time::Duration;

use phibar::canvas::PixelBuffer;
use phibar::util::FpsCounter;
use phibar::view::{render_frame, Layout};
use phibar::{
    export, Command, Controls, EngineConfig, ExportFormat, PaletteBuffer, Settings, StopPool,
};
use sdl2::keyboard::Keycode;

use crate::display::{Display, InputEvent, RenderTarget};

/// What a single input event asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Engine(Command),
    Export,
    Copy,
    Fullscreen,
    Quit,
}

/// Map a window event to a session action.
/// Keys act on release; Ctrl also reports its press for the modifier.
fn action_for(event: &InputEvent) -> Option<Action> {
    let action = match *event {
        InputEvent::Quit => Action::Quit,
        InputEvent::KeyDown(Keycode::LCtrl | Keycode::RCtrl) => {
            Action::Engine(Command::Modifier(true))
        },
        InputEvent::KeyUp(key) => match key {
            Keycode::LCtrl | Keycode::RCtrl => Action::Engine(Command::Modifier(false)),
            Keycode::Escape => Action::Quit,
            Keycode::F => Action::Fullscreen,
            Keycode::E => Action::Export,
            Keycode::C => Action::Copy,
            Keycode::Equals => Action::Engine(Command::AdjustStops(1)),
            Keycode::Minus => Action::Engine(Command::AdjustStops(-1)),
            Keycode::RightBracket => Action::Engine(Command::AdjustStep(1)),
            Keycode::LeftBracket => Action::Engine(Command::AdjustStep(-1)),
            Keycode::Up => Action::Engine(Command::MoveDistance(1)),
            Keycode::Down => Action::Engine(Command::MoveDistance(-1)),
            Keycode::Left => Action::Engine(Command::MovePrimary(-1)),
            Keycode::Right => Action::Engine(Command::MovePrimary(1)),
            Keycode::PageUp => Action::Engine(Command::MoveBrightness(-1)),
            Keycode::PageDown => Action::Engine(Command::MoveBrightness(1)),
            _ => return None,
        },
        InputEvent::MouseDown { x, y } => Action::Engine(Command::PointerDown { x, y }),
        InputEvent::MouseMove { x, y } => Action::Engine(Command::PointerMove { x, y }),
        InputEvent::MouseUp { x, y } => Action::Engine(Command::PointerUp { x, y }),
        InputEvent::Wheel { x, y } => {
            // Only one axis per event in practice; prefer the vertical one
            if y != 0 {
                Action::Engine(Command::WheelY(y))
            } else if x != 0 {
                Action::Engine(Command::WheelX(x))
            } else {
                return None;
            }
        },
        InputEvent::KeyDown(_) => return None,
    };
    Some(action)
}

/// Picker state shared by the event handlers and the frame loop
struct Session {
    controls: Controls,
    config: EngineConfig,
    pool: StopPool,
    palette: PaletteBuffer,
    export_path: PathBuf,
}

impl Session {
    fn new(settings: Settings, palette: PaletteBuffer, export_path: PathBuf) -> Self {
        Self {
            config: settings.engine_config(),
            pool: StopPool::new(settings.stop_max),
            controls: Controls::new(settings),
            palette,
            export_path,
        }
    }

    /// Export and copy re-evaluate first so commands earlier in the same
    /// event batch are reflected
    fn export(&mut self) -> phibar::Result<ExportFormat> {
        let pal_slots = self.controls.settings().pal_slots;
        self.pool.evaluate(&self.config, &self.palette);
        export::write(&self.export_path, self.pool.active(), pal_slots)
    }

    fn copy_text(&mut self) -> String {
        self.pool.evaluate(&self.config, &self.palette);
        self.pool.copy_text()
    }
}

pub fn run(settings: Settings, palette: PaletteBuffer, export_path: PathBuf) -> anyhow::Result<()> {
    let layout = Layout::from_settings(&settings);
    let (width, height) = layout.screen_size();

    let (mut display, texture_creator) =
        Display::with_options("PhiBar", width, height, true).map_err(anyhow::Error::msg)?;
    let mut target =
        RenderTarget::with_size(&texture_creator, width, height).map_err(anyhow::Error::msg)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    let mut session = Session::new(settings, palette, export_path);
    let mut fps_counter = FpsCounter::new(60);

    tracing::info!(width, height, export = %session.export_path.display(), "Picker started");

    'main: loop {
        fps_counter.tick();

        for event in display.poll_events() {
            let Some(action) = action_for(&event) else {
                continue;
            };
            match action {
                Action::Quit => break 'main,
                Action::Engine(command) => {
                    session.controls.apply(&mut session.config, command);
                },
                Action::Fullscreen => {
                    if let Err(e) = display.toggle_fullscreen() {
                        tracing::warn!(error = %e, "Failed to toggle fullscreen");
                    }
                },
                Action::Export => {
                    if let Err(e) = session.export() {
                        tracing::warn!(error = %e, path = %session.export_path.display(), "Export failed");
                    }
                },
                Action::Copy => {
                    let text = session.copy_text();
                    tracing::info!(stops = session.pool.active_count(), "Copied stop colors");
                    println!("{}", text);
                },
            }
        }

        let stops = session.pool.evaluate(&session.config, &session.palette);
        if fps_counter.report_due(Duration::from_secs(5)) {
            tracing::debug!(
                fps = fps_counter.avg_fps() as u32,
                frame_ms = fps_counter.avg_frame_time_ms(),
                step = session.controls.step(),
                stops = stops.len(),
                "Frame stats"
            );
        }

        render_frame(&mut buffer, &layout, &session.palette, stops, &session.config);
        display.present(&mut target, &buffer).map_err(anyhow::Error::msg)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_act_on_release() {
        assert_eq!(action_for(&InputEvent::KeyDown(Keycode::Left)), None);
        assert_eq!(
            action_for(&InputEvent::KeyUp(Keycode::Left)),
            Some(Action::Engine(Command::MovePrimary(-1)))
        );
        assert_eq!(action_for(&InputEvent::KeyUp(Keycode::E)), Some(Action::Export));
    }

    #[test]
    fn test_ctrl_toggles_modifier() {
        assert_eq!(
            action_for(&InputEvent::KeyDown(Keycode::LCtrl)),
            Some(Action::Engine(Command::Modifier(true)))
        );
        assert_eq!(
            action_for(&InputEvent::KeyUp(Keycode::RCtrl)),
            Some(Action::Engine(Command::Modifier(false)))
        );
    }

    #[test]
    fn test_wheel_prefers_vertical_axis() {
        assert_eq!(
            action_for(&InputEvent::Wheel { x: 0, y: -2 }),
            Some(Action::Engine(Command::WheelY(-2)))
        );
        assert_eq!(
            action_for(&InputEvent::Wheel { x: 1, y: 0 }),
            Some(Action::Engine(Command::WheelX(1)))
        );
        assert_eq!(action_for(&InputEvent::Wheel { x: 0, y: 0 }), None);
    }

    fn session(export_path: PathBuf) -> Session {
        let palette = PaletteBuffer::generate(1536, 511).unwrap();
        Session::new(Settings::default(), palette, export_path)
    }

    #[test]
    fn test_copy_reflects_commands_from_same_batch() {
        let mut session = session(PathBuf::from("unused.gpl"));
        session.pool.evaluate(&session.config, &session.palette);
        session.controls.apply(&mut session.config, Command::AdjustStops(1));
        assert_eq!(session.copy_text().lines().count(), 4);
    }

    #[test]
    fn test_export_reflects_commands_from_same_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.gpl");
        let mut session = session(path.clone());
        session.pool.evaluate(&session.config, &session.palette);
        session.controls.apply(&mut session.config, Command::AdjustStops(1));
        session.controls.apply(&mut session.config, Command::SetPrimary(0));
        session.controls.apply(&mut session.config, Command::SetBrightness(255));

        assert_eq!(session.export().unwrap(), ExportFormat::Gpl);
        let text = std::fs::read_to_string(&path).unwrap();
        let entries: Vec<&str> = text.lines().filter(|line| line.contains("Index")).collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], "255 0 0 Index0");
    }
}
