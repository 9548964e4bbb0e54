//! Interactive smoke test for the platform layer.
//!
//! Esc quits, F11 toggles fullscreen, F2 toggles the cursor. Every key
//! press is logged and the frame rate is reported once per second.

use gt_platform::input::Key;
use gt_platform::{log_fast, log_success, AppControl, Engine, EngineConfig, Game};

#[derive(Default)]
struct Sandbox {
    fullscreen: bool,
    cursor_visible: bool,
    next_report: f64,
}

impl Game for Sandbox {
    fn init(&mut self, engine: &mut Engine) {
        self.cursor_visible = true;
        self.next_report = engine.time() + 1.0;
    }

    fn start(&mut self, engine: &mut Engine) {
        log_success!(
            "sandbox running on {} ({}x{})",
            engine.window.backend_name(),
            engine.window.width,
            engine.window.height
        );
    }

    fn update(&mut self, engine: &mut Engine, _dt: f32) -> AppControl {
        for &key in Key::ALL {
            if engine.input.is_pressed(key) {
                log::info!("{key} pressed");
            }
        }

        if engine.input.is_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if engine.input.is_pressed(Key::F11) {
            self.fullscreen = !self.fullscreen;
            engine.set_fullscreen(self.fullscreen);
        }
        if engine.input.is_pressed(Key::F2) {
            self.cursor_visible = !self.cursor_visible;
            engine.set_cursor_visible(self.cursor_visible);
        }

        let now = engine.time();
        if now >= self.next_report {
            self.next_report = now + 1.0;
            log_fast!("{} fps", engine.frame_rate());
        }

        AppControl::Continue
    }

    fn stop(&mut self, _engine: &mut Engine) {
        log::info!("sandbox closing");
    }
}

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::default().with_window("GT Sandbox", 1280, 768).from_env();
    gt_platform::run(config, Sandbox::default())
}
