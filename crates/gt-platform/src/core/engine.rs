use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::input::InputState;
use crate::time::FrameTimer;
use crate::window::{WindowApi, WindowBackend};

/// Window, input and timer state shared with game code.
pub struct Engine {
    pub window: WindowApi,
    pub input: InputState,
    pub timer: FrameTimer,
}

impl Engine {
    /// Opens the window described by `config` and starts the engine clock.
    pub fn init(config: &EngineConfig) -> Result<Self> {
        let timer = FrameTimer::new();
        let window = WindowApi::create(&config.window, config.backend, config.verbose_modules)
            .with_context(|| format!("failed to open window with `{}` backend", config.backend))?;
        Ok(Self::assemble(window, timer, config))
    }

    /// Builds an engine around an already opened backend.
    pub fn with_backend(config: &EngineConfig, backend: Box<dyn WindowBackend>) -> Self {
        let timer = FrameTimer::new();
        let window = WindowApi::from_backend(backend, &config.window);
        Self::assemble(window, timer, config)
    }

    fn assemble(window: WindowApi, mut timer: FrameTimer, config: &EngineConfig) -> Self {
        timer.set_target_fps(config.target_fps);
        Self { window, input: InputState::default(), timer }
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn request_close(&mut self) {
        self.window.request_close();
    }

    /// Starts frame timing and drains the window's event queue into `input`.
    pub fn begin_frame(&mut self) {
        self.timer.begin_frame();
        self.window.update(&mut self.input);
    }

    /// Paces the frame to the target rate. Returns the frame duration in seconds.
    pub fn end_frame(&mut self) -> f64 {
        self.timer.end_frame()
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window.set_fullscreen(fullscreen);
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.window.set_cursor_visible(visible);
    }

    pub fn set_target_fps(&mut self, target: u32) {
        self.timer.set_target_fps(target);
    }

    /// Engine time in seconds.
    pub fn time(&self) -> f64 {
        self.timer.time()
    }

    pub fn wait(&self, duration: Duration) {
        self.timer.wait(duration);
    }

    pub fn delta_time(&self) -> f64 {
        self.timer.delta_time()
    }

    pub fn frame_rate(&self) -> u32 {
        self.timer.frame_rate()
    }

    /// Closes the window.
    pub fn shutdown(&mut self) {
        self.window.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::window::{BackendKind, HeadlessEvent, HeadlessWindow};

    fn config() -> EngineConfig {
        EngineConfig { target_fps: 0, backend: BackendKind::Headless, ..EngineConfig::default() }
    }

    #[test]
    fn init_with_headless_backend() {
        let engine = Engine::init(&config()).unwrap();
        assert_eq!(engine.window.backend_name(), "headless");
        assert_eq!(engine.timer.target_frame_time(), 0.0);
        assert!(!engine.should_close());
    }

    #[test]
    fn frame_cycle_updates_input_and_timer() {
        let backend = HeadlessWindow::scripted([vec![HeadlessEvent::from(InputEvent::pressed(Key::Enter))]]);
        let mut engine = Engine::with_backend(&config(), Box::new(backend));

        engine.begin_frame();
        assert!(engine.input.is_pressed(Key::Enter));
        let dt = engine.end_frame();

        assert!(dt >= 0.0);
        assert_eq!(engine.delta_time(), dt);
        assert_eq!(engine.timer.frame_index(), 1);
    }

    #[test]
    fn target_fps_comes_from_config() {
        let config = EngineConfig { target_fps: 30, ..config() };
        let mut engine = Engine::with_backend(&config, Box::new(HeadlessWindow::new()));
        assert!((engine.timer.target_frame_time() - 1.0 / 30.0).abs() < 1e-12);

        engine.set_target_fps(0);
        assert_eq!(engine.timer.target_frame_time(), 0.0);
    }

    #[test]
    fn shutdown_closes() {
        let mut engine = Engine::with_backend(&config(), Box::new(HeadlessWindow::new()));
        engine.shutdown();
        assert!(engine.should_close());
        assert!(engine.window.window_handle().is_none());
    }
}
