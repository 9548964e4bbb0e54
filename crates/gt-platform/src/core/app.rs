use super::engine::Engine;

/// Control directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game contract driven by [`run`](super::run).
pub trait Game {
    /// Called once after the engine is up, before the first frame.
    fn init(&mut self, engine: &mut Engine) {
        let _ = engine;
    }

    /// Called once, at the start of the first frame.
    fn start(&mut self, engine: &mut Engine) {
        let _ = engine;
    }

    /// Called once per frame. `dt` is the previous frame's duration in seconds.
    fn update(&mut self, engine: &mut Engine, dt: f32) -> AppControl;

    /// Called once after the loop ends, while the window still exists.
    fn stop(&mut self, engine: &mut Engine) {
        let _ = engine;
    }
}
