use anyhow::Result;

use crate::config::EngineConfig;
use crate::logging::init_logging;

use super::app::{AppControl, Game};
use super::engine::Engine;

/// Entry point: sets up logging, opens the engine and drives `game` until the window closes.
pub fn run<G: Game>(config: EngineConfig, mut game: G) -> Result<()> {
    init_logging(config.logging.clone());

    let mut engine = match Engine::init(&config) {
        Ok(engine) => engine,
        Err(e) => {
            crate::log_fatal!("engine init failed: {e:#}");
            return Err(e);
        }
    };
    crate::log_success!("engine up ({} backend, {} fps target)", engine.window.backend_name(), config.target_fps);

    let frames = run_engine(&mut engine, &mut game);
    log::info!("engine stopped after {frames} frames");
    Ok(())
}

/// Drives the frame loop on an existing engine. Returns the number of frames run.
///
/// The engine is shut down when this returns.
pub fn run_engine<G: Game + ?Sized>(engine: &mut Engine, game: &mut G) -> u64 {
    game.init(engine);

    let mut started = false;
    let mut frames = 0u64;

    while !engine.should_close() {
        engine.begin_frame();

        if !started {
            started = true;
            game.start(engine);
        }

        // No frame has been measured yet on the first pass.
        let dt = if engine.timer.frame_index() == 0 {
            engine.timer.target_frame_time()
        } else {
            engine.delta_time()
        };

        if game.update(engine, dt as f32) == AppControl::Exit {
            engine.request_close();
        }

        engine.end_frame();
        frames += 1;
    }

    game.stop(engine);
    engine.shutdown();
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::window::{BackendKind, HeadlessEvent, HeadlessWindow};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        dts: Vec<f32>,
        exit_on_escape: bool,
    }

    impl Game for Recorder {
        fn init(&mut self, _engine: &mut Engine) {
            self.calls.push("init");
        }

        fn start(&mut self, _engine: &mut Engine) {
            self.calls.push("start");
        }

        fn update(&mut self, engine: &mut Engine, dt: f32) -> AppControl {
            self.calls.push("update");
            self.dts.push(dt);
            if self.exit_on_escape && engine.input.is_pressed(Key::Escape) {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        }

        fn stop(&mut self, engine: &mut Engine) {
            assert!(engine.should_close());
            self.calls.push("stop");
        }
    }

    fn engine(target_fps: u32, backend: HeadlessWindow) -> Engine {
        let config = EngineConfig { target_fps, backend: BackendKind::Headless, ..EngineConfig::default() };
        Engine::with_backend(&config, Box::new(backend))
    }

    #[test]
    fn window_close_ends_loop_after_that_frame() {
        let backend = HeadlessWindow::scripted([vec![], vec![], vec![HeadlessEvent::Close]]);
        let mut engine = engine(0, backend);
        let mut game = Recorder::default();

        let frames = run_engine(&mut engine, &mut game);

        assert_eq!(frames, 3);
        assert_eq!(game.calls, vec!["init", "start", "update", "update", "update", "stop"]);
        assert!(engine.window.window_handle().is_none());
    }

    #[test]
    fn game_exit_requests_close() {
        let backend = HeadlessWindow::scripted([
            vec![],
            vec![HeadlessEvent::from(InputEvent::pressed(Key::Escape))],
            vec![],
        ]);
        let mut engine = engine(0, backend);
        let mut game = Recorder { exit_on_escape: true, ..Recorder::default() };

        assert_eq!(run_engine(&mut engine, &mut game), 2);
    }

    #[test]
    fn first_update_gets_target_frame_time() {
        let backend = HeadlessWindow::scripted([vec![], vec![HeadlessEvent::Close]]);
        let mut engine = engine(200, backend);
        let mut game = Recorder::default();

        run_engine(&mut engine, &mut game);

        assert_eq!(game.dts.len(), 2);
        assert!((game.dts[0] - 0.005).abs() < 1e-6);
        // Paced frames last at least the target.
        assert!(game.dts[1] >= 0.005);
    }
}
