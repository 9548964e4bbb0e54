use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::error::Result;
use crate::input::InputState;

use super::backend::{PumpStatus, WindowBackend};
use super::{create_backend, BackendKind, WindowConfig};

/// The engine window: backend plus the state game code reads.
pub struct WindowApi {
    backend: Box<dyn WindowBackend>,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
    pub cursor_visible: bool,
    should_close: bool,
    destroyed: bool,
}

impl WindowApi {
    /// Opens a window with the selected backend.
    pub fn create(config: &WindowConfig, kind: BackendKind, verbose_modules: bool) -> Result<Self> {
        let backend = create_backend(config, kind, verbose_modules)?;
        Ok(Self::from_backend(backend, config))
    }

    /// Wraps an already opened backend.
    pub fn from_backend(backend: Box<dyn WindowBackend>, config: &WindowConfig) -> Self {
        log::info!(
            "create window ({}) => width:{} height:{} title:{}",
            backend.name(),
            config.width,
            config.height,
            config.title
        );
        Self {
            backend,
            width: config.width,
            height: config.height,
            title: config.title.clone(),
            fullscreen: false,
            cursor_visible: true,
            should_close: false,
            destroyed: false,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Starts a new input frame and drains the window system queue into `input`.
    pub fn update(&mut self, input: &mut InputState) {
        input.begin_frame();
        if self.destroyed {
            return;
        }
        if self.backend.pump(input) == PumpStatus::CloseRequested {
            log::debug!("window close requested");
            self.should_close = true;
        }
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.destroyed || self.fullscreen == fullscreen {
            return;
        }
        self.backend.set_fullscreen(fullscreen);
        self.fullscreen = fullscreen;
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.destroyed || self.cursor_visible == visible {
            return;
        }
        self.backend.set_cursor_visible(visible);
        self.cursor_visible = visible;
    }

    /// Closes the window. Further updates are no-ops.
    pub fn destroy(&mut self) {
        self.should_close = true;
        if self.destroyed {
            return;
        }
        self.backend.destroy();
        self.destroyed = true;
        log::info!("close window ({})", self.backend.name());
    }

    pub fn window_handle(&self) -> Option<RawWindowHandle> {
        if self.destroyed { None } else { self.backend.window_handle() }
    }

    pub fn display_handle(&self) -> Option<RawDisplayHandle> {
        if self.destroyed { None } else { self.backend.display_handle() }
    }
}

impl Drop for WindowApi {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::window::{HeadlessEvent, HeadlessWindow};

    /// Records the calls a `WindowApi` forwards to its backend.
    #[derive(Default)]
    struct Calls {
        fullscreen: Vec<bool>,
        cursor: Vec<bool>,
        destroys: u32,
    }

    struct Spy(Rc<RefCell<Calls>>);

    impl WindowBackend for Spy {
        fn name(&self) -> &'static str {
            "spy"
        }
        fn pump(&mut self, _input: &mut InputState) -> PumpStatus {
            PumpStatus::Continue
        }
        fn set_fullscreen(&mut self, fullscreen: bool) {
            self.0.borrow_mut().fullscreen.push(fullscreen);
        }
        fn set_cursor_visible(&mut self, visible: bool) {
            self.0.borrow_mut().cursor.push(visible);
        }
        fn destroy(&mut self) {
            self.0.borrow_mut().destroys += 1;
        }
    }

    #[test]
    fn update_snapshots_previous_before_draining() {
        let backend = HeadlessWindow::scripted([
            vec![HeadlessEvent::from(InputEvent::pressed(Key::Escape))],
            vec![],
        ]);
        let mut window = WindowApi::from_backend(Box::new(backend), &WindowConfig::default());
        let mut input = InputState::default();

        window.update(&mut input);
        assert!(input.is_pressed(Key::Escape));

        window.update(&mut input);
        assert!(input.is_down(Key::Escape));
        assert!(!input.is_pressed(Key::Escape));
    }

    #[test]
    fn close_request_sets_flag() {
        let backend = HeadlessWindow::scripted([vec![HeadlessEvent::Close]]);
        let mut window = WindowApi::from_backend(Box::new(backend), &WindowConfig::default());
        let mut input = InputState::default();

        assert!(!window.should_close());
        window.update(&mut input);
        assert!(window.should_close());
    }

    #[test]
    fn state_changes_forward_once() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut window = WindowApi::from_backend(Box::new(Spy(calls.clone())), &WindowConfig::default());

        window.set_fullscreen(true);
        window.set_fullscreen(true);
        window.set_fullscreen(false);
        window.set_cursor_visible(false);
        window.set_cursor_visible(false);

        assert_eq!(calls.borrow().fullscreen, vec![true, false]);
        assert_eq!(calls.borrow().cursor, vec![false]);
        assert!(!window.fullscreen);
        assert!(!window.cursor_visible);
    }

    #[test]
    fn destroy_is_idempotent_and_runs_on_drop() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut window = WindowApi::from_backend(Box::new(Spy(calls.clone())), &WindowConfig::default());

        window.destroy();
        window.destroy();
        assert!(window.should_close());
        assert_eq!(calls.borrow().destroys, 1);
        drop(window);
        assert_eq!(calls.borrow().destroys, 1);

        let window = WindowApi::from_backend(Box::new(Spy(calls.clone())), &WindowConfig::default());
        drop(window);
        assert_eq!(calls.borrow().destroys, 2);
    }

    #[test]
    fn window_state_mirrors_config() {
        let config = WindowConfig { title: "Pong".into(), width: 320, height: 200 };
        let window = WindowApi::from_backend(Box::new(HeadlessWindow::new()), &config);
        assert_eq!((window.width, window.height), (320, 200));
        assert_eq!(window.title, "Pong");
        assert_eq!(window.backend_name(), "headless");
        assert!(window.window_handle().is_none());
    }
}
