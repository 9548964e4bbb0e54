use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::input::InputState;

/// Outcome of draining a backend's event queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PumpStatus {
    Continue,
    /// The user or window manager asked to close the window.
    CloseRequested,
}

/// Window system backend: the engine's window function table.
///
/// A backend is created with its window already open. `pump` is called once
/// per frame and translates every pending OS event into `input`.
pub trait WindowBackend {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Drains pending window system events into `input`.
    fn pump(&mut self, input: &mut InputState) -> PumpStatus;

    fn set_fullscreen(&mut self, fullscreen: bool);

    fn set_cursor_visible(&mut self, visible: bool);

    /// Closes the window and releases OS resources. Must be idempotent.
    fn destroy(&mut self);

    fn window_handle(&self) -> Option<RawWindowHandle> {
        None
    }

    fn display_handle(&self) -> Option<RawDisplayHandle> {
        None
    }
}
