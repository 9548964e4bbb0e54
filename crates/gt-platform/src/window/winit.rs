//! winit backend, driven in polling mode.
//!
//! The engine owns the frame loop, so the event loop is pumped once per frame
//! with a zero timeout instead of handing control to `run_app`.

use std::time::Duration;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus as WinitPumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::error::{PlatformError, Result};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;

use super::backend::{PumpStatus, WindowBackend};
use super::WindowConfig;

pub struct WinitWindow {
    event_loop: EventLoop<()>,
    attributes: WindowAttributes,
    window: Option<Window>,
}

impl WinitWindow {
    /// Creates the event loop and pumps it until the window exists.
    pub fn create(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| PlatformError::Window(format!("failed to create winit EventLoop: {e}")))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let attributes = window_attributes(config);
        let mut this = Self { event_loop, attributes, window: None };

        // The window is created from `resumed`, which arrives on the first pump.
        let mut scratch = InputState::default();
        let mut handler = PumpHandler::new(&this.attributes, &mut this.window, &mut scratch);
        let _ = this.event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);
        if let Some(e) = handler.error.take() {
            return Err(PlatformError::Window(format!("failed to create window: {e}")));
        }

        if this.window.is_none() {
            return Err(PlatformError::Window("event loop never resumed".into()));
        }
        Ok(this)
    }
}

/// Window pixels on every backend: the configured size and pointer positions are physical.
fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
}

/// Collects one pump's worth of events into the engine input state.
struct PumpHandler<'a> {
    attributes: &'a WindowAttributes,
    window: &'a mut Option<Window>,
    input: &'a mut InputState,
    close_requested: bool,
    error: Option<OsError>,
}

impl<'a> PumpHandler<'a> {
    fn new(attributes: &'a WindowAttributes, window: &'a mut Option<Window>, input: &'a mut InputState) -> Self {
        Self { attributes, window, input, close_requested: false, error: None }
    }
}

impl ApplicationHandler for PumpHandler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => *self.window = Some(window),
            Err(e) => self.error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close_requested = true,
            other => {
                if let Some(ev) = translate_window_event(&other) {
                    self.input.apply_event(ev);
                }
            }
        }
    }
}

impl WindowBackend for WinitWindow {
    fn name(&self) -> &'static str {
        "winit"
    }

    fn pump(&mut self, input: &mut InputState) -> PumpStatus {
        if self.window.is_none() {
            return PumpStatus::Continue;
        }

        let mut handler = PumpHandler::new(&self.attributes, &mut self.window, input);
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);
        let close_requested = handler.close_requested;

        if close_requested || matches!(status, WinitPumpStatus::Exit(_)) {
            PumpStatus::CloseRequested
        } else {
            PumpStatus::Continue
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if let Some(window) = &self.window {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(window) = &self.window {
            window.set_cursor_visible(visible);
        }
    }

    fn destroy(&mut self) {
        // Dropping the winit window closes it.
        self.window = None;
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        let window = self.window.as_ref()?;
        window.window_handle().ok().map(|h| h.as_raw())
    }

    fn display_handle(&self) -> Option<RawDisplayHandle> {
        let window = self.window.as_ref()?;
        window.display_handle().ok().map(|h| h.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::Size;

    use super::*;

    #[test]
    fn attributes_use_physical_pixels() {
        let config = WindowConfig { title: "Pong".into(), width: 320, height: 200 };
        let attributes = window_attributes(&config);

        assert_eq!(attributes.inner_size, Some(Size::Physical(PhysicalSize::new(320, 200))));
        assert_eq!(attributes.title, "Pong");
        assert!(!attributes.resizable);
    }
}
