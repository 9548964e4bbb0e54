use std::collections::VecDeque;

use crate::input::{InputEvent, InputState};

use super::backend::{PumpStatus, WindowBackend};

/// One scripted window system event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HeadlessEvent {
    Input(InputEvent),
    Close,
}

impl From<InputEvent> for HeadlessEvent {
    fn from(ev: InputEvent) -> Self {
        HeadlessEvent::Input(ev)
    }
}

/// Backend without a display.
///
/// Replays one batch of scripted events per pump. Once the script runs out it
/// stays idle forever, so it also serves display-less runs.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    frames: VecDeque<Vec<HeadlessEvent>>,
    pumps: u64,
    fullscreen: bool,
    cursor_visible: bool,
    destroyed: bool,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self { cursor_visible: true, ..Self::default() }
    }

    /// Backend replaying `frames`, one entry per pump.
    pub fn scripted<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = HeadlessEvent>,
    {
        Self {
            frames: frames.into_iter().map(|f| f.into_iter().collect()).collect(),
            ..Self::new()
        }
    }

    /// Queues one more frame of events.
    pub fn push_frame(&mut self, events: impl IntoIterator<Item = HeadlessEvent>) {
        self.frames.push_back(events.into_iter().collect());
    }

    pub fn pumps(&self) -> u64 {
        self.pumps
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl WindowBackend for HeadlessWindow {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn pump(&mut self, input: &mut InputState) -> PumpStatus {
        self.pumps += 1;
        let mut status = PumpStatus::Continue;
        for ev in self.frames.pop_front().unwrap_or_default() {
            match ev {
                HeadlessEvent::Input(ev) => input.apply_event(ev),
                HeadlessEvent::Close => status = PumpStatus::CloseRequested,
            }
        }
        status
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
