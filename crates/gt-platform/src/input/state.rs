use super::types::{InputEvent, Key};

/// Raw key/button state for the engine window.
///
/// `current` reflects the latest drained event queue, `previous` holds the
/// snapshot taken at the start of the frame. Edge queries compare the two.
#[derive(Debug, Clone)]
pub struct InputState {
    current: [bool; Key::COUNT],
    previous: [bool; Key::COUNT],

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in window pixels.
    pub pointer_pos: Option<(f32, f32)>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            current: [false; Key::COUNT],
            previous: [false; Key::COUNT],
            focused: true,
            pointer_pos: None,
        }
    }
}

impl InputState {
    /// Snapshots `current` into `previous`.
    ///
    /// Must be called once per frame, before the backend drains its events.
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, state } => self.set_key(key, state.is_pressed()),

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Release events for keys held during focus loss never arrive.
                    self.release_all();
                }
            }
        }
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.current[key.index()] = pressed;
    }

    pub fn release_all(&mut self) {
        self.current = [false; Key::COUNT];
    }

    /// Key is held this frame.
    pub fn is_down(&self, key: Key) -> bool {
        self.current[key.index()]
    }

    /// Key was held last frame.
    pub fn was_down(&self, key: Key) -> bool {
        self.previous[key.index()]
    }

    /// Key went down this frame.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.is_down(key) && !self.was_down(key)
    }

    /// Key went up this frame.
    pub fn is_released(&self, key: Key) -> bool {
        !self.is_down(key) && self.was_down(key)
    }

    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        self.pointer_pos
    }

    /// Keys currently held, in index order.
    pub fn keys_down(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.iter().copied().filter(|k| self.is_down(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_an_edge_for_one_frame() {
        let mut input = InputState::default();

        input.begin_frame();
        input.apply_event(InputEvent::pressed(Key::W));
        assert!(input.is_down(Key::W));
        assert!(input.is_pressed(Key::W));

        input.begin_frame();
        assert!(input.is_down(Key::W));
        assert!(!input.is_pressed(Key::W));
        assert!(input.was_down(Key::W));
    }

    #[test]
    fn release_is_an_edge_for_one_frame() {
        let mut input = InputState::default();
        input.apply_event(InputEvent::pressed(Key::Space));

        input.begin_frame();
        input.apply_event(InputEvent::released(Key::Space));
        assert!(input.is_released(Key::Space));
        assert!(!input.is_down(Key::Space));

        input.begin_frame();
        assert!(!input.is_released(Key::Space));
    }

    #[test]
    fn press_and_release_within_a_frame_leaves_key_up() {
        let mut input = InputState::default();
        input.begin_frame();
        input.apply_event(InputEvent::pressed(Key::MouseLeft));
        input.apply_event(InputEvent::released(Key::MouseLeft));
        assert!(!input.is_down(Key::MouseLeft));
        assert!(!input.is_pressed(Key::MouseLeft));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut input = InputState::default();
        input.apply_event(InputEvent::pressed(Key::A));
        input.apply_event(InputEvent::pressed(Key::MouseRight));

        input.apply_event(InputEvent::Focused(false));
        assert!(!input.focused);
        assert_eq!(input.keys_down().count(), 0);
    }

    #[test]
    fn pointer_tracks_motion_and_leave() {
        let mut input = InputState::default();
        input.apply_event(InputEvent::PointerMoved { x: 12.0, y: 34.0 });
        assert_eq!(input.pointer_position(), Some((12.0, 34.0)));

        input.apply_event(InputEvent::PointerLeft);
        assert_eq!(input.pointer_position(), None);
    }

    #[test]
    fn keys_down_lists_in_index_order() {
        let mut input = InputState::default();
        input.set_key(Key::MouseLeft, true);
        input.set_key(Key::A, true);
        input.set_key(Key::Escape, true);
        let held: Vec<Key> = input.keys_down().collect();
        assert_eq!(held, vec![Key::A, Key::Escape, Key::MouseLeft]);
    }
}
