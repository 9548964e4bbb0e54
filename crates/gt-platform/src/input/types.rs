use std::fmt;

macro_rules! engine_keys {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        /// Engine key identifier.
        ///
        /// Dense enumeration used to index [`InputState`](super::InputState) arrays.
        /// Mouse buttons live in the same space as keyboard keys so game code can
        /// query both through one set of calls.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Key {
            $($(#[$doc])* $name,)*
        }

        impl Key {
            /// Every key, in index order.
            pub const ALL: &'static [Key] = &[$(Key::$name,)*];

            /// Number of engine keys.
            pub const COUNT: usize = Self::ALL.len();
        }
    };
}

engine_keys! {
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Semicolon,
    Equal,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    BracketLeft,
    Backslash,
    BracketRight,
    Grave,

    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,

    ArrowRight,
    ArrowLeft,
    ArrowDown,
    ArrowUp,

    PageDown,
    PageUp,
    Home,
    End,

    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    ShiftLeft,
    ControlLeft,
    AltLeft,
    SuperLeft,
    ShiftRight,
    ControlRight,
    AltRight,
    SuperRight,
    Menu,

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadDecimal,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadEqual,

    MouseLeft,
    MouseMiddle,
    MouseRight,
    MouseForward,
    MouseBackward,
}

impl Key {
    /// Position of this key in the state arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_mouse_button(self) -> bool {
        matches!(
            self,
            Key::MouseLeft
                | Key::MouseMiddle
                | Key::MouseRight
                | Key::MouseForward
                | Key::MouseBackward
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn is_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed { KeyState::Pressed } else { KeyState::Released }
    }
}

/// Platform-agnostic input events emitted by window backends.
///
/// Backends translate window system events into these.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard key or mouse button transition.
    Key { key: Key, state: KeyState },

    /// Pointer moved, in window pixels.
    PointerMoved { x: f32, y: f32 },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    pub fn pressed(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Pressed }
    }

    pub fn released(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Released }
    }
}
