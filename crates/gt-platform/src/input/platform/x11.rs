//! X11 keycode / keysym / button translation.

use x11_dl::keysym::*;
use x11_dl::xlib::KeySym;

use crate::input::Key;

/// Copy of the server keyboard mapping taken at window creation.
///
/// Keycodes index rows of `keysyms_per_keycode` keysyms starting at `min_keycode`.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMapping {
    pub min_keycode: u32,
    pub keysyms_per_keycode: usize,
    pub syms: Vec<KeySym>,
}

impl KeyboardMapping {
    pub fn new(min_keycode: u32, keysyms_per_keycode: usize, syms: Vec<KeySym>) -> Self {
        Self { min_keycode, keysyms_per_keycode, syms }
    }

    /// Unshifted keysym for `keycode`, with latin lower case folded to upper case.
    pub fn keysym(&self, keycode: u32) -> Option<KeySym> {
        let row = keycode.checked_sub(self.min_keycode)? as usize;
        let sym = *self.syms.get(row * self.keysyms_per_keycode)?;
        Some(fold_case(sym))
    }

    /// Engine key for a KeyPress/KeyRelease keycode.
    pub fn translate_keycode(&self, keycode: u32) -> Option<Key> {
        self.keysym(keycode).and_then(translate_keysym)
    }
}

fn fold_case(sym: KeySym) -> KeySym {
    let (lower_a, lower_z) = (XK_a as KeySym, XK_z as KeySym);
    if (lower_a..=lower_z).contains(&sym) {
        sym - (XK_a - XK_A) as KeySym
    } else {
        sym
    }
}

/// Engine key for a ButtonPress/ButtonRelease button number.
///
/// Buttons 4-7 are wheel steps and carry no held state.
pub fn translate_button(button: u32) -> Option<Key> {
    match button {
        1 => Some(Key::MouseLeft),
        2 => Some(Key::MouseMiddle),
        3 => Some(Key::MouseRight),
        8 => Some(Key::MouseBackward),
        9 => Some(Key::MouseForward),
        _ => None,
    }
}

/// Engine key for an (already case-folded) keysym.
#[allow(non_upper_case_globals)]
pub fn translate_keysym(sym: KeySym) -> Option<Key> {
    let sym = u32::try_from(sym).ok()?;
    let key = match sym {
        XK_apostrophe => Key::Apostrophe,
        XK_comma => Key::Comma,
        XK_minus => Key::Minus,
        XK_period => Key::Period,
        XK_slash => Key::Slash,

        XK_0 => Key::Digit0,
        XK_1 => Key::Digit1,
        XK_2 => Key::Digit2,
        XK_3 => Key::Digit3,
        XK_4 => Key::Digit4,
        XK_5 => Key::Digit5,
        XK_6 => Key::Digit6,
        XK_7 => Key::Digit7,
        XK_8 => Key::Digit8,
        XK_9 => Key::Digit9,

        XK_semicolon => Key::Semicolon,
        XK_equal => Key::Equal,

        XK_A => Key::A,
        XK_B => Key::B,
        XK_C => Key::C,
        XK_D => Key::D,
        XK_E => Key::E,
        XK_F => Key::F,
        XK_G => Key::G,
        XK_H => Key::H,
        XK_I => Key::I,
        XK_J => Key::J,
        XK_K => Key::K,
        XK_L => Key::L,
        XK_M => Key::M,
        XK_N => Key::N,
        XK_O => Key::O,
        XK_P => Key::P,
        XK_Q => Key::Q,
        XK_R => Key::R,
        XK_S => Key::S,
        XK_T => Key::T,
        XK_U => Key::U,
        XK_V => Key::V,
        XK_W => Key::W,
        XK_X => Key::X,
        XK_Y => Key::Y,
        XK_Z => Key::Z,

        XK_bracketleft => Key::BracketLeft,
        XK_backslash => Key::Backslash,
        XK_bracketright => Key::BracketRight,
        XK_grave => Key::Grave,

        XK_space => Key::Space,
        XK_Escape => Key::Escape,
        XK_Return => Key::Enter,
        XK_Tab => Key::Tab,
        XK_BackSpace => Key::Backspace,
        XK_Insert => Key::Insert,
        XK_Delete => Key::Delete,

        XK_Right => Key::ArrowRight,
        XK_Left => Key::ArrowLeft,
        XK_Down => Key::ArrowDown,
        XK_Up => Key::ArrowUp,

        XK_Page_Down => Key::PageDown,
        XK_Page_Up => Key::PageUp,
        XK_Home => Key::Home,
        XK_End => Key::End,

        XK_Caps_Lock => Key::CapsLock,
        XK_Scroll_Lock => Key::ScrollLock,
        XK_Num_Lock => Key::NumLock,
        XK_Print => Key::PrintScreen,
        XK_Pause => Key::Pause,

        XK_F1 => Key::F1,
        XK_F2 => Key::F2,
        XK_F3 => Key::F3,
        XK_F4 => Key::F4,
        XK_F5 => Key::F5,
        XK_F6 => Key::F6,
        XK_F7 => Key::F7,
        XK_F8 => Key::F8,
        XK_F9 => Key::F9,
        XK_F10 => Key::F10,
        XK_F11 => Key::F11,
        XK_F12 => Key::F12,

        XK_Shift_L => Key::ShiftLeft,
        XK_Control_L => Key::ControlLeft,
        XK_Alt_L => Key::AltLeft,
        XK_Super_L => Key::SuperLeft,
        XK_Shift_R => Key::ShiftRight,
        XK_Control_R => Key::ControlRight,
        XK_Alt_R => Key::AltRight,
        XK_Super_R => Key::SuperRight,
        XK_Menu => Key::Menu,

        XK_KP_0 => Key::Numpad0,
        XK_KP_1 => Key::Numpad1,
        XK_KP_2 => Key::Numpad2,
        XK_KP_3 => Key::Numpad3,
        XK_KP_4 => Key::Numpad4,
        XK_KP_5 => Key::Numpad5,
        XK_KP_6 => Key::Numpad6,
        XK_KP_7 => Key::Numpad7,
        XK_KP_8 => Key::Numpad8,
        XK_KP_9 => Key::Numpad9,
        XK_KP_Decimal => Key::NumpadDecimal,
        XK_KP_Divide => Key::NumpadDivide,
        XK_KP_Multiply => Key::NumpadMultiply,
        XK_KP_Subtract => Key::NumpadSubtract,
        XK_KP_Add => Key::NumpadAdd,
        XK_KP_Enter => Key::NumpadEnter,
        XK_KP_Equal => Key::NumpadEqual,

        _ => return None,
    };
    Some(key)
}
