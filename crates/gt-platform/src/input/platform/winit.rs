use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::MouseInput { state, button, .. } => {
            let key = map_mouse_button(*button)?;
            Some(InputEvent::Key { key, state: map_state(*state) })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            // Held state only; auto-repeat carries no new information.
            if event.repeat {
                return None;
            }
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            let key = map_key_code(code)?;
            Some(InputEvent::Key { key, state: map_state(event.state) })
        }

        _ => None,
    }
}

fn map_state(st: ElementState) -> KeyState {
    match st {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

pub fn map_mouse_button(b: WinitMouseButton) -> Option<Key> {
    match b {
        WinitMouseButton::Left => Some(Key::MouseLeft),
        WinitMouseButton::Right => Some(Key::MouseRight),
        WinitMouseButton::Middle => Some(Key::MouseMiddle),
        WinitMouseButton::Back => Some(Key::MouseBackward),
        WinitMouseButton::Forward => Some(Key::MouseForward),
        WinitMouseButton::Other(_) => None,
    }
}

pub fn map_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Quote => Key::Apostrophe,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equal,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::BracketRight,
        KeyCode::Backquote => Key::Grave,

        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,

        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowUp => Key::ArrowUp,

        KeyCode::PageDown => Key::PageDown,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,

        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::ScrollLock => Key::ScrollLock,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::Pause => Key::Pause,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::AltLeft => Key::AltLeft,
        KeyCode::SuperLeft => Key::SuperLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltRight => Key::AltRight,
        KeyCode::SuperRight => Key::SuperRight,
        KeyCode::ContextMenu => Key::Menu,

        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadEnter => Key::NumpadEnter,
        KeyCode::NumpadEqual => Key::NumpadEqual,

        _ => return None,
    };
    Some(key)
}
