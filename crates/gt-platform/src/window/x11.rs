//! Xlib backend.
//!
//! libX11 is opened at runtime and its functions resolved into [`X11Api`]; no
//! link-time dependency on X11 exists. Types and constants come from `x11-dl`.

use std::ffi::{c_char, c_int, c_long, c_uint, c_ulong, c_void, CString};
use std::mem;
use std::ptr::{self, NonNull};

use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};
use x11_dl::xlib::{
    self, Atom, Bool, Cursor, Display, Drawable, KeyCode, KeySym, Pixmap, Window, XClientMessageEvent,
    XColor, XEvent, XSizeHints,
};

use crate::error::{PlatformError, Result};
use crate::input::platform::x11::{translate_button, KeyboardMapping};
use crate::input::{InputEvent, InputState, KeyState};
use crate::module::Module;

use super::backend::{PumpStatus, WindowBackend};
use super::WindowConfig;

const LIBX11_NAMES: &[&str] = &["libX11.so.6", "libX11.so"];

const TRUE: Bool = 1;
const FALSE: Bool = 0;

/// `XC_left_ptr` from <X11/cursorfont.h>.
const XC_LEFT_PTR: c_uint = 68;

/// `_NET_WM_STATE` actions.
const NET_WM_STATE_REMOVE: c_long = 0;
const NET_WM_STATE_ADD: c_long = 1;

const EVENT_MASK: c_long = xlib::KeyPressMask
    | xlib::KeyReleaseMask
    | xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::StructureNotifyMask
    | xlib::PointerMotionMask
    | xlib::LeaveWindowMask
    | xlib::FocusChangeMask;

crate::dynamic_api! {
    /// Xlib functions used by the backend.
    pub struct X11Api {
        fn XOpenDisplay(*const c_char) -> *mut Display;
        fn XCloseDisplay(*mut Display) -> c_int;
        fn XDefaultScreen(*mut Display) -> c_int;
        fn XRootWindow(*mut Display, c_int) -> Window;
        fn XBlackPixel(*mut Display, c_int) -> c_ulong;
        fn XWhitePixel(*mut Display, c_int) -> c_ulong;
        fn XCreateSimpleWindow(*mut Display, Window, c_int, c_int, c_uint, c_uint, c_uint, c_ulong, c_ulong) -> Window;
        fn XMapWindow(*mut Display, Window) -> c_int;
        fn XUnmapWindow(*mut Display, Window) -> c_int;
        fn XDestroyWindow(*mut Display, Window) -> c_int;
        fn XSelectInput(*mut Display, Window, c_long) -> c_int;
        fn XStoreName(*mut Display, Window, *const c_char) -> c_int;
        fn XkbSetDetectableAutoRepeat(*mut Display, Bool, *mut Bool) -> Bool;
        fn XInternAtom(*mut Display, *const c_char, Bool) -> Atom;
        fn XSetWMProtocols(*mut Display, Window, *mut Atom, c_int) -> c_int;
        fn XAllocSizeHints() -> *mut XSizeHints;
        fn XSetWMNormalHints(*mut Display, Window, *mut XSizeHints);
        fn XFree(*mut c_void) -> c_int;
        fn XDisplayKeycodes(*mut Display, *mut c_int, *mut c_int) -> c_int;
        fn XGetKeyboardMapping(*mut Display, KeyCode, c_int, *mut c_int) -> *mut KeySym;
        fn XPending(*mut Display) -> c_int;
        fn XNextEvent(*mut Display, *mut XEvent) -> c_int;
        fn XSendEvent(*mut Display, Window, Bool, c_long, *mut XEvent) -> c_int;
        fn XFlush(*mut Display) -> c_int;
        fn XCreateBitmapFromData(*mut Display, Drawable, *const c_char, c_uint, c_uint) -> Pixmap;
        fn XCreatePixmapCursor(*mut Display, Pixmap, Pixmap, *mut XColor, *mut XColor, c_uint, c_uint) -> Cursor;
        fn XFreePixmap(*mut Display, Pixmap) -> c_int;
        fn XCreateFontCursor(*mut Display, c_uint) -> Cursor;
        fn XDefineCursor(*mut Display, Window, Cursor) -> c_int;
        fn XFreeCursor(*mut Display, Cursor) -> c_int;
    }
}

/// Cursor functions only back `set_cursor_visible`; the window works without them.
const OPTIONAL_SYMBOLS: &[&str] = &[
    "XCreateBitmapFromData",
    "XCreatePixmapCursor",
    "XFreePixmap",
    "XCreateFontCursor",
    "XDefineCursor",
    "XFreeCursor",
];

/// Calls an `X11Api` function if it was resolved.
macro_rules! xcall {
    ($api:expr, $f:ident ( $($arg:expr),* $(,)? )) => {
        $api.$f.map(|f| unsafe { f($($arg),*) })
    };
}

/// Atoms interned at window creation.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct Atoms {
    pub wm_protocols: Atom,
    pub wm_delete_window: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_fullscreen: Atom,
}

/// What one X event means to the engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum X11Action {
    Input(InputEvent),
    Close,
    RefreshMapping,
}

/// Translates one X event. Events the engine does not track yield `None`.
pub(crate) fn translate_event(event: &XEvent, mapping: &KeyboardMapping, atoms: &Atoms) -> Option<X11Action> {
    match event.get_type() {
        xlib::KeyPress | xlib::KeyRelease => {
            let key = unsafe { event.key };
            let state = KeyState::from(key.type_ == xlib::KeyPress);
            let key = mapping.translate_keycode(key.keycode)?;
            Some(X11Action::Input(InputEvent::Key { key, state }))
        }

        xlib::ButtonPress | xlib::ButtonRelease => {
            let button = unsafe { event.button };
            let state = KeyState::from(button.type_ == xlib::ButtonPress);
            let key = translate_button(button.button)?;
            Some(X11Action::Input(InputEvent::Key { key, state }))
        }

        xlib::MotionNotify => {
            let motion = unsafe { event.motion };
            Some(X11Action::Input(InputEvent::PointerMoved {
                x: motion.x as f32,
                y: motion.y as f32,
            }))
        }

        xlib::LeaveNotify => Some(X11Action::Input(InputEvent::PointerLeft)),
        xlib::FocusIn => Some(X11Action::Input(InputEvent::Focused(true))),
        xlib::FocusOut => Some(X11Action::Input(InputEvent::Focused(false))),

        xlib::ClientMessage => {
            let client = unsafe { event.client_message };
            is_delete_request(&client, atoms).then_some(X11Action::Close)
        }

        xlib::MappingNotify => Some(X11Action::RefreshMapping),

        _ => None,
    }
}

/// `WM_PROTOCOLS` message carrying `WM_DELETE_WINDOW`: the window manager's close button.
pub(crate) fn is_delete_request(client: &XClientMessageEvent, atoms: &Atoms) -> bool {
    client.message_type == atoms.wm_protocols && client.data.get_long(0) as Atom == atoms.wm_delete_window
}

/// A single Xlib window with its own display connection.
pub struct X11Window {
    api: X11Api,
    display: *mut Display,
    screen: c_int,
    root: Window,
    window: Window,
    size_hints: *mut XSizeHints,
    width: u32,
    height: u32,
    atoms: Atoms,
    mapping: KeyboardMapping,
    hidden_cursor: Cursor,
    destroyed: bool,

    // Declared last: the function pointers above point into this library.
    module: Module,
}

impl X11Window {
    /// Loads libX11, connects to the default display and opens the window.
    pub fn create(config: &WindowConfig, verbose_modules: bool) -> Result<Self> {
        let module = Module::open_any(LIBX11_NAMES)?;
        // Safety: the declared signatures follow <X11/Xlib.h> and <X11/XKBlib.h>.
        let api = unsafe { X11Api::load(&module, verbose_modules) };

        let unresolved = api.missing();
        let missing: Vec<&'static str> = unresolved
            .iter()
            .copied()
            .filter(|name| !OPTIONAL_SYMBOLS.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(PlatformError::MissingSymbols { module: module.name().to_string(), missing });
        }
        if !api.is_complete() {
            log::warn!("{}: cursor functions unavailable, cursor visibility is fixed", module.name());
        }
        log::debug!(
            "{}: {} of {} functions resolved",
            module.name(),
            X11Api::SYMBOLS.len() - unresolved.len(),
            X11Api::SYMBOLS.len()
        );

        let title = CString::new(config.title.as_str())
            .map_err(|_| PlatformError::Window("window title contains a NUL byte".into()))?;

        let display = xcall!(api, XOpenDisplay(ptr::null())).unwrap_or(ptr::null_mut());
        if display.is_null() {
            return Err(PlatformError::DisplayUnavailable);
        }

        let screen = xcall!(api, XDefaultScreen(display)).unwrap_or_default();
        let root = xcall!(api, XRootWindow(display, screen)).unwrap_or_default();
        let black = xcall!(api, XBlackPixel(display, screen)).unwrap_or_default();
        let white = xcall!(api, XWhitePixel(display, screen)).unwrap_or_default();

        let window = xcall!(
            api,
            XCreateSimpleWindow(display, root, 0, 0, config.width, config.height, 1, black, white)
        )
        .unwrap_or_default();

        let mut this = Self {
            api,
            display,
            screen,
            root,
            window,
            size_hints: ptr::null_mut(),
            width: config.width,
            height: config.height,
            atoms: Atoms::default(),
            mapping: KeyboardMapping::default(),
            hidden_cursor: 0,
            destroyed: false,
            module,
        };

        // From here on `Drop` closes the display on every error path.
        if window == 0 {
            return Err(PlatformError::Window("XCreateSimpleWindow failed".into()));
        }

        this.configure(&title);
        log::debug!("x11 window 0x{:x} on screen {} via {}", window, screen, this.module.name());
        Ok(this)
    }

    fn configure(&mut self, title: &CString) {
        let (display, window) = (self.display, self.window);

        xcall!(self.api, XMapWindow(display, window));
        xcall!(self.api, XSelectInput(display, window, EVENT_MASK));
        xcall!(self.api, XStoreName(display, window, title.as_ptr()));
        xcall!(self.api, XkbSetDetectableAutoRepeat(display, TRUE, ptr::null_mut()));

        self.atoms = Atoms {
            wm_protocols: self.intern(c"WM_PROTOCOLS"),
            wm_delete_window: self.intern(c"WM_DELETE_WINDOW"),
            net_wm_state: self.intern(c"_NET_WM_STATE"),
            net_wm_state_fullscreen: self.intern(c"_NET_WM_STATE_FULLSCREEN"),
        };
        let mut protocols = [self.atoms.wm_delete_window];
        xcall!(self.api, XSetWMProtocols(display, window, protocols.as_mut_ptr(), 1));

        self.size_hints = xcall!(self.api, XAllocSizeHints()).unwrap_or(ptr::null_mut());
        self.apply_size_hints(true);

        self.mapping = self.read_keyboard_mapping();
    }

    fn intern(&self, name: &std::ffi::CStr) -> Atom {
        xcall!(self.api, XInternAtom(self.display, name.as_ptr(), FALSE)).unwrap_or_default()
    }

    /// Pins the window to its configured size, or lifts the pin.
    fn apply_size_hints(&mut self, pinned: bool) {
        let Some(hints) = NonNull::new(self.size_hints) else {
            return;
        };
        // Safety: allocated by XAllocSizeHints and owned by this window.
        let hints = unsafe { &mut *hints.as_ptr() };
        let (w, h) = (self.width as c_int, self.height as c_int);
        hints.flags = if pinned { xlib::PMinSize | xlib::PMaxSize } else { 0 };
        hints.min_width = w;
        hints.min_height = h;
        hints.max_width = w;
        hints.max_height = h;
        xcall!(self.api, XSetWMNormalHints(self.display, self.window, self.size_hints));
    }

    fn read_keyboard_mapping(&self) -> KeyboardMapping {
        let (mut min, mut max): (c_int, c_int) = (0, 0);
        xcall!(self.api, XDisplayKeycodes(self.display, &mut min, &mut max));
        let count = max - min + 1;
        if count <= 0 || !(0..=255).contains(&min) {
            log::warn!("x11 reported no keycodes ({min}..={max})");
            return KeyboardMapping::default();
        }

        let mut per_keycode: c_int = 0;
        let syms = xcall!(
            self.api,
            XGetKeyboardMapping(self.display, min as KeyCode, count, &mut per_keycode)
        )
        .unwrap_or(ptr::null_mut());
        if syms.is_null() {
            return KeyboardMapping::default();
        }

        let len = (count as usize) * (per_keycode.max(0) as usize);
        // Safety: Xlib returns `count * per_keycode` keysyms.
        let table = unsafe { std::slice::from_raw_parts(syms, len) }.to_vec();
        xcall!(self.api, XFree(syms.cast()));

        log::debug!("x11 keyboard mapping: keycodes {min}..={max}, {per_keycode} keysyms each");
        KeyboardMapping::new(min as u32, per_keycode.max(0) as usize, table)
    }

    fn blank_cursor(&mut self) -> Cursor {
        if self.hidden_cursor != 0 {
            return self.hidden_cursor;
        }
        let data: [c_char; 8] = [0; 8];
        let Some(pixmap) = xcall!(self.api, XCreateBitmapFromData(self.display, self.window, data.as_ptr(), 8, 8))
        else {
            return 0;
        };
        let mut color: XColor = unsafe { mem::zeroed() };
        let color_ptr: *mut XColor = &mut color;
        self.hidden_cursor = xcall!(
            self.api,
            XCreatePixmapCursor(self.display, pixmap, pixmap, color_ptr, color_ptr, 0, 0)
        )
        .unwrap_or_default();
        xcall!(self.api, XFreePixmap(self.display, pixmap));
        self.hidden_cursor
    }
}

impl WindowBackend for X11Window {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn pump(&mut self, input: &mut InputState) -> PumpStatus {
        let mut status = PumpStatus::Continue;
        if self.destroyed {
            return status;
        }

        while xcall!(self.api, XPending(self.display)).unwrap_or(0) > 0 {
            // Safety: XEvent is plain C data; XNextEvent overwrites it.
            let mut event: XEvent = unsafe { mem::zeroed() };
            xcall!(self.api, XNextEvent(self.display, &mut event));

            match translate_event(&event, &self.mapping, &self.atoms) {
                Some(X11Action::Input(ev)) => input.apply_event(ev),
                Some(X11Action::Close) => status = PumpStatus::CloseRequested,
                Some(X11Action::RefreshMapping) => self.mapping = self.read_keyboard_mapping(),
                None => {}
            }
        }
        status
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.destroyed {
            return;
        }
        // Pinned size hints keep the window manager from growing the window.
        self.apply_size_hints(!fullscreen);

        let mut message: XClientMessageEvent = unsafe { mem::zeroed() };
        message.type_ = xlib::ClientMessage;
        message.window = self.window;
        message.message_type = self.atoms.net_wm_state;
        message.format = 32;
        message.data.set_long(0, if fullscreen { NET_WM_STATE_ADD } else { NET_WM_STATE_REMOVE });
        message.data.set_long(1, self.atoms.net_wm_state_fullscreen as c_long);
        message.data.set_long(2, 0);
        // Source indication: normal application.
        message.data.set_long(3, 1);

        let mut event = XEvent { client_message: message };
        let mask = xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask;
        xcall!(self.api, XSendEvent(self.display, self.root, FALSE, mask, &mut event));
        xcall!(self.api, XFlush(self.display));
        log::debug!("x11 fullscreen: {fullscreen}");
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if self.destroyed {
            return;
        }
        if visible {
            if let Some(cursor) = xcall!(self.api, XCreateFontCursor(self.display, XC_LEFT_PTR)) {
                xcall!(self.api, XDefineCursor(self.display, self.window, cursor));
                xcall!(self.api, XFreeCursor(self.display, cursor));
            }
        } else {
            let cursor = self.blank_cursor();
            if cursor != 0 {
                xcall!(self.api, XDefineCursor(self.display, self.window, cursor));
            }
        }
        xcall!(self.api, XFlush(self.display));
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        let display = self.display;
        if self.hidden_cursor != 0 {
            xcall!(self.api, XFreeCursor(display, self.hidden_cursor));
            self.hidden_cursor = 0;
        }
        if !self.size_hints.is_null() {
            xcall!(self.api, XFree(self.size_hints.cast()));
            self.size_hints = ptr::null_mut();
        }
        if self.window != 0 {
            xcall!(self.api, XUnmapWindow(display, self.window));
            xcall!(self.api, XDestroyWindow(display, self.window));
        }
        xcall!(self.api, XCloseDisplay(display));
        self.display = ptr::null_mut();
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        if self.destroyed {
            return None;
        }
        Some(RawWindowHandle::Xlib(XlibWindowHandle::new(self.window)))
    }

    fn display_handle(&self) -> Option<RawDisplayHandle> {
        let display = NonNull::new(self.display.cast::<c_void>())?;
        Some(RawDisplayHandle::Xlib(XlibDisplayHandle::new(Some(display), self.screen)))
    }
}

impl Drop for X11Window {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use x11_dl::keysym::{XK_Escape, XK_a};
    use x11_dl::xlib::{XButtonEvent, XKeyEvent, XMotionEvent};

    use super::*;
    use crate::input::Key;

    const WM_PROTOCOLS: Atom = 301;
    const WM_DELETE_WINDOW: Atom = 302;

    fn atoms() -> Atoms {
        Atoms { wm_protocols: WM_PROTOCOLS, wm_delete_window: WM_DELETE_WINDOW, ..Atoms::default() }
    }

    fn mapping() -> KeyboardMapping {
        // Keycode 9 = Escape, keycode 10 = a/A.
        KeyboardMapping::new(9, 2, vec![XK_Escape as KeySym, 0, XK_a as KeySym, 0])
    }

    fn key_event(type_: c_int, keycode: c_uint) -> XEvent {
        let mut key: XKeyEvent = unsafe { mem::zeroed() };
        key.type_ = type_;
        key.keycode = keycode;
        XEvent { key }
    }

    fn button_event(type_: c_int, button: c_uint) -> XEvent {
        let mut ev: XButtonEvent = unsafe { mem::zeroed() };
        ev.type_ = type_;
        ev.button = button;
        XEvent { button: ev }
    }

    fn client_message(message_type: Atom, data0: c_long) -> XEvent {
        let mut client: XClientMessageEvent = unsafe { mem::zeroed() };
        client.type_ = xlib::ClientMessage;
        client.message_type = message_type;
        client.format = 32;
        client.data.set_long(0, data0);
        XEvent { client_message: client }
    }

    fn translate(ev: &XEvent) -> Option<X11Action> {
        translate_event(ev, &mapping(), &atoms())
    }

    #[test]
    fn key_press_and_release_go_through_keysyms() {
        assert_eq!(
            translate(&key_event(xlib::KeyPress, 10)),
            Some(X11Action::Input(InputEvent::pressed(Key::A)))
        );
        assert_eq!(
            translate(&key_event(xlib::KeyRelease, 9)),
            Some(X11Action::Input(InputEvent::released(Key::Escape)))
        );
        assert_eq!(translate(&key_event(xlib::KeyPress, 200)), None);
    }

    #[test]
    fn buttons_bypass_the_keysym_table() {
        // Keycode 9 would be Escape; button 9 is the forward button.
        assert_eq!(
            translate(&button_event(xlib::ButtonPress, 9)),
            Some(X11Action::Input(InputEvent::pressed(Key::MouseForward)))
        );
        assert_eq!(
            translate(&button_event(xlib::ButtonRelease, 1)),
            Some(X11Action::Input(InputEvent::released(Key::MouseLeft)))
        );
        assert_eq!(translate(&button_event(xlib::ButtonPress, 4)), None);
    }

    #[test]
    fn motion_updates_pointer() {
        let mut motion: XMotionEvent = unsafe { mem::zeroed() };
        motion.type_ = xlib::MotionNotify;
        motion.x = 40;
        motion.y = 25;
        assert_eq!(
            translate(&XEvent { motion }),
            Some(X11Action::Input(InputEvent::PointerMoved { x: 40.0, y: 25.0 }))
        );
    }

    #[test]
    fn delete_window_message_requests_close() {
        assert_eq!(translate(&client_message(WM_PROTOCOLS, WM_DELETE_WINDOW as c_long)), Some(X11Action::Close));
    }

    #[test]
    fn other_client_messages_are_ignored() {
        // Right protocol, wrong atom.
        assert_eq!(translate(&client_message(WM_PROTOCOLS, 999)), None);
        // Delete atom outside WM_PROTOCOLS.
        assert_eq!(translate(&client_message(555, WM_DELETE_WINDOW as c_long)), None);
    }

    #[test]
    fn mapping_changes_trigger_refresh() {
        let mut ev: XEvent = unsafe { mem::zeroed() };
        ev.type_ = xlib::MappingNotify;
        assert_eq!(translate(&ev), Some(X11Action::RefreshMapping));
    }

    #[test]
    fn pumped_events_land_in_input_state() {
        let mut input = InputState::default();
        for ev in [key_event(xlib::KeyPress, 10), button_event(xlib::ButtonPress, 3)] {
            if let Some(X11Action::Input(ev)) = translate(&ev) {
                input.apply_event(ev);
            }
        }
        assert!(input.is_down(Key::A));
        assert!(input.is_down(Key::MouseRight));
    }
}
