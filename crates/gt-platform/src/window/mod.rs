//! Window + event pump.
//!
//! `WindowApi` is what the engine holds; the OS work sits behind the
//! `WindowBackend` trait:
//! - `x11`: libX11 resolved at runtime (Linux)
//! - `winit`: winit driven in polling mode (Windows, macOS, Linux fallback)
//! - `headless`: scripted events, no display

mod api;
mod backend;
mod headless;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
mod winit;

#[cfg(target_os = "linux")]
mod x11;

use std::fmt;
use std::str::FromStr;

pub use api::WindowApi;
pub use backend::{PumpStatus, WindowBackend};
pub use headless::{HeadlessEvent, HeadlessWindow};

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use self::winit::WinitWindow;

#[cfg(target_os = "linux")]
pub use self::x11::X11Window;

use crate::error::{PlatformError, Result};

/// Window creation parameters.
///
/// The window is not resizable: its size is pinned to `width` x `height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GT".to_string(),
            width: 1280,
            height: 768,
        }
    }
}

/// Window backend selection.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BackendKind {
    /// X11 on Linux when libX11 and a display are available, winit otherwise.
    #[default]
    Auto,
    X11,
    Winit,
    Headless,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Auto => "auto",
            BackendKind::X11 => "x11",
            BackendKind::Winit => "winit",
            BackendKind::Headless => "headless",
        })
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendKind::Auto),
            "x11" => Ok(BackendKind::X11),
            "winit" => Ok(BackendKind::Winit),
            "headless" => Ok(BackendKind::Headless),
            other => Err(format!("unknown window backend `{other}`")),
        }
    }
}

/// Opens a window with the requested backend.
pub fn create_backend(
    config: &WindowConfig,
    kind: BackendKind,
    verbose_modules: bool,
) -> Result<Box<dyn WindowBackend>> {
    match kind {
        BackendKind::Headless => Ok(Box::new(HeadlessWindow::new())),
        BackendKind::X11 => open_x11(config, verbose_modules),
        BackendKind::Winit => open_winit(config),
        BackendKind::Auto => match open_x11(config, verbose_modules) {
            Ok(backend) => Ok(backend),
            Err(e) => {
                if !matches!(e, PlatformError::BackendUnavailable(_)) {
                    log::warn!("x11 backend unavailable, falling back to winit: {e}");
                }
                open_winit(config)
            }
        },
    }
}

#[cfg(target_os = "linux")]
fn open_x11(config: &WindowConfig, verbose_modules: bool) -> Result<Box<dyn WindowBackend>> {
    Ok(Box::new(X11Window::create(config, verbose_modules)?))
}

#[cfg(not(target_os = "linux"))]
fn open_x11(_config: &WindowConfig, _verbose_modules: bool) -> Result<Box<dyn WindowBackend>> {
    Err(PlatformError::BackendUnavailable("x11"))
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
fn open_winit(config: &WindowConfig) -> Result<Box<dyn WindowBackend>> {
    Ok(Box::new(WinitWindow::create(config)?))
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn open_winit(_config: &WindowConfig) -> Result<Box<dyn WindowBackend>> {
    Err(PlatformError::BackendUnavailable("winit"))
}
