//! Platform event translation into engine input.

#[cfg(target_os = "linux")]
pub mod x11;

pub mod winit;
