//! GT platform layer.
//!
//! This crate owns the OS-facing pieces of the engine: window creation and
//! event pumping, raw input state, frame pacing, runtime module loading and
//! console logging. Game code talks to all of it through [`Engine`].

pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod module;
pub mod time;
pub mod window;

pub use crate::config::EngineConfig;
pub use crate::core::{run, run_engine, AppControl, Engine, Game};
pub use crate::error::{PlatformError, Result};
