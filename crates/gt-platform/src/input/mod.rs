//! Input subsystem.
//!
//! Public API is platform-agnostic. Window backends translate platform events
//! into `InputEvent`s through the helpers in `platform`, and the engine reads
//! key state back through `InputState` (the engine's input table).

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
