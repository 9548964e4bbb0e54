//! Engine-facing contracts.
//!
//! `Engine` bundles the window, input and timer tables; `Game` is what
//! higher layers implement; `run` drives one against the other.

mod app;
mod engine;
mod run;

pub use app::{AppControl, Game};
pub use engine::Engine;
pub use run::{run, run_engine};
