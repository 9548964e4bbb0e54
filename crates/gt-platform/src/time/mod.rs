//! Time subsystem.
//!
//! Frame pacing and engine time, kept testable through the `TimeSource` seam.
//! Intended usage:
//! - one `FrameTimer` per engine loop
//! - call `begin_frame()` before pumping the window, `end_frame()` after the
//!   game update to pace the frame and refresh delta time / frame rate

mod frame_timer;
mod source;

pub use frame_timer::FrameTimer;
pub use source::{MonotonicTime, TimeSource};
