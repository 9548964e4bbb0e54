use std::time::{Duration, Instant};

/// Clock and sleeper used by the frame timer.
pub trait TimeSource {
    /// Monotonic time in seconds from an arbitrary origin.
    fn now(&self) -> f64;

    /// Blocks the calling thread for about `duration`.
    fn sleep(&self, duration: Duration);
}

/// `Instant`-backed time source; the origin is its creation time.
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
