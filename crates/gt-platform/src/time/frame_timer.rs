use std::time::Duration;

use super::source::{MonotonicTime, TimeSource};

/// Portion of the frame budget left to busy-waiting after a pacing sleep.
///
/// OS sleeps overshoot by up to a scheduler tick, so the last stretch spins.
const SPIN_MARGIN: f64 = 0.001;

/// Engine timer: frame pacing, delta time and frame rate.
///
/// A frame is the span between `begin_frame` and `end_frame`. With a target
/// frame time set, `end_frame` sleeps when enough budget is left, then spins
/// until the target is reached.
#[derive(Debug, Clone)]
pub struct FrameTimer<S: TimeSource = MonotonicTime> {
    source: S,

    /// Time the engine started, in source seconds.
    engine_start_time: f64,
    frame_start: f64,

    /// Measured duration of the last frame, in seconds.
    delta_time: f64,

    /// Target frame duration in seconds. Zero means uncapped.
    frame_time: f64,

    /// `ceil(1 / delta_time)` of the last frame.
    frame_rate: u32,

    frame_index: u64,
}

impl FrameTimer<MonotonicTime> {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }
}

impl Default for FrameTimer<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> FrameTimer<S> {
    pub fn with_source(source: S) -> Self {
        let now = source.now();
        Self {
            source,
            engine_start_time: now,
            frame_start: now,
            delta_time: 0.0,
            frame_time: 0.0,
            frame_rate: 0,
            frame_index: 0,
        }
    }

    /// Sets the pacing target. `0` removes the cap.
    pub fn set_target_fps(&mut self, target: u32) {
        self.frame_time = if target == 0 { 0.0 } else { 1.0 / target as f64 };
    }

    pub fn target_frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Marks the start of a frame.
    pub fn begin_frame(&mut self) {
        self.frame_start = self.source.now();
    }

    /// Paces the frame to the target and returns its final duration in seconds.
    pub fn end_frame(&mut self) -> f64 {
        let mut delta = self.source.now() - self.frame_start;
        let target = self.frame_time;

        if target > 0.0 {
            let remaining = target - delta;
            if remaining > delta * 0.9 {
                let nap = remaining - SPIN_MARGIN;
                if nap > 0.0 {
                    self.source.sleep(Duration::from_secs_f64(nap));
                }
            }
            while delta < target {
                std::hint::spin_loop();
                delta = self.source.now() - self.frame_start;
            }
        }

        self.delta_time = delta;
        self.frame_rate = if delta > 0.0 { (1.0 / delta).ceil() as u32 } else { 0 };
        self.frame_index = self.frame_index.wrapping_add(1);

        log::trace!("frame {} took {:.3} ms", self.frame_index, delta * 1000.0);
        delta
    }

    /// Current time in source seconds.
    pub fn time(&self) -> f64 {
        self.source.now()
    }

    pub fn engine_start_time(&self) -> f64 {
        self.engine_start_time
    }

    /// Seconds since the timer was created.
    pub fn elapsed(&self) -> f64 {
        self.source.now() - self.engine_start_time
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Number of completed frames.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Blocks for `duration`.
    pub fn wait(&self, duration: Duration) {
        self.source.sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Clock that advances by `tick` on every read and by the full duration on sleep.
    struct ScriptedTime {
        now: Cell<f64>,
        tick: f64,
        sleeps: RefCell<Vec<Duration>>,
    }

    impl ScriptedTime {
        fn new(tick: f64) -> Self {
            Self { now: Cell::new(0.0), tick, sleeps: RefCell::new(Vec::new()) }
        }

        fn advance(&self, secs: f64) {
            self.now.set(self.now.get() + secs);
        }
    }

    impl TimeSource for &ScriptedTime {
        fn now(&self) -> f64 {
            let t = self.now.get();
            self.now.set(t + self.tick);
            t
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.advance(duration.as_secs_f64());
        }
    }

    const TICK: f64 = 0.0001;

    #[test]
    fn uncapped_frame_neither_sleeps_nor_spins() {
        let clock = ScriptedTime::new(TICK);
        let mut timer = FrameTimer::with_source(&clock);

        timer.begin_frame();
        clock.advance(0.004);
        let delta = timer.end_frame();

        assert!(clock.sleeps.borrow().is_empty());
        assert!((delta - 0.0041).abs() < 1e-9);
        assert_eq!(timer.frame_rate(), (1.0 / delta).ceil() as u32);
        assert_eq!(timer.frame_index(), 1);
    }

    #[test]
    fn short_frame_sleeps_then_spins_to_target() {
        let clock = ScriptedTime::new(TICK);
        let mut timer = FrameTimer::with_source(&clock);
        timer.set_target_fps(50);

        timer.begin_frame();
        clock.advance(0.005);
        let delta = timer.end_frame();

        let sleeps = clock.sleeps.borrow();
        assert_eq!(sleeps.len(), 1);
        // 20 ms budget, ~5 ms used, 1 ms kept for spinning.
        assert!((sleeps[0].as_secs_f64() - 0.0139).abs() < 1e-6);
        assert!(delta >= 0.02);
        assert!(delta < 0.02 + 3.0 * TICK);
        assert_eq!(timer.frame_rate(), 50);
    }

    #[test]
    fn nearly_full_frame_only_spins() {
        let clock = ScriptedTime::new(TICK);
        let mut timer = FrameTimer::with_source(&clock);
        timer.set_target_fps(50);

        timer.begin_frame();
        // 9 ms left is not more than 90% of the 11 ms already spent.
        clock.advance(0.011);
        let delta = timer.end_frame();

        assert!(clock.sleeps.borrow().is_empty());
        assert!(delta >= 0.02);
    }

    #[test]
    fn overlong_frame_is_reported_as_is() {
        let clock = ScriptedTime::new(TICK);
        let mut timer = FrameTimer::with_source(&clock);
        timer.set_target_fps(60);

        timer.begin_frame();
        clock.advance(0.05);
        let delta = timer.end_frame();

        assert!(clock.sleeps.borrow().is_empty());
        assert!((delta - 0.0501).abs() < 1e-9);
        assert_eq!(timer.frame_rate(), 20);
    }

    #[test]
    fn zero_target_fps_uncaps() {
        let mut timer = FrameTimer::new();
        timer.set_target_fps(120);
        assert!((timer.target_frame_time() - 1.0 / 120.0).abs() < 1e-12);
        timer.set_target_fps(0);
        assert_eq!(timer.target_frame_time(), 0.0);
    }

    #[test]
    fn elapsed_counts_from_creation() {
        let clock = ScriptedTime::new(0.0);
        let timer = FrameTimer::with_source(&clock);
        clock.advance(1.5);
        assert_eq!(timer.engine_start_time(), 0.0);
        assert!((timer.elapsed() - 1.5).abs() < 1e-12);
        timer.wait(Duration::from_millis(500));
        assert!((timer.time() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn real_clock_meets_target() {
        let mut timer = FrameTimer::new();
        timer.set_target_fps(100);
        timer.begin_frame();
        let delta = timer.end_frame();
        assert!(delta >= 0.01);
        assert_eq!(timer.delta_time(), delta);
    }
}
