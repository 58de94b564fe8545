//! Frame timing driven by an injectable tick source
//!
//! The original engine reprogrammed the PC interval timer and counted
//! ticks in an interrupt handler. Here the counter is behind a trait so
//! the game loop can run on wall-clock time and tests on a scripted one.

use std::time::Instant;

/// Tick frequency the timing state assumes
pub const TICKS_PER_SEC: u64 = 1000;

/// Monotonically increasing tick counter
pub trait TickSource {
    fn ticks(&self) -> u64;
}

/// Wall-clock tick source at 1000 ticks per second
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn ticks(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Per-frame timing state for the main loop
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    /// Tick count sampled at the start of the current frame
    pub ticks: u64,
    /// Tick count sampled for the previous frame
    pub last_time: u64,
    /// Ticks elapsed between the last two samples
    pub delta_time: u64,
    /// Frames sampled so far
    pub frame_count: u64,
    /// Main loop control flag
    pub running: bool,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            last_time: 0,
            delta_time: 0,
            frame_count: 0,
            running: true,
        }
    }

    /// Sample the tick source once per frame
    pub fn update(&mut self, source: &dyn TickSource) {
        self.ticks = source.ticks();
        self.delta_time = self.ticks.saturating_sub(self.last_time);
        self.last_time = self.ticks;
        self.frame_count += 1;
    }

    /// Ask the main loop to exit
    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct ScriptedClock {
        now: Cell<u64>,
    }

    impl ScriptedClock {
        fn new() -> Self {
            Self { now: Cell::new(0) }
        }

        fn advance(&self, ticks: u64) {
            self.now.set(self.now.get() + ticks);
        }
    }

    impl TickSource for ScriptedClock {
        fn ticks(&self) -> u64 {
            self.now.get()
        }
    }

    #[test]
    fn test_update_tracks_delta() {
        let clock = ScriptedClock::new();
        let mut timing = FrameTiming::new();

        clock.advance(16);
        timing.update(&clock);
        assert_eq!(timing.ticks, 16);
        assert_eq!(timing.delta_time, 16);
        assert_eq!(timing.frame_count, 1);

        clock.advance(20);
        timing.update(&clock);
        assert_eq!(timing.delta_time, 20);
        assert_eq!(timing.frame_count, 2);
    }

    #[test]
    fn test_zero_elapsed_frame() {
        let clock = ScriptedClock::new();
        let mut timing = FrameTiming::new();
        timing.update(&clock);
        timing.update(&clock);
        assert_eq!(timing.delta_time, 0);
        assert_eq!(timing.frame_count, 2);
    }

    #[test]
    fn test_stop() {
        let mut timing = FrameTiming::new();
        assert!(timing.running);
        timing.stop();
        assert!(!timing.running);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.ticks();
        let b = clock.ticks();
        assert!(b >= a);
    }
}
