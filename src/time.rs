//! Frame timing for the window host.
//!
//! [`FrameClock`] counts frames, tracks the time between them and keeps a
//! windowed FPS estimate. The host asks [`FrameClock::report_due`] to decide
//! when to refresh the window title or log a status line.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // Once per rendered frame:
//! clock.tick();
//! if clock.report_due() {
//!     log::info!("{:.1} fps", clock.fps());
//! }
//! ```

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    /// Seconds between the two most recent ticks.
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    /// Frame count and time at the start of the current FPS window.
    window_frames: u64,
    window_start: Instant,
    window: Duration,
    /// Set when an FPS window closes; cleared by `report_due`.
    report_pending: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(500))
    }

    /// Clock whose FPS estimate is refreshed every `window`.
    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
            window,
            report_pending: false,
        }
    }

    /// Record one rendered frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed >= self.window {
            let frames = self.frame_count - self.window_frames;
            self.fps = frames as f32 / elapsed.as_secs_f32();
            self.window_frames = self.frame_count;
            self.window_start = now;
            self.report_pending = true;
        }
    }

    /// True once after each FPS window closes.
    pub fn report_due(&mut self) -> bool {
        std::mem::take(&mut self.report_pending)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
