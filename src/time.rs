//! Frame timing for the render loop.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // once per redraw
//! let dt = clock.tick();
//! if !clock.is_paused() {
//!     field.advance_interaction(dt);
//!     field.step();
//! }
//! ```

use std::time::{Duration, Instant};

/// Longest delta reported for a single frame, in seconds.
///
/// A window that was hidden or dragged can stall for seconds; clamping keeps
/// the pointer spawner from catching up all at once.
pub const MAX_DELTA: f32 = 0.1;

/// Per-frame delta, frame count and a periodically sampled FPS.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    fps_fresh: bool,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(2),
            fps_fresh: false,
            paused: false,
        }
    }

    /// Advance to now. Returns the clamped delta in seconds (0 while paused).
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_secs = if self.paused { 0.0 } else { raw.min(MAX_DELTA) };

        let since = now.saturating_duration_since(self.fps_update_time);
        if since >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            self.fps_fresh = true;
        }

        self.delta_secs
    }

    /// Delta of the last tick in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames ticked so far, paused frames included.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS sample.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// The FPS sample, once per sampling interval.
    pub fn take_fps_sample(&mut self) -> Option<f32> {
        if std::mem::take(&mut self.fps_fresh) {
            Some(self.fps)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
