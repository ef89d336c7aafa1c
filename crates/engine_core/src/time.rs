//! Frame timing for the host loop.

use std::time::{Duration, Instant};

/// Tracks per-frame delta time and the frame counter.
///
/// Host loops either call [`FrameClock::tick`] (wall clock) or
/// [`FrameClock::advance`] (scripted/headless runs with a fixed step).
#[derive(Debug)]
pub struct FrameClock {
    /// Time of the last wall-clock tick.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Start a new frame using the wall clock.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Start a new frame with an explicit delta.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (from the last frame only).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(20));
        clock.advance(Duration::from_millis(30));
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.delta_seconds() - 0.03).abs() < 1e-6);
        assert!((clock.elapsed_seconds() - 0.05).abs() < 1e-6);
        assert!((clock.fps() - 33.333).abs() < 0.01);
    }

    #[test]
    fn fps_zero_before_first_frame() {
        let clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
    }
}
