//! Camera rotation and frame-time telemetry.
//!
//! The monitor only reports. Optimized mode follows whatever the caller requests; the
//! degraded flag is a signal for the caller to act on.

use crate::config::{DynamicsConfig, ViewConfigError};
use glam::Quat;
use std::collections::VecDeque;

/// Frames shorter than this produce no angular speed sample.
const MIN_SPEED_DELTA: f32 = 1e-5;
/// Floor on the divisor of the angular speed.
const MIN_EFFECTIVE_DELTA: f32 = 0.001;
/// Weight of the previous smoothed speed in the moving average.
const SPEED_SMOOTHING: f32 = 0.5;

/// Snapshot of the monitor after an update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraDynamicsState {
    pub is_rotating: bool,
    /// Radians per second, this frame.
    pub raw_angular_speed: f32,
    pub smoothed_angular_speed: f32,
    /// Window mean once the window is full, otherwise the last frame's delta.
    pub average_frame_time: f32,
    pub performance_degraded: bool,
    pub optimized_mode: bool,
}

#[derive(Debug, Clone)]
pub struct CameraDynamicsMonitor {
    config: DynamicsConfig,
    state: CameraDynamicsState,
    /// Orientation at the last detected change.
    last_changed: Option<Quat>,
    /// Orientation on the previous frame.
    previous: Option<Quat>,
    /// Seconds until `is_rotating` clears.
    debounce_left: f32,
    frame_times: VecDeque<f32>,
    requested_optimized: bool,
    optimized_pending: bool,
}

impl CameraDynamicsMonitor {
    pub fn new(config: &DynamicsConfig, requested_optimized: bool) -> Result<Self, ViewConfigError> {
        config.validate()?;
        Ok(Self {
            config: *config,
            state: CameraDynamicsState::default(),
            last_changed: None,
            previous: None,
            debounce_left: 0.0,
            frame_times: VecDeque::with_capacity(config.frame_window),
            requested_optimized,
            optimized_pending: true,
        })
    }

    pub fn state(&self) -> &CameraDynamicsState {
        &self.state
    }

    pub fn is_rotating(&self) -> bool {
        self.state.is_rotating
    }

    pub fn is_optimized(&self) -> bool {
        self.state.optimized_mode
    }

    pub fn is_performance_degraded(&self) -> bool {
        self.state.performance_degraded
    }

    /// Request optimized mode on or off. Takes effect, and is reported, on the next update.
    pub fn request_optimized_mode(&mut self, enabled: bool) {
        if enabled != self.requested_optimized {
            self.requested_optimized = enabled;
            self.optimized_pending = true;
        }
    }

    /// Feed one frame. Returns the optimized-mode flag when it was (re)applied this frame,
    /// which includes the first update.
    pub fn update(&mut self, dt: f32, rotation: Quat) -> Option<bool> {
        self.track_rotation(dt, rotation);
        self.track_angular_speed(dt, rotation);
        self.track_frame_time(dt);

        if !self.optimized_pending {
            return None;
        }
        self.optimized_pending = false;
        self.state.optimized_mode = self.requested_optimized;
        log::debug!("optimized mode {}", self.requested_optimized);
        Some(self.requested_optimized)
    }

    fn track_rotation(&mut self, dt: f32, rotation: Quat) {
        match self.last_changed {
            None => self.last_changed = Some(rotation),
            Some(last) if last != rotation => {
                self.state.is_rotating = true;
                self.debounce_left = self.config.rotation_debounce_secs;
                self.last_changed = Some(rotation);
            }
            Some(_) if self.state.is_rotating => {
                self.debounce_left -= dt.max(0.0);
                if self.debounce_left <= 0.0 {
                    self.state.is_rotating = false;
                }
            }
            Some(_) => {}
        }
    }

    fn track_angular_speed(&mut self, dt: f32, rotation: Quat) {
        let previous = self.previous.replace(rotation).unwrap_or(rotation);
        let raw = if dt > MIN_SPEED_DELTA {
            previous.angle_between(rotation) / dt.max(MIN_EFFECTIVE_DELTA)
        } else {
            0.0
        };
        self.state.raw_angular_speed = raw;
        self.state.smoothed_angular_speed =
            self.state.smoothed_angular_speed * SPEED_SMOOTHING + raw * (1.0 - SPEED_SMOOTHING);
    }

    fn track_frame_time(&mut self, dt: f32) {
        if dt <= 0.0 {
            self.state.average_frame_time = 0.0;
            self.state.performance_degraded = false;
            self.frame_times.clear();
            return;
        }

        self.frame_times.push_back(dt);
        while self.frame_times.len() > self.config.frame_window {
            self.frame_times.pop_front();
        }
        let full = self.frame_times.len() == self.config.frame_window;
        self.state.average_frame_time = if full {
            self.frame_times.iter().sum::<f32>() / self.config.frame_window as f32
        } else {
            dt
        };

        if !self.state.is_rotating {
            self.state.performance_degraded = false;
            self.frame_times.clear();
        } else if full {
            let degraded = self.state.average_frame_time > self.config.degraded_frame_time;
            if degraded != self.state.performance_degraded {
                log::debug!(
                    "rotation performance {} (avg frame {:.1} ms)",
                    if degraded { "degraded" } else { "recovered" },
                    self.state.average_frame_time * 1000.0
                );
            }
            self.state.performance_degraded = degraded;
        }
    }
}
