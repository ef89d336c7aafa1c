//! View settings: LOD thresholds and camera dynamics tuning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewConfigError {
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidFactor { name: &'static str, value: f32 },
    #[error("LOD thresholds must nest: very_near ({very_near}) < near ({near}) < mid ({mid})")]
    ThresholdsNotNested { very_near: f32, near: f32, mid: f32 },
    #[error("LOD throttle must be at least one frame")]
    ZeroThrottle,
    #[error("galaxy radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("{name} must be positive, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },
    #[error("frame-time window must hold at least one sample")]
    EmptyWindow,
}

/// Distance thresholds (fractions of the galaxy radius) and recompute throttle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    pub mid_factor: f32,
    pub near_factor: f32,
    pub very_near_factor: f32,
    /// Automatic mode recomputes once every this many frames.
    pub throttle_frames: u32,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            mid_factor: 0.6,
            near_factor: 0.4,
            very_near_factor: 0.2,
            throttle_frames: 10,
        }
    }
}

impl LodConfig {
    pub fn validate(&self) -> Result<(), ViewConfigError> {
        for (name, value) in [
            ("mid_factor", self.mid_factor),
            ("near_factor", self.near_factor),
            ("very_near_factor", self.very_near_factor),
        ] {
            if !(value.is_finite() && value > 0.0 && value <= 1.0) {
                return Err(ViewConfigError::InvalidFactor { name, value });
            }
        }
        if !(self.very_near_factor < self.near_factor && self.near_factor < self.mid_factor) {
            return Err(ViewConfigError::ThresholdsNotNested {
                very_near: self.very_near_factor,
                near: self.near_factor,
                mid: self.mid_factor,
            });
        }
        if self.throttle_frames == 0 {
            return Err(ViewConfigError::ZeroThrottle);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// "Rotating" clears after this long without an orientation change.
    pub rotation_debounce_secs: f32,
    pub frame_window: usize,
    /// Average frame time above which rotation counts as degraded.
    pub degraded_frame_time: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            rotation_debounce_secs: 0.2,
            frame_window: 30,
            degraded_frame_time: 1.0 / 20.0,
        }
    }
}

impl DynamicsConfig {
    pub fn validate(&self) -> Result<(), ViewConfigError> {
        for (name, value) in [
            ("rotation_debounce_secs", self.rotation_debounce_secs),
            ("degraded_frame_time", self.degraded_frame_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ViewConfigError::InvalidDuration { name, value });
            }
        }
        if self.frame_window == 0 {
            return Err(ViewConfigError::EmptyWindow);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub lod: LodConfig,
    pub dynamics: DynamicsConfig,
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ViewConfigError> {
        self.lod.validate()?;
        self.dynamics.validate()
    }
}
