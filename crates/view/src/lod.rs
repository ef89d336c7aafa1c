//! Discrete level of detail from camera proximity.
//!
//! Automatic mode measures the distance from the camera to the nearest star (or to the
//! origin when no index is available) every few frames and maps it through nested
//! thresholds. Manual mode pins the level to whatever the caller set.

use crate::config::{LodConfig, ViewConfigError};
use glam::Vec3;
use spatial::PointOctree;

/// Star sprite size per level, far to very near.
pub const STAR_SIZE_LOD: [f32; 4] = [15.0, 12.0, 9.0, 6.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LodLevel {
    Far = 0,
    Mid = 1,
    Near = 2,
    VeryNear = 3,
}

impl LodLevel {
    pub const ALL: [LodLevel; 4] = [
        LodLevel::Far,
        LodLevel::Mid,
        LodLevel::Near,
        LodLevel::VeryNear,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            LodLevel::Far => "far",
            LodLevel::Mid => "mid",
            LodLevel::Near => "near",
            LodLevel::VeryNear => "very near",
        }
    }
}

/// Absolute distance thresholds for one galaxy radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodThresholds {
    pub mid: f32,
    pub near: f32,
    pub very_near: f32,
}

impl LodThresholds {
    pub fn new(config: &LodConfig, galaxy_radius: f32) -> Self {
        Self {
            mid: galaxy_radius * config.mid_factor,
            near: galaxy_radius * config.near_factor,
            very_near: galaxy_radius * config.very_near_factor,
        }
    }

    pub fn level_for_distance(&self, distance: f32) -> LodLevel {
        if distance < self.very_near {
            LodLevel::VeryNear
        } else if distance < self.near {
            LodLevel::Near
        } else if distance < self.mid {
            LodLevel::Mid
        } else {
            LodLevel::Far
        }
    }
}

/// Emitted when the raw level changes, and once on the first update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodChange {
    pub level: i32,
    /// `None` for the initial report.
    pub previous: Option<i32>,
    pub manual: bool,
}

#[derive(Debug, Clone)]
pub struct LodController {
    thresholds: LodThresholds,
    throttle_frames: u64,
    level: i32,
    manual: Option<i32>,
    frame: u64,
    last_recompute: Option<u64>,
    last_distance: Option<f32>,
    reported: bool,
}

impl LodController {
    pub fn new(config: &LodConfig, galaxy_radius: f32) -> Result<Self, ViewConfigError> {
        config.validate()?;
        if !(galaxy_radius.is_finite() && galaxy_radius > 0.0) {
            return Err(ViewConfigError::InvalidRadius(galaxy_radius));
        }
        Ok(Self {
            thresholds: LodThresholds::new(config, galaxy_radius),
            throttle_frames: u64::from(config.throttle_frames),
            level: LodLevel::Far.index(),
            manual: None,
            frame: 0,
            last_recompute: None,
            last_distance: None,
            reported: false,
        })
    }

    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// Current level as set, possibly outside the table range in manual mode.
    pub fn raw_level(&self) -> i32 {
        self.level
    }

    pub fn level(&self) -> Option<LodLevel> {
        LodLevel::from_index(self.level)
    }

    /// Level clamped to a valid index of a lookup table with `table_len` entries.
    pub fn checked_level(&self, table_len: usize) -> usize {
        let max = table_len.saturating_sub(1) as i64;
        (self.level as i64).clamp(0, max) as usize
    }

    pub fn star_size(&self) -> f32 {
        STAR_SIZE_LOD[self.checked_level(STAR_SIZE_LOD.len())]
    }

    pub fn is_manual(&self) -> bool {
        self.manual.is_some()
    }

    pub fn manual_level(&self) -> Option<i32> {
        self.manual
    }

    /// Distance measured on the last automatic recompute.
    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Frame of the last automatic recompute.
    pub fn last_recompute_frame(&self) -> Option<u64> {
        self.last_recompute
    }

    /// Pin the level (`Some`) or return to automatic mode (`None`). A pinned level applies
    /// immediately; automatic mode recomputes on the next update.
    pub fn set_manual(&mut self, level: Option<i32>) -> Option<LodChange> {
        self.manual = level;
        match level {
            Some(level) => {
                log::debug!("LOD pinned to {}", level);
                self.apply(level)
            }
            None => {
                self.last_recompute = None;
                None
            }
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, camera: Vec3, index: Option<&PointOctree>) -> Option<LodChange> {
        self.frame += 1;

        match self.manual {
            Some(level) => self.apply(level),
            None if self.recompute_due() => {
                self.last_recompute = Some(self.frame);
                let distance = camera_distance(camera, index);
                self.last_distance = Some(distance);
                let level = self.thresholds.level_for_distance(distance);
                self.apply(level.index())
            }
            None => None,
        }
    }

    fn recompute_due(&self) -> bool {
        self.last_recompute
            .map_or(true, |last| self.frame - last >= self.throttle_frames)
    }

    /// The first applied level is always reported, even if unchanged.
    fn apply(&mut self, level: i32) -> Option<LodChange> {
        if level == self.level && self.reported {
            return None;
        }
        let previous = self.reported.then_some(self.level);
        self.level = level;
        self.reported = true;
        log::debug!("LOD level {:?} -> {}", previous, level);
        Some(LodChange {
            level,
            previous,
            manual: self.is_manual(),
        })
    }
}

/// Distance from `camera` to the nearest indexed star, or to the origin without one.
pub fn camera_distance(camera: Vec3, index: Option<&PointOctree>) -> f32 {
    index
        .and_then(|tree| tree.nearest(camera))
        .map_or_else(|| camera.length(), |n| n.distance_sq.sqrt())
}
