//! One call per rendered frame: LOD and camera dynamics together.

use crate::camera_dynamics::{CameraDynamicsMonitor, CameraDynamicsState};
use crate::config::{ViewConfig, ViewConfigError};
use crate::lod::{LodChange, LodController, STAR_SIZE_LOD};
use engine_core::CameraPose;
use spatial::PointOctree;

/// What the renderer needs this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub lod_level: i32,
    /// `lod_level` clamped into the star size table.
    pub lod_checked: usize,
    pub star_size: f32,
    pub optimized_mode: bool,
    pub lod_changed: Option<LodChange>,
    /// New optimized-mode flag, when it was applied this frame.
    pub optimized_changed: Option<bool>,
    pub dynamics: CameraDynamicsState,
}

impl FrameOutput {
    pub fn has_events(&self) -> bool {
        self.lod_changed.is_some() || self.optimized_changed.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ViewController {
    pub lod: LodController,
    pub dynamics: CameraDynamicsMonitor,
}

impl ViewController {
    pub fn new(
        config: &ViewConfig,
        galaxy_radius: f32,
        requested_optimized: bool,
    ) -> Result<Self, ViewConfigError> {
        Ok(Self {
            lod: LodController::new(&config.lod, galaxy_radius)?,
            dynamics: CameraDynamicsMonitor::new(&config.dynamics, requested_optimized)?,
        })
    }

    pub fn update(
        &mut self,
        dt: f32,
        pose: &CameraPose,
        index: Option<&PointOctree>,
    ) -> FrameOutput {
        let lod_changed = self.lod.update(pose.position, index);
        let optimized_changed = self.dynamics.update(dt, pose.rotation);
        let dynamics = *self.dynamics.state();

        FrameOutput {
            lod_level: self.lod.raw_level(),
            lod_checked: self.lod.checked_level(STAR_SIZE_LOD.len()),
            star_size: self.lod.star_size(),
            optimized_mode: dynamics.optimized_mode,
            lod_changed,
            optimized_changed,
            dynamics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Quat, Vec3};

    #[test]
    fn first_frame_reports_both_signals() {
        let mut view = ViewController::new(&ViewConfig::default(), 1000.0, false).unwrap();
        let pose = CameraPose::from_position(Vec3::new(0.0, 0.0, 1500.0));
        let out = view.update(1.0 / 60.0, &pose, None);
        assert!(out.has_events());
        assert_eq!(out.lod_changed.map(|c| c.level), Some(0));
        assert_eq!(out.optimized_changed, Some(false));
        assert_eq!(out.star_size, 15.0);

        let out = view.update(1.0 / 60.0, &pose, None);
        assert!(!out.has_events());
    }

    #[test]
    fn orbiting_camera_rotates_without_changing_lod() {
        let stars = [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)];
        let tree = PointOctree::from_points(&stars);
        let mut view = ViewController::new(&ViewConfig::default(), 1000.0, false).unwrap();
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 900.0), Vec3::ZERO, Vec3::Y);

        view.update(1.0 / 60.0, &pose, Some(&tree));
        for _ in 0..30 {
            pose.orbit_y(0.01);
            let out = view.update(1.0 / 60.0, &pose, Some(&tree));
            assert_eq!(out.lod_changed, None);
            assert!(out.dynamics.is_rotating);
        }
        assert!(view.dynamics.state().smoothed_angular_speed > 0.3);
    }

    #[test]
    fn manual_level_and_optimized_request() {
        let mut view = ViewController::new(&ViewConfig::default(), 1000.0, false).unwrap();
        let pose = CameraPose::from_position_rotation(Vec3::splat(10.0), Quat::IDENTITY);
        view.update(0.016, &pose, None);

        view.lod.set_manual(Some(9));
        view.dynamics.request_optimized_mode(true);
        let out = view.update(0.016, &pose, None);
        assert_eq!(out.lod_level, 9);
        assert_eq!(out.lod_checked, 3);
        assert_eq!(out.optimized_changed, Some(true));
        assert!(out.optimized_mode);
    }
}
