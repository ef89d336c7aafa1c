//! Scripted camera: dive from far out to a close pass and back while orbiting.

use crate::config::FlightConfig;
use engine_core::CameraPose;
use glam::Vec3;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct FlightPlan {
    config: FlightConfig,
    galaxy_radius: f32,
}

impl FlightPlan {
    pub fn new(config: FlightConfig, galaxy_radius: f32) -> Self {
        Self {
            config,
            galaxy_radius,
        }
    }

    pub fn frames(&self) -> u64 {
        self.config.frames
    }

    /// Distance from the galactic center at `frame`: far at both ends, nearest midway.
    pub fn distance_at(&self, frame: u64) -> f32 {
        let far = self.galaxy_radius * self.config.far_factor;
        let near = self.galaxy_radius * self.config.near_factor;
        let t = match self.config.frames {
            0 | 1 => 0.0,
            n => frame.min(n - 1) as f32 / (n - 1) as f32,
        };
        // 1 at the ends, 0 in the middle.
        let swing = (t * 2.0 - 1.0).abs();
        near + (far - near) * swing * swing
    }

    pub fn pose_at(&self, frame: u64) -> CameraPose {
        let distance = self.distance_at(frame);
        let planar = distance / (1.0 + self.config.elevation * self.config.elevation).sqrt();
        let start = Vec3::new(0.0, planar * self.config.elevation, planar);
        let mut pose = CameraPose::looking_at(start, Vec3::ZERO, Vec3::Y);
        pose.orbit_y(self.config.orbit_speed * frame as f32);
        pose
    }

    pub fn frame_time(&self, frame: u64) -> Duration {
        let secs = match self.config.slow_frames {
            Some((start, end)) if (start..end).contains(&frame) => self.config.slow_frame_time,
            _ => self.config.frame_time,
        };
        Duration::from_secs_f32(secs.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> FlightPlan {
        FlightPlan::new(FlightConfig::default(), 1000.0)
    }

    #[test]
    fn dives_in_and_back_out() {
        let p = plan();
        let last = p.frames() - 1;
        assert!((p.distance_at(0) - 2000.0).abs() < 1e-2);
        assert!((p.distance_at(last) - 2000.0).abs() < 1e-2);
        assert!(p.distance_at(last / 2) < 110.0);
        assert!(p.distance_at(100) > p.distance_at(200));
    }

    #[test]
    fn pose_distance_matches_schedule() {
        let p = plan();
        for frame in [0, 123, 450, 899] {
            let pose = p.pose_at(frame);
            let expected = p.distance_at(frame);
            assert!((pose.distance_from_origin() - expected).abs() < expected * 1e-4);
        }
    }

    #[test]
    fn slow_window_stretches_frames() {
        let p = plan();
        assert!((p.frame_time(10).as_secs_f32() - 1.0 / 60.0).abs() < 1e-6);
        assert!((p.frame_time(300).as_secs_f32() - 0.08).abs() < 1e-6);
        assert!((p.frame_time(420).as_secs_f32() - 1.0 / 60.0).abs() < 1e-6);
    }
}
