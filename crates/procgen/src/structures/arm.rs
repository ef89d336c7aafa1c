//! Spiral arms.
//!
//! A star's radius is drawn between the bar end and the rim; its angle follows the
//! spiral (proportional to the normalized radius) plus a fixed offset per arm. Arms taper
//! from full width at the bar to 15% at the rim. Scatter is drawn in the arm's local frame
//! and rotated into place. A small share of stars form looser "sub-arms" at an angular
//! offset from their parent arm.

use super::main_galaxy::ShapeSample;
use super::{edge_taper, safe_ratio, signed_unit};
use crate::config::{GalaxyConfig, SpiralArmParams};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

const VERTICAL_HEADROOM: f32 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmShape {
    pub params: SpiralArmParams,
    pub galaxy_radius: f32,
    pub bar_length: f32,
    /// Arm width at the bar end.
    pub width: f32,
}

impl ArmShape {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            params: config.arms,
            galaxy_radius: config.galaxy_radius,
            bar_length: config.galaxy_radius * config.bar.length_factor,
            width: config.galaxy_radius * config.arms.width_factor,
        }
    }

    /// Position along the arm, 0 at the bar end and 1 at the rim.
    pub fn normalized_radius(&self, radius: f32) -> f32 {
        safe_ratio(
            (radius - self.bar_length).max(0.0),
            self.galaxy_radius - self.bar_length,
        )
        .min(1.0)
    }

    /// Angle of the arm centerline at `radius` for arm `arm_index`.
    pub fn centerline_angle(&self, radius: f32, arm_index: u32) -> f32 {
        let base = self.normalized_radius(radius) * self.params.tightness * self.params.angle_factor;
        base + arm_index as f32 / self.params.count.max(1) as f32 * TAU
    }

    pub fn propose(&self, arm_index: u32, rng: &mut dyn RngCore) -> ShapeSample {
        let r = (self.bar_length
            + rng.gen::<f32>().powf(self.params.radius_power) * (self.galaxy_radius - self.bar_length))
            .min(self.galaxy_radius);

        let mut angle = self.centerline_angle(r, arm_index);
        let mut width = self.width * edge_taper(self.normalized_radius(r));
        if rng.gen::<f32>() < self.params.sub_arm_chance {
            angle += (rng.gen::<f32>() - 0.5) * self.params.sub_arm_angle_range;
            width *= self.params.sub_arm_scatter_factor;
        }

        let magnitude = rng.gen::<f32>().powf(self.params.point_density_power) * width;
        let local_x = magnitude * signed_unit(rng);
        let local_z = magnitude * signed_unit(rng);
        let (sin, cos) = angle.sin_cos();
        let scatter_x = local_x * cos - local_z * sin;
        let scatter_z = local_x * sin + local_z * cos;

        let y = signed_unit(rng) * width * self.params.y_scale;
        ShapeSample {
            position: Vec3::new(cos * r + scatter_x, y, sin * r + scatter_z),
            primary_radius: r,
        }
    }

    pub fn vertical_limit(&self, primary_radius: f32) -> f32 {
        self.width * edge_taper(self.normalized_radius(primary_radius)) * self.params.y_scale * VERTICAL_HEADROOM
    }

    /// Arm stars shrink slightly toward the rim.
    pub fn size_scale(&self, primary_radius: f32) -> f32 {
        1.1 - self.normalized_radius(primary_radius) * 0.3
    }
}
