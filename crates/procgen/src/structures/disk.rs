//! General disk: stars between the bulge edge and the rim, thinning outward.

use super::main_galaxy::ShapeSample;
use super::{edge_taper, safe_ratio, signed_unit};
use crate::config::GalaxyConfig;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

const VERTICAL_HEADROOM: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskShape {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Half-thickness at the inner edge.
    pub base_thickness: f32,
}

impl DiskShape {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            inner_radius: config.galaxy_radius * config.bulge.size_factor,
            outer_radius: config.galaxy_radius,
            base_thickness: config.galaxy_radius * config.disk.y_scale,
        }
    }

    /// Thickness taper at `radius`: full at the bulge edge, 15% at the rim.
    pub fn taper(&self, radius: f32) -> f32 {
        edge_taper(safe_ratio(
            radius - self.inner_radius,
            self.outer_radius - self.inner_radius,
        ))
    }

    pub fn propose(&self, rng: &mut dyn RngCore) -> ShapeSample {
        let r = (self.inner_radius + rng.gen::<f32>() * (self.outer_radius - self.inner_radius))
            .min(self.outer_radius);
        let angle = rng.gen::<f32>() * TAU;
        let y = signed_unit(rng) * self.base_thickness * self.taper(r);
        ShapeSample {
            position: Vec3::new(angle.cos() * r, y, angle.sin() * r),
            primary_radius: r,
        }
    }

    pub fn vertical_limit(&self, primary_radius: f32) -> f32 {
        self.base_thickness * self.taper(primary_radius) * VERTICAL_HEADROOM
    }
}
