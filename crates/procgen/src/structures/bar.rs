//! Central bar: an elongated box along X, denser toward the center.

use super::main_galaxy::ShapeSample;
use super::signed_unit;
use crate::config::GalaxyConfig;
use glam::Vec3;
use rand::prelude::*;

/// Exponent applied to the length draw; >1 pulls bar stars toward the center.
const LENGTH_SKEW: f32 = 1.5;
/// Per-star width/thickness wobble; 1.5 means up to ±25%.
const FUZZINESS: f32 = 1.5;
/// Headroom over the nominal thickness before the vertical clamp kicks in.
const VERTICAL_HEADROOM: f32 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarShape {
    /// Half-length along X.
    pub length: f32,
    /// Half-width along Z.
    pub width: f32,
    pub y_scale: f32,
}

impl BarShape {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            length: config.galaxy_radius * config.bar.length_factor,
            width: config.galaxy_radius * config.bar.width_factor,
            y_scale: config.bar.y_scale,
        }
    }

    pub fn propose(&self, rng: &mut dyn RngCore) -> ShapeSample {
        let along = rng.gen::<f32>().powf(LENGTH_SKEW);
        let x = signed_unit(rng) * self.length * along;
        let z = signed_unit(rng) * self.width * fuzz(rng);
        let y = signed_unit(rng) * self.width * self.y_scale * fuzz(rng);
        ShapeSample {
            position: Vec3::new(x, y, z),
            primary_radius: (x * x + z * z).sqrt(),
        }
    }

    pub fn vertical_limit(&self) -> f32 {
        self.width * self.y_scale * VERTICAL_HEADROOM
    }
}

fn fuzz(rng: &mut dyn RngCore) -> f32 {
    1.0 + (rng.gen::<f32>() - 0.5) * (FUZZINESS - 1.0)
}
