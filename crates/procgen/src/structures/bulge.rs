//! Central bulge: an oblate spheroid shell around the bar.

use super::main_galaxy::ShapeSample;
use super::random_direction;
use crate::config::GalaxyConfig;
use rand::prelude::*;

/// Bulge radii below this share of the bar length are redrawn outside it.
const BAR_CLEARANCE: f32 = 0.6;
/// Absolute floor on the bulge radius, as a share of the bar length.
const BAR_FLOOR: f32 = 0.5;
const VERTICAL_LIMIT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeShape {
    pub radius: f32,
    pub y_scale: f32,
    pub density_power: f32,
    pub bar_length: f32,
}

impl BulgeShape {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            radius: config.galaxy_radius * config.bulge.size_factor,
            y_scale: config.bulge.y_scale,
            density_power: config.bulge.density_power,
            bar_length: config.galaxy_radius * config.bar.length_factor,
        }
    }

    pub fn propose(&self, rng: &mut dyn RngCore) -> ShapeSample {
        let inner = self.bar_length * BAR_CLEARANCE;
        let mut r = rng.gen::<f32>().powf(self.density_power) * self.radius;
        if r < inner {
            r = inner + rng.gen::<f32>() * (self.radius - inner);
        }
        let r = r.max(self.bar_length * BAR_FLOOR).min(self.radius);

        let dir = random_direction(rng);
        let mut position = dir * r;
        position.y *= self.y_scale;
        ShapeSample {
            position,
            primary_radius: r,
        }
    }

    pub fn vertical_limit(&self) -> f32 {
        self.radius * self.y_scale * VERTICAL_LIMIT
    }
}
