//! Outer disk: a very flat, sparse ring just beyond the galaxy radius.

use super::{pick_texture_index, safe_ratio, signed_unit, GenerationContext, StructureGenerator};
use crate::accumulator::StarAccumulator;
use crate::config::GalaxyConfig;
use crate::names::random_star_name;
use crate::star::{StarRecord, Structure};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterDiskGenerator {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub half_thickness: f32,
}

impl OuterDiskGenerator {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        let r = config.galaxy_radius;
        Self {
            inner_radius: r * config.outer_disk.min_radius_factor,
            outer_radius: r * config.outer_disk.max_radius_factor,
            half_thickness: r * config.outer_disk.y_scale,
        }
    }

    fn propose(&self, rng: &mut dyn RngCore) -> (Vec3, f32) {
        let radius = self.inner_radius + rng.gen::<f32>() * (self.outer_radius - self.inner_radius);
        let angle = rng.gen::<f32>() * TAU;
        let y = signed_unit(rng) * self.half_thickness;
        (Vec3::new(angle.cos() * radius, y, angle.sin() * radius), radius)
    }
}

impl StructureGenerator for OuterDiskGenerator {
    fn label(&self) -> &'static str {
        "outer disk"
    }

    fn generate(
        &self,
        quota: usize,
        stars: &mut StarAccumulator,
        ctx: &GenerationContext<'_>,
        rng: &mut dyn RngCore,
    ) {
        for _ in 0..quota {
            if stars.is_full() {
                break;
            }
            let placement = ctx.sampler.place(stars.positions(), || self.propose(rng));
            stars.record_placement(&placement);

            // Mostly the outside color, nudged 10-20% toward the inside color.
            let shell = safe_ratio(
                placement.sample - self.inner_radius,
                (self.outer_radius - self.inner_radius) * 0.8,
            )
            .min(1.0);
            let color = ctx.colors.outside_to_inside(0.1 + shell * 0.1);

            stars.append(StarRecord {
                index: stars.next_index(),
                id: stars.next_id(),
                name: random_star_name(rng),
                position: placement.position,
                color,
                size: rng.gen::<f32>() * 0.8 + 0.3,
                texture_index: pick_texture_index(rng, false),
                structure: Structure::OuterDisk,
                cluster: None,
                planets: Vec::new(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_disk_is_flat_ring_without_planets() {
        let config = GalaxyConfig::default();
        let ctx = GenerationContext::new(&config).unwrap();
        let g = OuterDiskGenerator::from_config(&config);
        let mut stars = StarAccumulator::new(200);
        let mut rng = StdRng::seed_from_u64(8);
        g.generate(200, &mut stars, &ctx, &mut rng);

        assert_eq!(stars.count(), 200);
        for s in stars.stars() {
            assert_eq!(s.structure, Structure::OuterDisk);
            assert!(s.planets.is_empty());
            assert!(!s.has_rare_texture());
            let r = s.planar_radius();
            assert!(r >= 1000.0 - 1e-2 && r <= 1100.0 + 1e-2, "radius {r}");
            assert!(s.position.y.abs() <= 25.0 + 1e-3);
        }
    }
}
