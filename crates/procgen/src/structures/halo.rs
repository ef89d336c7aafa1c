//! Stellar halo: a flattened spherical shell concentrated toward its inner edge.

use super::{
    pick_texture_index, random_direction, safe_ratio, GenerationContext, StructureGenerator,
};
use crate::accumulator::StarAccumulator;
use crate::color::ColorEndpoints;
use crate::config::GalaxyConfig;
use crate::names::random_star_name;
use crate::star::{StarRecord, Structure};
use glam::Vec3;
use rand::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloGenerator {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub y_scale: f32,
    pub density_power: f32,
}

impl HaloGenerator {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        let r = config.galaxy_radius;
        Self {
            inner_radius: r * config.halo.min_radius_factor,
            outer_radius: r * config.halo.max_radius_factor,
            y_scale: config.halo.y_scale,
            density_power: config.halo.density_power,
        }
    }

    /// Flattened point at `radius` in a uniform direction.
    pub fn point_at(&self, radius: f32, rng: &mut dyn RngCore) -> Vec3 {
        let mut p = random_direction(rng) * radius;
        p.y *= self.y_scale;
        p
    }

    fn propose(&self, rng: &mut dyn RngCore) -> (Vec3, f32) {
        let radius = self.inner_radius
            + rng.gen::<f32>().powf(self.density_power) * (self.outer_radius - self.inner_radius);
        (self.point_at(radius, rng), radius)
    }

    /// Faint tint toward the inside color, growing slightly with radius.
    pub fn color_at(&self, radius: f32, colors: &ColorEndpoints) -> Vec3 {
        let shell = safe_ratio(
            radius - self.inner_radius,
            (self.outer_radius - self.inner_radius) * 0.5,
        )
        .min(1.0);
        colors.outside_to_inside(0.01 + shell * 0.05)
    }

    /// Build a halo star record at `position` for the next slot of `stars`.
    pub(crate) fn star_record(
        &self,
        stars: &StarAccumulator,
        position: Vec3,
        radius: f32,
        colors: &ColorEndpoints,
        rng: &mut dyn RngCore,
    ) -> StarRecord {
        StarRecord {
            index: stars.next_index(),
            id: stars.next_id(),
            name: random_star_name(rng),
            position,
            color: self.color_at(radius, colors),
            size: rng.gen::<f32>() * 0.6 + 0.2,
            texture_index: pick_texture_index(rng, false),
            structure: Structure::Halo,
            cluster: None,
            planets: Vec::new(),
        }
    }
}

impl StructureGenerator for HaloGenerator {
    fn label(&self) -> &'static str {
        "halo"
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
            let star = self.star_record(stars, placement.position, placement.sample, &ctx.colors, rng);
            stars.append(star);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halo_shell_and_flattening() {
        let config = GalaxyConfig::default();
        let ctx = GenerationContext::new(&config).unwrap();
        let g = HaloGenerator::from_config(&config);
        let mut stars = StarAccumulator::new(300);
        let mut rng = StdRng::seed_from_u64(12);
        g.generate(300, &mut stars, &ctx, &mut rng);

        let mut inner_half = 0;
        for s in stars.stars() {
            assert_eq!(s.structure, Structure::Halo);
            assert!(s.planets.is_empty());
            // Undo the flattening to recover the shell radius.
            let p = s.position;
            let shell = Vec3::new(p.x, p.y / g.y_scale, p.z).length();
            assert!(shell >= g.inner_radius - 0.5 && shell <= g.outer_radius + 0.5);
            assert!(p.y.abs() <= g.outer_radius * g.y_scale + 1e-2);
            if shell < (g.inner_radius + g.outer_radius) * 0.5 {
                inner_half += 1;
            }
        }
        // Density power 2 puts ~70% of stars in the inner half of the shell.
        assert!(inner_half > 180, "inner half holds {inner_half} of 300");
    }

    #[test]
    fn halo_color_mostly_outside() {
        let config = GalaxyConfig::default();
        let colors = config.color_endpoints().unwrap();
        let g = HaloGenerator::from_config(&config);
        let c = g.color_at(g.outer_radius, &colors);
        let expected = colors.outside.lerp(colors.inside, 0.06);
        assert!((c - expected).length() < 1e-5);
    }
}
