//! Structure generators.
//!
//! Each generator receives a star quota, appends that many stars to the shared
//! [`StarAccumulator`] (stopping early if the accumulator is full), and places every star
//! through the context's [`PlacementSampler`].

pub mod arm;
pub mod bar;
pub mod bulge;
pub mod disk;
pub mod globular;
pub mod halo;
pub mod main_galaxy;
pub mod outer_disk;

pub use arm::ArmShape;
pub use bar::BarShape;
pub use bulge::BulgeShape;
pub use disk::DiskShape;
pub use globular::GlobularClusterGenerator;
pub use halo::HaloGenerator;
pub use main_galaxy::MainGalaxyGenerator;
pub use outer_disk::OuterDiskGenerator;

use crate::accumulator::StarAccumulator;
use crate::color::ColorEndpoints;
use crate::config::{ConfigError, GalaxyConfig};
use crate::placement::PlacementSampler;
use crate::star::{COMMON_TEXTURE_PROBABILITY, NUM_COMMON_STAR_TEXTURES, NUM_RARE_STAR_TEXTURES};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Inputs shared by every generator during one galaxy generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub config: &'a GalaxyConfig,
    pub colors: ColorEndpoints,
    pub sampler: PlacementSampler,
}

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a GalaxyConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_colors(config, config.color_endpoints()?))
    }

    /// Context with already-parsed color endpoints.
    pub fn with_colors(config: &'a GalaxyConfig, colors: ColorEndpoints) -> Self {
        Self {
            config,
            colors,
            sampler: PlacementSampler::new(
                config.min_star_distance_squared(),
                config.max_placement_attempts,
            ),
        }
    }

    pub fn radius(&self) -> f32 {
        self.config.galaxy_radius
    }
}

/// Common contract of the structure generators.
pub trait StructureGenerator {
    /// Short name for logging.
    fn label(&self) -> &'static str;

    /// Append up to `quota` stars to `stars`.
    fn generate(
        &self,
        quota: usize,
        stars: &mut StarAccumulator,
        ctx: &GenerationContext<'_>,
        rng: &mut dyn RngCore,
    );
}

/// Texture class for a star: common sprites with 96% probability, rare ones otherwise.
/// Populations that never use rare sprites pass `allow_rare = false`.
pub fn pick_texture_index(rng: &mut dyn RngCore, allow_rare: bool) -> u32 {
    if !allow_rare || rng.gen_bool(COMMON_TEXTURE_PROBABILITY) {
        rng.gen_range(0..NUM_COMMON_STAR_TEXTURES)
    } else {
        NUM_COMMON_STAR_TEXTURES + rng.gen_range(0..NUM_RARE_STAR_TEXTURES)
    }
}

/// Uniform point on the unit sphere (uniform phi, uniform cos theta).
pub fn random_direction(rng: &mut dyn RngCore) -> Vec3 {
    let phi = rng.gen::<f32>() * TAU;
    let cos_theta = (rng.gen::<f32>() - 0.5) * 2.0;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin())
}

/// Uniform value in `[-1, 1)`.
pub(crate) fn signed_unit(rng: &mut dyn RngCore) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0
}

/// `num / den`, or 0 when the range is empty.
pub(crate) fn safe_ratio(num: f32, den: f32) -> f32 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Linear thickness taper: 1 at the inner edge, down to 15% at the rim.
pub(crate) fn edge_taper(normalized_radius: f32) -> f32 {
    (1.0 - normalized_radius.clamp(0.0, 1.0) * 0.85).max(0.15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::NUM_STAR_TEXTURES;

    #[test]
    fn texture_ratio_is_mostly_common() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let rare = (0..n)
            .map(|_| pick_texture_index(&mut rng, true))
            .inspect(|&t| assert!(t < NUM_STAR_TEXTURES))
            .filter(|&t| t >= NUM_COMMON_STAR_TEXTURES)
            .count();
        let share = rare as f32 / n as f32;
        assert!((0.025..0.055).contains(&share), "rare share {share}");
    }

    #[test]
    fn common_only_never_rare() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1000).all(|_| pick_texture_index(&mut rng, false) < NUM_COMMON_STAR_TEXTURES));
    }

    #[test]
    fn directions_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert!((random_direction(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn taper_bounds() {
        assert_eq!(edge_taper(0.0), 1.0);
        assert!((edge_taper(1.0) - 0.15).abs() < 1e-6);
        assert!((edge_taper(5.0) - 0.15).abs() < 1e-6);
    }
}
