//! Bar, bulge, spiral arms and general disk, generated from one combined quota.
//!
//! Every placement attempt rolls which structure it samples from (per [`StructureMix`]),
//! so the proportions hold regardless of how many candidates get rejected. After
//! sampling, a small global jitter is added and the star is clamped back into the disk:
//! radially onto the galaxy radius, vertically to a per-structure limit. The vertical
//! clamp re-draws the height at 70-100% of the limit instead of pinning it, which would
//! leave a visible flat ceiling.

use super::{
    pick_texture_index, signed_unit, ArmShape, BarShape, BulgeShape, DiskShape,
    GenerationContext, StructureGenerator,
};
use crate::accumulator::StarAccumulator;
use crate::config::{GalaxyConfig, StructureMix};
use crate::names::random_star_name;
use crate::planets::generate_planets;
use crate::star::{StarRecord, Structure};
use glam::Vec3;
use rand::prelude::*;

/// Horizontal jitter as a fraction of the galaxy radius (vertical uses half).
const JITTER_FACTOR: f32 = 0.02;
/// Bar stars inside this share of the bulge radius are colored like bulge stars.
const BAR_CORE_SHARE: f32 = 0.7;
/// Core (bar/bulge) stars only reach this far along the color gradient.
const CORE_COLOR_RANGE: f32 = 0.4;
/// Disk and arm colors saturate at this share of the galaxy radius.
const DISK_COLOR_REFERENCE: f32 = 0.75;

/// A candidate position straight from one of the shapes, before jitter and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSample {
    pub position: Vec3,
    /// Structure-specific radius used for color, size and the vertical clamp.
    pub primary_radius: f32,
}

/// Generates the four inner structures.
#[derive(Debug, Clone)]
pub struct MainGalaxyGenerator {
    pub mix: StructureMix,
    pub bar: BarShape,
    pub bulge: BulgeShape,
    pub arm: ArmShape,
    pub disk: DiskShape,
    galaxy_radius: f32,
}

impl MainGalaxyGenerator {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            mix: config.mix,
            bar: BarShape::from_config(config),
            bulge: BulgeShape::from_config(config),
            arm: ArmShape::from_config(config),
            disk: DiskShape::from_config(config),
            galaxy_radius: config.galaxy_radius,
        }
    }

    /// Map a uniform roll to a structure according to the mix.
    pub fn roll_structure(&self, roll: f32) -> Structure {
        let bar = self.mix.bar;
        let bulge = bar + self.mix.bulge;
        let arm = bulge + self.mix.arm;
        if roll < bar {
            Structure::Bar
        } else if roll < bulge {
            Structure::Bulge
        } else if roll < arm {
            Structure::SpiralArm
        } else {
            Structure::Disk
        }
    }

    fn sample(&self, structure: Structure, arm_index: u32, rng: &mut dyn RngCore) -> ShapeSample {
        match structure {
            Structure::Bar => self.bar.propose(rng),
            Structure::Bulge => self.bulge.propose(rng),
            Structure::SpiralArm => self.arm.propose(arm_index, rng),
            _ => self.disk.propose(rng),
        }
    }

    /// Largest |y| allowed for `structure` at `primary_radius`.
    pub fn vertical_limit(&self, structure: Structure, primary_radius: f32) -> f32 {
        match structure {
            Structure::Bar => self.bar.vertical_limit(),
            Structure::Bulge => self.bulge.vertical_limit(),
            Structure::SpiralArm => self.arm.vertical_limit(primary_radius),
            _ => self.disk.vertical_limit(primary_radius),
        }
    }

    /// Jitter, then clamp radially onto the disk and vertically to the structure's limit.
    fn settle(
        &self,
        structure: Structure,
        sample: ShapeSample,
        rng: &mut dyn RngCore,
    ) -> Vec3 {
        let jitter = self.galaxy_radius * JITTER_FACTOR;
        let mut p = sample.position
            + Vec3::new(
                signed_unit(rng) * jitter,
                signed_unit(rng) * jitter * 0.5,
                signed_unit(rng) * jitter,
            );

        let planar_sq = p.x * p.x + p.z * p.z;
        if planar_sq > self.galaxy_radius * self.galaxy_radius {
            let scale = self.galaxy_radius / planar_sq.sqrt();
            p.x *= scale;
            p.z *= scale;
        }

        let limit = self.vertical_limit(structure, sample.primary_radius);
        if p.y.abs() > limit {
            p.y = p.y.signum() * limit * (0.7 + rng.gen::<f32>() * 0.3);
        }
        p
    }

    /// Gradient position (0 = inside color, 1 = outside color).
    pub fn color_factor(&self, structure: Structure, primary_radius: f32) -> f32 {
        let core = structure == Structure::Bulge
            || (structure == Structure::Bar && primary_radius < self.bulge.radius * BAR_CORE_SHARE);
        if core {
            (primary_radius / (self.bulge.radius * 0.8)).min(1.0) * CORE_COLOR_RANGE
        } else {
            (primary_radius / (self.galaxy_radius * DISK_COLOR_REFERENCE)).min(1.0)
        }
    }

    fn star_size(&self, structure: Structure, primary_radius: f32, rng: &mut dyn RngCore) -> f32 {
        let mut size = rng.gen::<f32>() * 1.5 + 0.5;
        match structure {
            Structure::Bar | Structure::Bulge => size *= 1.2,
            Structure::SpiralArm => size *= self.arm.size_scale(primary_radius),
            _ => {}
        }
        size.clamp(0.4, 2.5)
    }
}

impl StructureGenerator for MainGalaxyGenerator {
    fn label(&self) -> &'static str {
        "main galaxy"
    }

    fn generate(
        &self,
        quota: usize,
        stars: &mut StarAccumulator,
        ctx: &GenerationContext<'_>,
        rng: &mut dyn RngCore,
    ) {
        let arm_count = ctx.config.arms.count.max(1);

        for i in 0..quota {
            if stars.is_full() {
                break;
            }
            let arm_index = (i % arm_count as usize) as u32;

            let placement = ctx.sampler.place(stars.positions(), || {
                let structure = self.roll_structure(rng.gen());
                let sample = self.sample(structure, arm_index, rng);
                let position = self.settle(structure, sample, rng);
                (position, (structure, sample.primary_radius))
            });
            stars.record_placement(&placement);
            let (structure, primary_radius) = placement.sample;

            let color = ctx
                .colors
                .inside_to_outside(self.color_factor(structure, primary_radius));
            let texture_index = pick_texture_index(rng, true);
            let size = self.star_size(structure, primary_radius, rng);
            let id = stars.next_id();
            let planets = generate_planets(&id, &ctx.config.planets, rng);

            stars.append(StarRecord {
                index: stars.next_index(),
                id,
                name: random_star_name(rng),
                position: placement.position,
                color,
                size,
                texture_index,
                structure,
                cluster: None,
                planets,
            });
        }
    }
}
