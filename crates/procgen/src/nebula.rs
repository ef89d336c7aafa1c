//! Nebula billboards scattered through the galactic plane.
//!
//! Only layout is produced here: position, scale, orientation, base opacity and spin.
//! Drawing the textured quads is up to the renderer.

use glam::{EulerRot, Quat, Vec3};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Number of distinct nebula textures; nebula `i` uses texture `i % NUM_NEBULA_TEXTURES`.
pub const NUM_NEBULA_TEXTURES: u32 = 9;

/// Opacity multiplier per LOD level (far to very near). Close up, nebulae fade so stars
/// stay readable.
pub const NEBULA_LOD_OPACITY: [f32; 4] = [1.0, 0.85, 0.65, 0.35];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    pub count: usize,
    /// Half-thickness of the band nebulae sit in, as a factor of the galaxy radius.
    pub plane_thickness_factor: f32,
    pub radial_power: f32,
    pub max_radial_factor: f32,
    pub y_deviation_chance: f32,
    pub y_deviation_min: f32,
    pub y_deviation_random: f32,
    pub base_scale_min_factor: f32,
    pub base_scale_random_factor: f32,
    pub aspect_base: f32,
    pub aspect_random: f32,
    /// Max tilt out of the plane around X and Z (radians).
    pub max_tilt: f32,
    pub opacity_base: f32,
    pub opacity_random: f32,
    /// Max absolute spin, radians per frame.
    pub max_spin_speed: f32,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            count: 144,
            plane_thickness_factor: 0.05,
            radial_power: 2.0,
            max_radial_factor: 0.9,
            y_deviation_chance: 0.1,
            y_deviation_min: 1.0,
            y_deviation_random: 1.0,
            base_scale_min_factor: 0.04,
            base_scale_random_factor: 0.08,
            aspect_base: 0.7,
            aspect_random: 0.6,
            max_tilt: PI * 0.1,
            opacity_base: 0.15,
            opacity_random: 0.20,
            max_spin_speed: 0.0015,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub key: String,
    pub texture_index: u32,
    pub position: Vec3,
    /// Quad scale; z is always 1.
    pub scale: Vec3,
    /// Euler angles (XYZ order).
    pub rotation: Vec3,
    pub opacity: f32,
    pub spin_speed: f32,
}

impl Nebula {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Opacity after the LOD fade. Out-of-range levels clamp to the nearest table entry.
    pub fn opacity_at_lod(&self, level: i32) -> f32 {
        let slot = level.clamp(0, NEBULA_LOD_OPACITY.len() as i32 - 1) as usize;
        self.opacity * NEBULA_LOD_OPACITY[slot]
    }

    /// Advance the in-plane spin by `frames` frames.
    pub fn spin(&mut self, frames: f32) {
        self.rotation.z = (self.rotation.z + self.spin_speed * frames).rem_euclid(TAU);
    }
}

pub fn generate_nebulae(
    config: &NebulaConfig,
    galaxy_radius: f32,
    rng: &mut dyn RngCore,
) -> Vec<Nebula> {
    let thickness = galaxy_radius * config.plane_thickness_factor;

    let nebulae: Vec<Nebula> = (0..config.count)
        .map(|i| {
            let r = galaxy_radius
                * rng.gen::<f32>().powf(config.radial_power)
                * config.max_radial_factor;
            let theta = rng.gen::<f32>() * TAU;
            let mut y = (rng.gen::<f32>() - 0.5) * 2.0 * thickness;
            if rng.gen::<f32>() < config.y_deviation_chance {
                y *= config.y_deviation_min + rng.gen::<f32>() * config.y_deviation_random;
            }

            let base_scale = galaxy_radius
                * (config.base_scale_min_factor
                    + rng.gen::<f32>() * config.base_scale_random_factor);
            let mut aspect = || config.aspect_base + rng.gen::<f32>() * config.aspect_random;
            let scale = Vec3::new(base_scale * aspect(), base_scale * aspect(), 1.0);

            let rotation = Vec3::new(
                (rng.gen::<f32>() * 2.0 - 1.0) * config.max_tilt,
                rng.gen::<f32>() * TAU,
                (rng.gen::<f32>() * 2.0 - 1.0) * config.max_tilt,
            );

            Nebula {
                key: format!("nebula-{}", i),
                texture_index: i as u32 % NUM_NEBULA_TEXTURES,
                position: Vec3::new(r * theta.cos(), y, r * theta.sin()),
                scale,
                rotation,
                opacity: config.opacity_base + rng.gen::<f32>() * config.opacity_random,
                spin_speed: (rng.gen::<f32>() - 0.5) * 2.0 * config.max_spin_speed,
            }
        })
        .collect();

    log::debug!("Generated {} nebulae", nebulae.len());
    nebulae
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_stays_in_band() {
        let config = NebulaConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let nebulae = generate_nebulae(&config, 1000.0, &mut rng);

        assert_eq!(nebulae.len(), 144);
        for (i, n) in nebulae.iter().enumerate() {
            assert_eq!(n.texture_index, i as u32 % 9);
            let planar = Vec3::new(n.position.x, 0.0, n.position.z).length();
            assert!(planar <= 900.0 + 1e-2);
            // Doubled deviation at most.
            assert!(n.position.y.abs() <= 100.0 + 1e-3);
            assert!((0.15..=0.35).contains(&n.opacity));
            assert!(n.spin_speed.abs() <= 0.0015);
            assert!(n.rotation.x.abs() <= PI * 0.1 + 1e-6);
            assert!(n.scale.x >= 1000.0 * 0.04 * 0.7 - 1e-3);
            assert!(n.scale.y <= 1000.0 * 0.12 * 1.3 + 1e-3);
            assert_eq!(n.scale.z, 1.0);
        }
    }

    #[test]
    fn lod_fade_clamps_level() {
        let n = Nebula {
            key: "nebula-0".into(),
            texture_index: 0,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            opacity: 0.2,
            spin_speed: 0.001,
        };
        assert!((n.opacity_at_lod(0) - 0.2).abs() < 1e-6);
        assert!((n.opacity_at_lod(3) - 0.07).abs() < 1e-6);
        assert_eq!(n.opacity_at_lod(9), n.opacity_at_lod(3));
        assert_eq!(n.opacity_at_lod(-2), n.opacity_at_lod(0));
        assert_eq!(n.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn spin_accumulates() {
        let mut n = Nebula {
            key: "nebula-1".into(),
            texture_index: 1,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            opacity: 0.3,
            spin_speed: 0.001,
        };
        n.spin(100.0);
        assert!((n.rotation.z - 0.1).abs() < 1e-5);
    }
}
