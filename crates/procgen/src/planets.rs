//! Planet sub-generator for main-galaxy stars.
//!
//! Orbits are laid out by slot: planet `k` orbits at `(k + 1) * (base + U * random)` so
//! outer planets sit roughly evenly spaced. Inclination and tilt ranges follow the
//! star-system generator's mild values.

use crate::color::rgb_from_u24;
use crate::config::PlanetParams;
use crate::names::planet_name;
use crate::star::{PlanetKind, PlanetRecord};
use rand::prelude::*;

/// Generate the planetary system for the star with id `star_id`.
pub fn generate_planets(
    star_id: &str,
    params: &PlanetParams,
    rng: &mut dyn RngCore,
) -> Vec<PlanetRecord> {
    let count = rng.gen_range(params.min_per_star..=params.max_per_star) as usize;

    (0..count)
        .map(|slot| {
            let kind = PlanetKind::ALL[rng.gen_range(0..PlanetKind::ALL.len())];
            let size = params.min_size + rng.gen::<f32>() * (params.max_size - params.min_size);
            let orbit_radius = (slot as f32 + 1.0)
                * (params.orbit_radius_base + rng.gen::<f32>() * params.orbit_radius_random);
            let orbit_speed = params.min_orbit_speed
                + rng.gen::<f32>() * (params.max_orbit_speed - params.min_orbit_speed);

            PlanetRecord {
                id: format!("{}-p{}", star_id, slot),
                name: planet_name(slot),
                kind,
                size,
                orbit_radius,
                orbit_speed,
                orbit_inclination: Some(rng.gen::<f32>() * 0.4),
                axial_tilt: Some(rng.gen::<f32>() * 0.5),
                rotation_speed: Some(0.005 + rng.gen::<f32>() * 0.02),
                color: rgb_from_u24(rng.gen_range(0..=0xff_ffff)),
            }
        })
        .collect()
}
