//! Globular clusters: dense, old, yellowish star balls orbiting the galaxy.
//!
//! The quota is split evenly between clusters with integer division; any stars lost to
//! truncation are made up by the composer's backfill.

use super::{pick_texture_index, random_direction, GenerationContext, StructureGenerator};
use crate::accumulator::StarAccumulator;
use crate::color::hsl_to_rgb;
use crate::config::{GalaxyConfig, GlobularClusterParams};
use crate::names::random_star_name;
use crate::star::{StarRecord, Structure};
use glam::Vec3;
use rand::prelude::*;

/// Hue band of cluster stars (HSL hue, 0..1).
pub const CLUSTER_HUE_MIN: f32 = 0.08;
pub const CLUSTER_HUE_SPAN: f32 = 0.05;
const CLUSTER_SATURATION: f32 = 0.7;
const CLUSTER_LIGHTNESS: f32 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobularClusterGenerator {
    pub params: GlobularClusterParams,
    pub galaxy_radius: f32,
}

impl GlobularClusterGenerator {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            params: config.clusters,
            galaxy_radius: config.galaxy_radius,
        }
    }

    /// Stars each cluster receives out of `quota`.
    pub fn stars_per_cluster(&self, quota: usize) -> usize {
        match self.params.count {
            0 => 0,
            n => quota / n as usize,
        }
    }

    /// Cluster center on a shell between the configured min/max factors of the radius.
    pub fn cluster_center(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = &self.params;
        let orbit = self.galaxy_radius
            * (p.position_min_factor + rng.gen::<f32>() * (p.position_max_factor - p.position_min_factor));
        random_direction(rng) * orbit
    }

    fn propose_member(&self, center: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let p = &self.params;
        let extent = rng.gen::<f32>() * (p.radius_max - p.radius_min) + p.radius_min;
        let local = rng.gen::<f32>().powf(p.density_power) * extent;
        center + random_direction(rng) * local
    }

    fn cluster_color(rng: &mut dyn RngCore) -> Vec3 {
        hsl_to_rgb(
            CLUSTER_HUE_MIN + rng.gen::<f32>() * CLUSTER_HUE_SPAN,
            CLUSTER_SATURATION,
            CLUSTER_LIGHTNESS,
        )
    }
}

impl StructureGenerator for GlobularClusterGenerator {
    fn label(&self) -> &'static str {
        "globular clusters"
    }

    fn generate(
        &self,
        quota: usize,
        stars: &mut StarAccumulator,
        ctx: &GenerationContext<'_>,
        rng: &mut dyn RngCore,
    ) {
        let per_cluster = self.stars_per_cluster(quota);
        if per_cluster == 0 {
            return;
        }

        for cluster in 0..self.params.count {
            if stars.is_full() {
                break;
            }
            let center = self.cluster_center(rng);
            log::debug!("globular cluster {} at {:?}", cluster, center);

            for _ in 0..per_cluster {
                if stars.is_full() {
                    break;
                }
                let placement = ctx
                    .sampler
                    .place(stars.positions(), || (self.propose_member(center, rng), ()));
                stars.record_placement(&placement);

                stars.append(StarRecord {
                    index: stars.next_index(),
                    id: stars.next_id(),
                    name: random_star_name(rng),
                    position: placement.position,
                    color: Self::cluster_color(rng),
                    size: rng.gen::<f32>() * 0.5 + 0.2,
                    texture_index: pick_texture_index(rng, false),
                    structure: Structure::GlobularCluster,
                    cluster: Some(cluster),
                    planets: Vec::new(),
                });
            }
        }
    }
}
