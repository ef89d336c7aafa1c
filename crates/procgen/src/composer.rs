//! Galaxy composition: quota split, generator order and filler backfill.

use crate::accumulator::{GenerationStats, StarAccumulator};
use crate::color::ColorEndpoints;
use crate::config::{fraction_quota, ConfigError, GalaxyConfig};
use crate::star::{StarRecord, Structure};
use crate::structures::{
    GenerationContext, GlobularClusterGenerator, HaloGenerator, MainGalaxyGenerator,
    OuterDiskGenerator, StructureGenerator,
};
use glam::Vec3;
use rand::prelude::*;

/// Star counts handed to each population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotas {
    /// Bar, bulge, arms and disk. Absorbs the rounding remainder.
    pub main: usize,
    pub outer_disk: usize,
    pub halo: usize,
    pub globular_clusters: usize,
}

impl Quotas {
    /// Floor every fraction of `total`, then give whatever is left to the main galaxy so
    /// the quotas always sum to `total`.
    pub fn split(config: &GalaxyConfig) -> Self {
        let total = config.num_stars;
        let f = &config.fractions;
        let outer_disk = fraction_quota(total, f.outer_disk);
        let halo = fraction_quota(total, f.halo);
        let globular_clusters = fraction_quota(total, f.globular_clusters);
        let main_floor = fraction_quota(total, f.main);
        let assigned = main_floor + outer_disk + halo + globular_clusters;
        Self {
            main: main_floor + total.saturating_sub(assigned),
            outer_disk,
            halo,
            globular_clusters,
        }
    }

    pub fn total(&self) -> usize {
        self.main + self.outer_disk + self.halo + self.globular_clusters
    }
}

/// A generated galaxy: star records plus the parallel arrays the renderer consumes.
#[derive(Debug, Clone)]
pub struct Galaxy {
    pub stars: Vec<StarRecord>,
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub stats: GenerationStats,
    pub radius: f32,
}

impl Galaxy {
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn star(&self, index: usize) -> Option<&StarRecord> {
        self.stars.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&StarRecord> {
        let index = id.strip_prefix("star-")?.parse::<usize>().ok()?;
        self.stars.get(index).filter(|s| s.id == id)
    }

    pub fn planet_count(&self) -> usize {
        self.stars.iter().map(|s| s.planets.len()).sum()
    }
}

/// Runs the generators in order against one shared accumulator.
pub struct GalaxyComposer {
    config: GalaxyConfig,
    colors: ColorEndpoints,
}

impl GalaxyComposer {
    /// Validates `config` up front so generation itself cannot fail.
    pub fn new(config: GalaxyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let colors = config.color_endpoints()?;
        Ok(Self { config, colors })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn quotas(&self) -> Quotas {
        Quotas::split(&self.config)
    }

    /// Generate with a random source derived from `config.seed` (or OS entropy).
    pub fn generate(&self) -> Galaxy {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    pub fn generate_with(&self, rng: &mut dyn RngCore) -> Galaxy {
        let config = &self.config;
        let ctx = GenerationContext::with_colors(config, self.colors);
        let quotas = self.quotas();
        log::debug!("star quotas: {:?}", quotas);

        let mut stars = StarAccumulator::new(config.num_stars);
        let main = MainGalaxyGenerator::from_config(config);
        let outer_disk = OuterDiskGenerator::from_config(config);
        let halo = HaloGenerator::from_config(config);
        let clusters = GlobularClusterGenerator::from_config(config);
        let stages: [(&dyn StructureGenerator, usize); 4] = [
            (&main, quotas.main),
            (&outer_disk, quotas.outer_disk),
            (&halo, quotas.halo),
            (&clusters, quotas.globular_clusters),
        ];

        for (generator, quota) in stages {
            let before = stars.count();
            generator.generate(quota, &mut stars, &ctx, rng);
            log::debug!(
                "{}: {} stars (quota {})",
                generator.label(),
                stars.count() - before,
                quota
            );
        }

        backfill(&mut stars, &halo, &ctx, rng);

        let (stars, positions, stats) = stars.into_parts();
        if stats.forced_placements > 0 {
            log::debug!(
                "{} stars accepted below the minimum distance",
                stats.forced_placements
            );
        }
        log::info!(
            "Generated galaxy: {} stars, {} planets, {} filler, {} placement attempts",
            stars.len(),
            stars.iter().map(|s| s.planets.len()).sum::<usize>(),
            stats.filler_stars,
            stats.total_attempts
        );

        Galaxy {
            colors: stars.iter().map(|s| s.color).collect(),
            sizes: stars.iter().map(|s| s.size).collect(),
            stars,
            positions,
            stats,
            radius: config.galaxy_radius,
        }
    }
}

/// Top up the accumulator with halo-like stars in the outer half of the halo shell.
/// Fillers skip the distance check.
fn backfill(
    stars: &mut StarAccumulator,
    halo: &HaloGenerator,
    ctx: &GenerationContext<'_>,
    rng: &mut dyn RngCore,
) {
    if stars.is_full() {
        return;
    }
    log::debug!("backfilling {} stars", stars.remaining());
    let mid = (halo.inner_radius + halo.outer_radius) * 0.5;
    while !stars.is_full() {
        let radius = mid + rng.gen::<f32>() * (halo.outer_radius - mid);
        let position = halo.point_at(radius, rng);
        let star = halo.star_record(stars, position, radius, &ctx.colors, rng);
        stars.append_filler(star);
    }
}

/// Validate `config` and generate a galaxy from it.
pub fn generate_galaxy(config: &GalaxyConfig) -> Result<Galaxy, ConfigError> {
    Ok(GalaxyComposer::new(config.clone())?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb_to_hsl;
    use crate::config::PopulationFractions;
    use crate::star::star_id;

    fn only(main: f32, outer_disk: f32, halo: f32, globular_clusters: f32) -> PopulationFractions {
        PopulationFractions {
            main,
            outer_disk,
            halo,
            globular_clusters,
        }
    }

    #[test]
    fn quotas_sum_to_total() {
        for n in [0, 1, 7, 10, 99, 100, 1234, 2000] {
            let config = GalaxyConfig::default().with_num_stars(n);
            let q = Quotas::split(&config);
            assert_eq!(q.total(), n, "n = {n}");
        }
        let q = Quotas::split(&GalaxyConfig::default());
        assert_eq!(q.outer_disk, 50);
        assert_eq!(q.halo, 200);
        assert_eq!(q.globular_clusters, 100);
        assert_eq!(q.main, 1650);
    }

    #[test]
    fn minimal_galaxy_is_all_main() {
        let mut config = GalaxyConfig::default().with_num_stars(10).with_seed(1);
        config.fractions = only(1.0, 0.0, 0.0, 0.0);
        let galaxy = generate_galaxy(&config).unwrap();

        assert_eq!(galaxy.len(), 10);
        for (i, star) in galaxy.stars.iter().enumerate() {
            assert_eq!(star.id, format!("star-{i}"));
            assert!(star.structure.is_main_galaxy());
        }
        assert_eq!(galaxy.stats.filler_stars, 0);
    }

    #[test]
    fn cluster_only_galaxy() {
        let mut config = GalaxyConfig::default().with_num_stars(20).with_seed(2);
        config.fractions = only(0.0, 0.0, 0.0, 1.0);
        config.clusters.count = 2;
        let galaxy = generate_galaxy(&config).unwrap();

        assert_eq!(galaxy.len(), 20);
        for cluster in 0..2 {
            let n = galaxy
                .stars
                .iter()
                .filter(|s| s.cluster == Some(cluster))
                .count();
            assert_eq!(n, 10);
        }
        for star in &galaxy.stars {
            assert_eq!(star.structure, Structure::GlobularCluster);
            assert!(star.planets.is_empty());
            let (h, _, _) = rgb_to_hsl(star.color);
            assert!((0.08 - 1e-4..=0.13 + 1e-4).contains(&h), "hue {h}");
        }
    }

    #[test]
    fn truncated_cluster_split_is_backfilled() {
        let mut config = GalaxyConfig::default().with_num_stars(23).with_seed(3);
        config.fractions = only(0.0, 0.0, 0.0, 1.0);
        config.clusters.count = 2;
        let galaxy = generate_galaxy(&config).unwrap();

        assert_eq!(galaxy.len(), 23);
        assert_eq!(galaxy.stats.filler_stars, 1);
        let filler = &galaxy.stars[22];
        assert_eq!(filler.structure, Structure::Halo);
        assert!(filler.planets.is_empty());
        assert_eq!(filler.id, "star-22");
    }

    #[test]
    fn count_and_ids_hold_across_seeds() {
        for seed in 0..4 {
            let config = GalaxyConfig::default().with_num_stars(500).with_seed(seed);
            let galaxy = generate_galaxy(&config).unwrap();
            assert_eq!(galaxy.len(), 500);
            assert_eq!(galaxy.positions.len(), 500);
            assert_eq!(galaxy.colors.len(), 500);
            assert_eq!(galaxy.sizes.len(), 500);
            for (i, star) in galaxy.stars.iter().enumerate() {
                assert_eq!(star.id, star_id(i));
                assert_eq!(star.index, i);
                assert_eq!(galaxy.positions[i], star.position);
            }
        }
    }

    #[test]
    fn most_pairs_respect_min_distance() {
        let config = GalaxyConfig::default().with_num_stars(800).with_seed(9);
        let galaxy = generate_galaxy(&config).unwrap();
        let min_sq = config.min_star_distance_squared();

        let mut close = 0usize;
        let mut pairs = 0usize;
        for (i, a) in galaxy.positions.iter().enumerate() {
            for b in &galaxy.positions[i + 1..] {
                pairs += 1;
                if a.distance_squared(*b) < min_sq {
                    close += 1;
                }
            }
        }
        // Each close pair involves a forced or filler star.
        let unchecked = galaxy.stats.forced_placements + galaxy.stats.filler_stars;
        assert!(close <= unchecked * galaxy.len());
        assert!((close as f64) / (pairs as f64) < 1e-3);
    }

    #[test]
    fn main_stars_inside_radius() {
        let config = GalaxyConfig::default().with_num_stars(1000).with_seed(5);
        let galaxy = generate_galaxy(&config).unwrap();
        for star in galaxy.stars.iter().filter(|s| s.structure.is_main_galaxy()) {
            assert!(star.planar_radius() <= config.galaxy_radius * (1.0 + 1e-5));
        }
    }

    #[test]
    fn gradient_colors_stay_between_endpoints() {
        let config = GalaxyConfig::default().with_num_stars(600).with_seed(6);
        let galaxy = generate_galaxy(&config).unwrap();
        let ends = config.color_endpoints().unwrap();
        let lo = ends.inside.min(ends.outside) - Vec3::splat(1e-5);
        let hi = ends.inside.max(ends.outside) + Vec3::splat(1e-5);
        for star in galaxy
            .stars
            .iter()
            .filter(|s| s.structure != Structure::GlobularCluster)
        {
            assert!(star.color.cmpge(lo).all() && star.color.cmple(hi).all());
        }
    }

    #[test]
    fn same_seed_same_galaxy() {
        let config = GalaxyConfig::default().with_num_stars(300).with_seed(77);
        let a = generate_galaxy(&config).unwrap();
        let b = generate_galaxy(&config).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.stars[17].name, b.stars[17].name);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = GalaxyConfig::default();
        config.galaxy_radius = -1.0;
        assert!(GalaxyComposer::new(config).is_err());
    }

    #[test]
    fn find_by_id() {
        let config = GalaxyConfig::default().with_num_stars(50).with_seed(4);
        let galaxy = generate_galaxy(&config).unwrap();
        assert_eq!(galaxy.find("star-12").map(|s| s.index), Some(12));
        assert!(galaxy.find("star-50").is_none());
        assert!(galaxy.find("planet-1").is_none());
    }
}
