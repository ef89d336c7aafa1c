//! Galaxy generation settings.
//!
//! All shape parameters are expressed relative to the galaxy radius where that makes sense,
//! so the same config scales from a 500-unit toy galaxy to a 10 000-unit one.
//! Every field has a serde default, so a `config.ron` only needs the values it overrides.

use crate::color::{parse_hex_color, ColorEndpoints};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`GalaxyConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("galaxy radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidFraction { name: &'static str, value: f32 },
    #[error("structure quotas add up to {requested} stars but only {total} are configured")]
    QuotaOverflow { requested: usize, total: usize },
    #[error("main-galaxy structure mix sums to {0}, expected at most 1")]
    MixOverflow(f32),
    #[error("{name} must be positive and finite, got {value}")]
    InvalidExponent { name: &'static str, value: f32 },
    #[error("{name} must lie in [0, 1), got {value}")]
    FactorOutOfRange { name: &'static str, value: f32 },
    #[error("at least one spiral arm is required")]
    NoSpiralArms,
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("max placement attempts must be at least 1")]
    NoPlacementAttempts,
    #[error("minimum star distance must be non-negative and finite, got {0}")]
    InvalidMinDistance(f32),
    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
}

/// Share of the total star count given to each population.
///
/// The main galaxy (bar, bulge, arms, disk) also absorbs whatever the floor division of the
/// other populations leaves over, so the quotas always sum to the configured star count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationFractions {
    pub main: f32,
    pub outer_disk: f32,
    pub halo: f32,
    pub globular_clusters: f32,
}

impl Default for PopulationFractions {
    fn default() -> Self {
        Self {
            main: 0.825,
            outer_disk: 0.025,
            halo: 0.10,
            globular_clusters: 0.05,
        }
    }
}

/// How main-galaxy placement attempts are split between the four inner structures.
/// Whatever is not claimed by bar, bulge and arms goes to the general disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureMix {
    pub bar: f32,
    pub bulge: f32,
    pub arm: f32,
}

impl Default for StructureMix {
    fn default() -> Self {
        Self {
            bar: 0.15,
            bulge: 0.20,
            arm: 0.50,
        }
    }
}

impl StructureMix {
    /// Fraction left over for general disk stars.
    pub fn disk(&self) -> f32 {
        (1.0 - self.bar - self.bulge - self.arm).max(0.0)
    }
}

/// Central bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarParams {
    /// Half-length of the bar as a fraction of the galaxy radius.
    pub length_factor: f32,
    /// Half-width of the bar as a fraction of the galaxy radius.
    pub width_factor: f32,
    /// Bar thickness relative to its width.
    pub y_scale: f32,
}

impl Default for BarParams {
    fn default() -> Self {
        Self {
            length_factor: 0.25,
            width_factor: 0.05,
            y_scale: 0.8,
        }
    }
}

/// Central bulge (oblate spheroid around the bar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulgeParams {
    pub size_factor: f32,
    /// Bulge height relative to its radius.
    pub y_scale: f32,
    /// Exponent on the uniform draw for the bulge radius; >1 concentrates toward the core.
    pub density_power: f32,
}

impl Default for BulgeParams {
    fn default() -> Self {
        Self {
            size_factor: 0.28,
            y_scale: 0.6,
            density_power: 1.5,
        }
    }
}

/// Spiral arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralArmParams {
    pub count: u32,
    pub tightness: f32,
    pub angle_factor: f32,
    /// Arm width near the bar as a fraction of the galaxy radius.
    pub width_factor: f32,
    /// Exponent for the radial draw between bar end and rim.
    pub radius_power: f32,
    /// Exponent for the in-plane scatter magnitude.
    pub point_density_power: f32,
    pub y_scale: f32,
    pub sub_arm_chance: f32,
    pub sub_arm_scatter_factor: f32,
    /// Full angular range (radians) of the extra sub-arm offset.
    pub sub_arm_angle_range: f32,
}

impl Default for SpiralArmParams {
    fn default() -> Self {
        Self {
            count: 4,
            tightness: 0.4,
            angle_factor: 12.0,
            width_factor: 0.12,
            radius_power: 1.8,
            point_density_power: 2.5,
            y_scale: 0.30,
            sub_arm_chance: 0.15,
            sub_arm_scatter_factor: 1.5,
            sub_arm_angle_range: std::f32::consts::PI / 6.0,
        }
    }
}

/// General (non-arm) disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskParams {
    /// Disk half-thickness at the bulge edge, as a fraction of the galaxy radius.
    pub y_scale: f32,
}

impl Default for DiskParams {
    fn default() -> Self {
        Self { y_scale: 0.18 }
    }
}

/// Thin, sparse disk just beyond the galaxy radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuterDiskParams {
    pub min_radius_factor: f32,
    pub max_radius_factor: f32,
    pub y_scale: f32,
}

impl Default for OuterDiskParams {
    fn default() -> Self {
        Self {
            min_radius_factor: 1.0,
            max_radius_factor: 1.1,
            y_scale: 0.025,
        }
    }
}

/// Stellar halo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloParams {
    pub min_radius_factor: f32,
    pub max_radius_factor: f32,
    pub y_scale: f32,
    pub density_power: f32,
}

impl Default for HaloParams {
    fn default() -> Self {
        Self {
            min_radius_factor: 0.8,
            max_radius_factor: 1.4,
            y_scale: 0.7,
            density_power: 2.0,
        }
    }
}

/// Globular clusters orbiting the galaxy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobularClusterParams {
    pub count: u32,
    /// Cluster-local radius bounds (absolute units).
    pub radius_min: f32,
    pub radius_max: f32,
    pub density_power: f32,
    /// Distance of cluster centers from the galactic center, as factors of the galaxy radius.
    pub position_min_factor: f32,
    pub position_max_factor: f32,
}

impl Default for GlobularClusterParams {
    fn default() -> Self {
        Self {
            count: 5,
            radius_min: 20.0,
            radius_max: 40.0,
            density_power: 2.5,
            position_min_factor: 0.5,
            position_max_factor: 1.2,
        }
    }
}

/// Planet sub-generator bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetParams {
    pub min_per_star: u32,
    pub max_per_star: u32,
    pub min_size: f32,
    pub max_size: f32,
    pub orbit_radius_base: f32,
    pub orbit_radius_random: f32,
    pub min_orbit_speed: f32,
    pub max_orbit_speed: f32,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            min_per_star: 3,
            max_per_star: 8,
            min_size: 0.5,
            max_size: 2.5,
            orbit_radius_base: 5.0,
            orbit_radius_random: 5.0,
            min_orbit_speed: 0.001,
            max_orbit_speed: 0.006,
        }
    }
}

/// Complete input for [`crate::GalaxyComposer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalaxyConfig {
    /// Exact number of stars the galaxy will contain.
    #[serde(default = "default_num_stars")]
    pub num_stars: usize,
    #[serde(default = "default_galaxy_radius")]
    pub galaxy_radius: f32,
    /// `None` draws a fresh seed from the OS on every generation.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub fractions: PopulationFractions,
    #[serde(default)]
    pub mix: StructureMix,
    #[serde(default)]
    pub bar: BarParams,
    #[serde(default)]
    pub bulge: BulgeParams,
    #[serde(default)]
    pub arms: SpiralArmParams,
    #[serde(default)]
    pub disk: DiskParams,
    #[serde(default)]
    pub outer_disk: OuterDiskParams,
    #[serde(default)]
    pub halo: HaloParams,
    #[serde(default)]
    pub clusters: GlobularClusterParams,
    #[serde(default)]
    pub planets: PlanetParams,
    /// Color of young stars near the core (`#rrggbb`).
    #[serde(default = "default_color_inside")]
    pub color_inside: String,
    /// Color of old stars toward the rim (`#rrggbb`).
    #[serde(default = "default_color_outside")]
    pub color_outside: String,
    #[serde(default = "default_min_star_distance")]
    pub min_star_distance: f32,
    #[serde(default = "default_max_placement_attempts")]
    pub max_placement_attempts: u32,
}

fn default_num_stars() -> usize {
    2000
}
fn default_galaxy_radius() -> f32 {
    1000.0
}
fn default_color_inside() -> String {
    "#ff9040".to_string()
}
fn default_color_outside() -> String {
    "#5070cc".to_string()
}
fn default_min_star_distance() -> f32 {
    4.0
}
fn default_max_placement_attempts() -> u32 {
    10
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            num_stars: default_num_stars(),
            galaxy_radius: default_galaxy_radius(),
            seed: None,
            fractions: PopulationFractions::default(),
            mix: StructureMix::default(),
            bar: BarParams::default(),
            bulge: BulgeParams::default(),
            arms: SpiralArmParams::default(),
            disk: DiskParams::default(),
            outer_disk: OuterDiskParams::default(),
            halo: HaloParams::default(),
            clusters: GlobularClusterParams::default(),
            planets: PlanetParams::default(),
            color_inside: default_color_inside(),
            color_outside: default_color_outside(),
            min_star_distance: default_min_star_distance(),
            max_placement_attempts: default_max_placement_attempts(),
        }
    }
}

impl GalaxyConfig {
    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style star count override.
    pub fn with_num_stars(mut self, num_stars: usize) -> Self {
        self.num_stars = num_stars;
        self
    }

    /// Squared minimum inter-star distance used by the placement sampler.
    pub fn min_star_distance_squared(&self) -> f32 {
        self.min_star_distance * self.min_star_distance
    }

    /// Parse both color endpoints.
    pub fn color_endpoints(&self) -> Result<ColorEndpoints, ConfigError> {
        Ok(ColorEndpoints {
            inside: parse_hex_color(&self.color_inside)?,
            outside: parse_hex_color(&self.color_outside)?,
        })
    }

    /// Check every invariant the generators rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.galaxy_radius.is_finite() && self.galaxy_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.galaxy_radius));
        }

        let f = &self.fractions;
        for (name, value) in [
            ("main fraction", f.main),
            ("outer disk fraction", f.outer_disk),
            ("halo fraction", f.halo),
            ("globular cluster fraction", f.globular_clusters),
            ("bar mix", self.mix.bar),
            ("bulge mix", self.mix.bulge),
            ("arm mix", self.mix.arm),
            ("sub-arm chance", self.arms.sub_arm_chance),
        ] {
            check_fraction(name, value)?;
        }

        let requested = fraction_quota(self.num_stars, f.main)
            + fraction_quota(self.num_stars, f.outer_disk)
            + fraction_quota(self.num_stars, f.halo)
            + fraction_quota(self.num_stars, f.globular_clusters);
        if requested > self.num_stars {
            return Err(ConfigError::QuotaOverflow {
                requested,
                total: self.num_stars,
            });
        }

        let mix_total = self.mix.bar + self.mix.bulge + self.mix.arm;
        if mix_total > 1.0 + 1e-4 {
            return Err(ConfigError::MixOverflow(mix_total));
        }

        for (name, value) in [
            ("bar length factor", self.bar.length_factor),
            ("bar width factor", self.bar.width_factor),
            ("bulge size factor", self.bulge.size_factor),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::FactorOutOfRange { name, value });
            }
        }

        for (name, value) in [
            ("bulge density power", self.bulge.density_power),
            ("arm radius power", self.arms.radius_power),
            ("arm point density power", self.arms.point_density_power),
            ("halo density power", self.halo.density_power),
            ("globular cluster density power", self.clusters.density_power),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidExponent { name, value });
            }
        }

        if self.arms.count == 0 {
            return Err(ConfigError::NoSpiralArms);
        }

        for (name, min, max) in [
            (
                "outer disk radius factor",
                self.outer_disk.min_radius_factor,
                self.outer_disk.max_radius_factor,
            ),
            (
                "halo radius factor",
                self.halo.min_radius_factor,
                self.halo.max_radius_factor,
            ),
            (
                "globular cluster radius",
                self.clusters.radius_min,
                self.clusters.radius_max,
            ),
            (
                "globular cluster position factor",
                self.clusters.position_min_factor,
                self.clusters.position_max_factor,
            ),
            (
                "planets per star",
                self.planets.min_per_star as f32,
                self.planets.max_per_star as f32,
            ),
            ("planet size", self.planets.min_size, self.planets.max_size),
            (
                "planet orbit speed",
                self.planets.min_orbit_speed,
                self.planets.max_orbit_speed,
            ),
        ] {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(ConfigError::InvalidRange { name, min, max });
            }
        }

        if self.max_placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }
        if !(self.min_star_distance.is_finite() && self.min_star_distance >= 0.0) {
            return Err(ConfigError::InvalidMinDistance(self.min_star_distance));
        }

        self.color_endpoints()?;
        Ok(())
    }
}

/// Floor of `total * fraction`, the quota rule shared by validation and the composer.
///
/// A product within f32 rounding error of a whole number snaps to it first, so `0.9`
/// (stored as 0.89999998) still yields 90 of 100 stars.
pub(crate) fn fraction_quota(total: usize, fraction: f32) -> usize {
    let exact = (total as f64) * (fraction as f64);
    let nearest = exact.round();
    if (nearest - exact).abs() <= exact * f64::from(f32::EPSILON) {
        nearest as usize
    } else {
        exact.floor() as usize
    }
}

fn check_fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GalaxyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_fraction_rejected() {
        let mut cfg = GalaxyConfig::default();
        cfg.fractions.halo = -0.1;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidFraction { name: "halo fraction", .. })
        ));
    }

    #[test]
    fn quota_overflow_rejected() {
        let mut cfg = GalaxyConfig::default().with_num_stars(100);
        cfg.fractions.main = 0.9;
        cfg.fractions.halo = 0.5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::QuotaOverflow {
                requested: 90 + 2 + 50 + 5,
                total: 100
            })
        );
    }

    #[test]
    fn bad_color_rejected() {
        let cfg = GalaxyConfig {
            color_outside: "#zz0000".to_string(),
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidColor("#zz0000".to_string()))
        );
    }

    #[test]
    fn zero_attempts_rejected() {
        let cfg = GalaxyConfig {
            max_placement_attempts: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoPlacementAttempts));
    }

    #[test]
    fn inverted_halo_range_rejected() {
        let mut cfg = GalaxyConfig::default();
        cfg.halo.min_radius_factor = 2.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRange { name: "halo radius factor", .. })
        ));
    }

    #[test]
    fn partial_ron_uses_defaults() {
        let cfg: GalaxyConfig =
            ron::from_str("(num_stars: 500, seed: Some(7), halo: (y_scale: 0.5))").unwrap();
        assert_eq!(cfg.num_stars, 500);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.halo.y_scale, 0.5);
        assert_eq!(cfg.halo.density_power, 2.0);
        assert_eq!(cfg.galaxy_radius, 1000.0);
        assert_eq!(cfg.arms.count, 4);
    }

    #[test]
    fn quota_floors_without_rounding_up() {
        assert_eq!(fraction_quota(100, 0.9), 90);
        assert_eq!(fraction_quota(2000, 0.825), 1650);
        assert_eq!(fraction_quota(1000, 0.0009995), 0);
        assert_eq!(fraction_quota(1000, 0.0019), 1);
        assert_eq!(fraction_quota(7, 0.5), 3);
        assert_eq!(fraction_quota(0, 0.5), 0);
    }

    #[test]
    fn non_positive_density_power_rejected() {
        let mut cfg = GalaxyConfig::default();
        cfg.halo.density_power = -1.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidExponent {
                name: "halo density power",
                value: -1.0
            })
        );

        let mut cfg = GalaxyConfig::default();
        cfg.arms.point_density_power = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidExponent { name: "arm point density power", .. })
        ));

        let mut cfg = GalaxyConfig::default();
        cfg.clusters.density_power = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidExponent { name: "globular cluster density power", .. })
        ));
    }

    #[test]
    fn mix_leaves_remainder_to_disk() {
        let mix = StructureMix::default();
        assert!((mix.disk() - 0.15).abs() < 1e-6);
    }
}
