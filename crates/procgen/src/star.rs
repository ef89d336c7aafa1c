//! Generated star and planet records.

use glam::Vec3;

/// Number of interchangeable "common" star sprites.
pub const NUM_COMMON_STAR_TEXTURES: u32 = 7;
/// Number of "rare" star sprites; their indices follow the common range.
pub const NUM_RARE_STAR_TEXTURES: u32 = 5;
/// Total number of texture classes a star can reference.
pub const NUM_STAR_TEXTURES: u32 = NUM_COMMON_STAR_TEXTURES + NUM_RARE_STAR_TEXTURES;
/// Probability that a main-galaxy star uses a common sprite.
pub const COMMON_TEXTURE_PROBABILITY: f64 = 0.96;

/// Which galactic structure produced a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    Bar,
    Bulge,
    SpiralArm,
    Disk,
    OuterDisk,
    Halo,
    GlobularCluster,
}

impl Structure {
    pub const COUNT: usize = 7;
    pub const ALL: [Structure; Self::COUNT] = [
        Structure::Bar,
        Structure::Bulge,
        Structure::SpiralArm,
        Structure::Disk,
        Structure::OuterDisk,
        Structure::Halo,
        Structure::GlobularCluster,
    ];

    /// Bar, bulge, arm and disk stars: the part of the galaxy kept inside the galaxy radius.
    pub fn is_main_galaxy(self) -> bool {
        matches!(
            self,
            Structure::Bar | Structure::Bulge | Structure::SpiralArm | Structure::Disk
        )
    }

    /// Only main-galaxy stars carry planetary systems.
    pub fn has_planets(self) -> bool {
        self.is_main_galaxy()
    }

    pub fn label(self) -> &'static str {
        match self {
            Structure::Bar => "bar",
            Structure::Bulge => "bulge",
            Structure::SpiralArm => "arm",
            Structure::Disk => "disk",
            Structure::OuterDisk => "outer disk",
            Structure::Halo => "halo",
            Structure::GlobularCluster => "globular cluster",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

/// Planet categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetKind {
    Terrestrial,
    GasGiant,
    Ice,
    Desert,
    Volcanic,
    Oceanic,
    Barren,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 7] = [
        PlanetKind::Terrestrial,
        PlanetKind::GasGiant,
        PlanetKind::Ice,
        PlanetKind::Desert,
        PlanetKind::Volcanic,
        PlanetKind::Oceanic,
        PlanetKind::Barren,
    ];
}

/// A planet owned by exactly one star.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    /// `"<star id>-p<k>"`.
    pub id: String,
    pub name: String,
    pub kind: PlanetKind,
    pub size: f32,
    pub orbit_radius: f32,
    /// Radians per frame.
    pub orbit_speed: f32,
    pub orbit_inclination: Option<f32>,
    pub axial_tilt: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub color: Vec3,
}

/// One generated star. Immutable once the galaxy is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    /// `"star-<index>"`, contiguous in generation order.
    pub id: String,
    /// Position in the galaxy's star list.
    pub index: usize,
    pub name: String,
    pub position: Vec3,
    pub color: Vec3,
    pub size: f32,
    /// Sprite class: `0..NUM_COMMON_STAR_TEXTURES` common, the rest rare.
    pub texture_index: u32,
    pub structure: Structure,
    /// Cluster number for globular cluster members.
    pub cluster: Option<u32>,
    pub planets: Vec<PlanetRecord>,
}

impl StarRecord {
    /// Distance from the galactic rotation axis (the XZ-plane radius).
    pub fn planar_radius(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    pub fn has_rare_texture(&self) -> bool {
        self.texture_index >= NUM_COMMON_STAR_TEXTURES
    }
}

/// Format the id of the star at `index`.
pub fn star_id(index: usize) -> String {
    format!("star-{}", index)
}
