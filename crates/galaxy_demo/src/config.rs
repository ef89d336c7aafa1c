//! Demo configuration. Loaded from config.ron at startup.

use procgen::{GalaxyConfig, NebulaConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use view::ViewConfig;

/// Scripted camera flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    #[serde(default = "default_frames")]
    pub frames: u64,
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    /// Camera distance at the start and end of the flight, as factors of the galaxy radius.
    #[serde(default = "default_far_factor")]
    pub far_factor: f32,
    /// Closest approach, at the middle of the flight.
    #[serde(default = "default_near_factor")]
    pub near_factor: f32,
    /// Camera height above the plane, as a factor of its distance.
    #[serde(default = "default_elevation")]
    pub elevation: f32,
    /// Orbit around the galactic axis, radians per frame.
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
    /// Frames in `[start, end)` take `slow_frame_time` to simulate a struggling renderer.
    #[serde(default = "default_slow_frames")]
    pub slow_frames: Option<(u64, u64)>,
    #[serde(default = "default_slow_frame_time")]
    pub slow_frame_time: f32,
    /// Pin the LOD level for the whole flight.
    #[serde(default)]
    pub manual_lod: Option<i32>,
    /// Switch to optimized mode while rotation performance is degraded.
    #[serde(default = "default_true")]
    pub auto_optimize: bool,
}

fn default_frames() -> u64 {
    900
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}
fn default_far_factor() -> f32 {
    2.0
}
fn default_near_factor() -> f32 {
    0.1
}
fn default_elevation() -> f32 {
    0.3
}
fn default_orbit_speed() -> f32 {
    0.004
}
fn default_slow_frames() -> Option<(u64, u64)> {
    Some((300, 420))
}
fn default_slow_frame_time() -> f32 {
    0.08
}
fn default_true() -> bool {
    true
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_time: default_frame_time(),
            far_factor: default_far_factor(),
            near_factor: default_near_factor(),
            elevation: default_elevation(),
            orbit_speed: default_orbit_speed(),
            slow_frames: default_slow_frames(),
            slow_frame_time: default_slow_frame_time(),
            manual_lod: None,
            auto_optimize: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub galaxy: GalaxyConfig,
    #[serde(default)]
    pub nebulae: NebulaConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub flight: FlightConfig,
}

impl DemoConfig {
    /// Load from `path`, or `config.ron` in the current directory. Falls back to defaults
    /// when the file is missing or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        match std::fs::read_to_string(&path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(_) => log::info!("No config at {:?}, using defaults", path),
        }
        Self::default()
    }

    /// Write the current config as pretty RON. Logs on error.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: DemoConfig = ron::from_str("()").unwrap();
        assert_eq!(config.galaxy.num_stars, GalaxyConfig::default().num_stars);
        assert_eq!(config.flight.frames, 900);
        assert_eq!(config.view.lod.throttle_frames, 10);
    }

    #[test]
    fn overrides_nest() {
        let config: DemoConfig = ron::from_str(
            "(galaxy: (num_stars: 500, seed: Some(7)), flight: (manual_lod: Some(2), slow_frames: None))",
        )
        .unwrap();
        assert_eq!(config.galaxy.num_stars, 500);
        assert_eq!(config.galaxy.seed, Some(7));
        assert_eq!(config.flight.manual_lod, Some(2));
        assert_eq!(config.flight.slow_frames, None);
    }

    #[test]
    fn missing_file_falls_back() {
        let config = DemoConfig::load(Some(Path::new("/nonexistent/galaxy/config.ron")));
        assert_eq!(config.flight, FlightConfig::default());
    }
}
