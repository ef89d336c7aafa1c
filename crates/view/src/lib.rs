//! Per-frame view state: level of detail and camera dynamics.

pub mod camera_dynamics;
pub mod config;
pub mod frame;
pub mod lod;

pub use camera_dynamics::*;
pub use config::*;
pub use frame::*;
pub use lod::*;
