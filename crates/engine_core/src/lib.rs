//! Core types shared by the galaxy crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Camera pose (position and orientation)
//! - Frame timing for host loops

pub mod pose;
pub mod time;

pub use pose::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
