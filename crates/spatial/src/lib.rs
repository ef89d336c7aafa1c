//! Spatial indexing for star positions.

pub mod aabb;
pub mod octree;

pub use aabb::*;
pub use octree::*;
