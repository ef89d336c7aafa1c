//! Procedural galaxy generation: star field structures, planets and nebula layout.

pub mod accumulator;
pub mod batches;
pub mod color;
pub mod composer;
pub mod config;
pub mod names;
pub mod nebula;
pub mod placement;
pub mod planets;
pub mod star;
pub mod structures;

pub use accumulator::*;
pub use batches::*;
pub use color::*;
pub use composer::*;
pub use config::*;
pub use nebula::*;
pub use placement::*;
pub use planets::generate_planets;
pub use star::*;
pub use structures::{GenerationContext, StructureGenerator};
