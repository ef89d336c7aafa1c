//! Rejection sampling with a minimum inter-star distance.
//!
//! A candidate is accepted when no already-placed star lies closer than the minimum
//! distance. After `max_attempts` rejected candidates the last one is accepted anyway, so
//! generation always terminates; such placements are reported as `forced`.
//! Each check is a linear scan over every placed star, which makes this the dominant cost
//! of generation.

use glam::Vec3;

/// Outcome of one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<T> {
    pub position: Vec3,
    /// Whatever the proposal function attached to the accepted candidate.
    pub sample: T,
    /// Candidates generated, including the accepted one.
    pub attempts: u32,
    /// True when the candidate violates the minimum distance but was accepted because the
    /// attempt budget ran out.
    pub forced: bool,
}

/// Shared placement primitive used by every structure generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSampler {
    min_distance_sq: f32,
    max_attempts: u32,
}

impl PlacementSampler {
    pub fn new(min_distance_sq: f32, max_attempts: u32) -> Self {
        Self {
            min_distance_sq: min_distance_sq.max(0.0),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn min_distance_sq(&self) -> f32 {
        self.min_distance_sq
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// True if `candidate` keeps at least the minimum distance to every placed star.
    pub fn is_clear(&self, candidate: Vec3, placed: &[Vec3]) -> bool {
        placed
            .iter()
            .all(|p| p.distance_squared(candidate) >= self.min_distance_sq)
    }

    /// Draw candidates from `propose` until one is clear of `placed` or the attempt budget
    /// is spent, in which case the last candidate is force-accepted.
    pub fn place<T>(
        &self,
        placed: &[Vec3],
        mut propose: impl FnMut() -> (Vec3, T),
    ) -> Placement<T> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let (position, sample) = propose();
            let clear = self.is_clear(position, placed);
            if clear || attempts >= self.max_attempts {
                return Placement {
                    position,
                    sample,
                    attempts,
                    forced: !clear,
                };
            }
        }
    }
}
