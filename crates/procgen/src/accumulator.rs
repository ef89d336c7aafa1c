//! The growing star list shared by all structure generators during one generation.

use crate::placement::Placement;
use crate::star::{star_id, StarRecord, Structure};
use glam::Vec3;

/// Counters collected while a galaxy is generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationStats {
    /// Candidates drawn by the placement sampler across all stars.
    pub total_attempts: u64,
    /// Stars accepted despite violating the minimum distance.
    pub forced_placements: usize,
    /// Stars added by the composer's backfill.
    pub filler_stars: usize,
    per_structure: [usize; Structure::COUNT],
}

impl GenerationStats {
    /// Number of stars produced for `structure`.
    pub fn count(&self, structure: Structure) -> usize {
        self.per_structure[structure.slot()]
    }
}

/// Owns the star list while generators append to it.
///
/// Ids are handed out in insertion order (`star-0`, `star-1`, ...), and positions are kept
/// in a parallel array so the placement sampler can scan them without touching records.
#[derive(Debug)]
pub struct StarAccumulator {
    target: usize,
    stars: Vec<StarRecord>,
    positions: Vec<Vec3>,
    stats: GenerationStats,
}

impl StarAccumulator {
    /// Create an accumulator that will hold at most `target` stars.
    pub fn new(target: usize) -> Self {
        Self {
            target,
            stars: Vec::with_capacity(target),
            positions: Vec::with_capacity(target),
            stats: GenerationStats::default(),
        }
    }

    pub fn count(&self) -> usize {
        self.stars.len()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn remaining(&self) -> usize {
        self.target.saturating_sub(self.stars.len())
    }

    pub fn is_full(&self) -> bool {
        self.stars.len() >= self.target
    }

    /// Id the next appended star must carry.
    pub fn next_id(&self) -> String {
        star_id(self.stars.len())
    }

    pub fn next_index(&self) -> usize {
        self.stars.len()
    }

    /// Positions of every star placed so far.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Account for the sampler work behind the next star.
    pub fn record_placement<T>(&mut self, placement: &Placement<T>) {
        self.stats.total_attempts += placement.attempts as u64;
        if placement.forced {
            self.stats.forced_placements += 1;
        }
    }

    /// Append a star built for [`Self::next_id`].
    pub fn append(&mut self, star: StarRecord) {
        debug_assert_eq!(star.index, self.stars.len(), "stars must be appended in id order");
        self.stats.per_structure[star.structure.slot()] += 1;
        self.positions.push(star.position);
        self.stars.push(star);
    }

    /// Append a backfill star.
    pub(crate) fn append_filler(&mut self, star: StarRecord) {
        self.stats.filler_stars += 1;
        self.append(star);
    }

    pub fn into_parts(self) -> (Vec<StarRecord>, Vec<Vec3>, GenerationStats) {
        (self.stars, self.positions, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(index: usize, structure: Structure) -> StarRecord {
        StarRecord {
            id: star_id(index),
            index,
            name: String::new(),
            position: Vec3::splat(index as f32),
            color: Vec3::ONE,
            size: 1.0,
            texture_index: 0,
            structure,
            cluster: None,
            planets: Vec::new(),
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut acc = StarAccumulator::new(3);
        assert_eq!(acc.next_id(), "star-0");
        acc.append(star(0, Structure::Bar));
        acc.append(star(1, Structure::Halo));
        assert_eq!(acc.next_id(), "star-2");
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.remaining(), 1);
        assert!(!acc.is_full());
        assert_eq!(acc.positions()[1], Vec3::ONE);
        assert_eq!(acc.stats().count(Structure::Halo), 1);
    }

    #[test]
    fn records_forced_placements() {
        let mut acc = StarAccumulator::new(1);
        acc.record_placement(&Placement {
            position: Vec3::ZERO,
            sample: (),
            attempts: 10,
            forced: true,
        });
        acc.append_filler(star(0, Structure::Halo));
        assert!(acc.is_full());
        assert_eq!(acc.stats().total_attempts, 10);
        assert_eq!(acc.stats().forced_placements, 1);
        assert_eq!(acc.stats().filler_stars, 1);
    }
}
