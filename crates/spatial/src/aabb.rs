//! Axis-aligned bounding boxes.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.min = aabb.min.min(*p);
            aabb.max = aabb.max.max(*p);
        }
        Some(aabb)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Split point for subdivision. Axes with no extent keep `min`, so a flat box still
    /// yields children that contain its points.
    pub fn safe_center(&self) -> Vec3 {
        let size = self.size();
        let half = Vec3::select(size.cmpgt(Vec3::ZERO), size * 0.5, Vec3::ZERO);
        self.min + half
    }

    /// Inclusive on both faces.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Squared distance from `p` to the nearest point of the box (0 inside).
    pub fn distance_squared_to_point(&self, p: Vec3) -> f32 {
        let nearest = p.clamp(self.min, self.max);
        nearest.distance_squared(p)
    }

    /// Grow any axis thinner than `min_size` symmetrically to exactly `min_size`.
    pub fn with_min_size(&self, min_size: f32) -> Self {
        let size = self.size();
        let grow = Vec3::select(
            size.cmplt(Vec3::splat(min_size)),
            (Vec3::splat(min_size) - size) * 0.5,
            Vec3::ZERO,
        );
        Self::new(self.min - grow, self.max + grow)
    }

    /// One of the eight boxes obtained by splitting at `center`. Bit 0 of `octant` picks
    /// the upper x half, bit 1 upper y, bit 2 upper z.
    pub fn octant(&self, center: Vec3, octant: usize) -> Self {
        let upper = |bit: usize| octant & (1 << bit) != 0;
        let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
            if upper(bit) {
                (mid, hi)
            } else {
                (lo, mid)
            }
        };
        let (x0, x1) = pick(0, self.min.x, center.x, self.max.x);
        let (y0, y1) = pick(1, self.min.y, center.y, self.max.y);
        let (z0, z1) = pick(2, self.min.z, center.z, self.max.z);
        Self::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn contains_is_inclusive() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::ONE));
        assert!(!aabb.contains(Vec3::new(1.0001, 0.5, 0.5)));
    }

    #[test]
    fn box_distance() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.distance_squared_to_point(Vec3::splat(0.5)), 0.0);
        assert_eq!(aabb.distance_squared_to_point(Vec3::new(3.0, 0.5, 0.5)), 4.0);
        assert_eq!(aabb.distance_squared_to_point(Vec3::new(2.0, 2.0, 0.5)), 2.0);
    }

    #[test]
    fn flat_box_grows_and_splits_safely() {
        let flat = Aabb::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(10.0, 5.0, 10.0));
        assert_eq!(flat.safe_center(), Vec3::new(5.0, 5.0, 5.0));

        let grown = flat.with_min_size(0.01);
        assert!((grown.size().y - 0.01).abs() < 1e-6);
        assert_eq!(grown.size().x, 10.0);
        assert!((grown.center().y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn octants_tile_the_box() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let c = aabb.safe_center();
        let lo = aabb.octant(c, 0);
        let hi = aabb.octant(c, 7);
        assert_eq!(lo, Aabb::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(hi, Aabb::new(Vec3::ONE, Vec3::splat(2.0)));
        let x_only = aabb.octant(c, 1);
        assert_eq!(x_only.min, Vec3::new(1.0, 0.0, 0.0));
    }
}
