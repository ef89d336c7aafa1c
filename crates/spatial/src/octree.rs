//! Point octree over star positions, answering nearest-point queries.
//!
//! Nodes live in one arena; a subdivided node points at eight contiguous children.
//! Points that fit in no child after a split (numerically on the edge) stay on the
//! internal node, so queries check every node's own points, not just leaves.

use crate::aabb::Aabb;
use glam::Vec3;

pub const DEFAULT_CAPACITY: usize = 8;
/// Minimum box extent per axis, relative to the magnitude of the coordinates involved.
pub const MIN_BOUNDS_SIZE: f32 = 1e-5;
/// Subdivision stops here; a node at this depth holds any number of points.
pub const MAX_DEPTH: u32 = 24;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub struct OctreeNode {
    bounds: Aabb,
    /// Indices into the octree's point list.
    points: Vec<usize>,
    /// Arena index of the first of eight children.
    first_child: Option<usize>,
    depth: u32,
}

impl OctreeNode {
    fn new(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            points: Vec::new(),
            first_child: None,
            depth,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn point_indices(&self) -> &[usize] {
        &self.points
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn children(&self) -> Option<std::ops::Range<usize>> {
        self.first_child.map(|first| first..first + 8)
    }
}

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub point: Vec3,
    /// Position of the point in the slice the octree was built from.
    pub index: usize,
    pub distance_sq: f32,
}

#[derive(Debug, Clone)]
pub struct PointOctree {
    nodes: Vec<OctreeNode>,
    points: Vec<Vec3>,
    capacity: usize,
    len: usize,
}

impl PointOctree {
    /// Build an index over `points`.
    ///
    /// Without `bounds` the tightest box around the points is used. Thin axes are widened
    /// to [`MIN_BOUNDS_SIZE`] either way. Points outside explicit bounds are skipped.
    pub fn build(points: &[Vec3], bounds: Option<Aabb>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let bounds = bounds
            .or_else(|| Aabb::from_points(points))
            .unwrap_or_else(|| Aabb::new(Vec3::ZERO, Vec3::ZERO));
        let scale = bounds.min.abs().max(bounds.max.abs()).max_element().max(1.0);
        let bounds = bounds.with_min_size(MIN_BOUNDS_SIZE * scale);

        let mut tree = Self {
            nodes: vec![OctreeNode::new(bounds, 0)],
            points: points.to_vec(),
            capacity,
            len: 0,
        };
        for index in 0..points.len() {
            if tree.insert(ROOT, index) {
                tree.len += 1;
            }
        }

        let skipped = points.len() - tree.len;
        if skipped > 0 {
            log::debug!("octree skipped {} points outside {:?}", skipped, bounds);
        }
        log::debug!(
            "octree built: {} points, {} nodes, depth {}",
            tree.len,
            tree.nodes.len(),
            tree.depth()
        );
        tree
    }

    /// Build with computed bounds and [`DEFAULT_CAPACITY`].
    pub fn from_points(points: &[Vec3]) -> Self {
        Self::build(points, None, DEFAULT_CAPACITY)
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bounds(&self) -> Aabb {
        self.nodes[ROOT].bounds
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Deepest node level (0 for a lone root).
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    fn insert(&mut self, node: usize, index: usize) -> bool {
        let point = self.points[index];
        if !self.nodes[node].bounds.contains(point) {
            return false;
        }

        if let Some(children) = self.nodes[node].children() {
            if !self.insert_into_children(children, index) {
                self.nodes[node].points.push(index);
            }
            return true;
        }

        let full = self.nodes[node].points.len() >= self.capacity;
        if !full || self.nodes[node].depth >= MAX_DEPTH {
            self.nodes[node].points.push(index);
            return true;
        }

        let children = self.subdivide(node);
        for existing in std::mem::take(&mut self.nodes[node].points) {
            if !self.insert_into_children(children.clone(), existing) {
                self.nodes[node].points.push(existing);
            }
        }
        if !self.insert_into_children(children, index) {
            self.nodes[node].points.push(index);
        }
        true
    }

    fn insert_into_children(&mut self, children: std::ops::Range<usize>, index: usize) -> bool {
        children.into_iter().any(|child| self.insert(child, index))
    }

    fn subdivide(&mut self, node: usize) -> std::ops::Range<usize> {
        let parent = &self.nodes[node];
        let bounds = parent.bounds;
        let depth = parent.depth + 1;
        let center = bounds.safe_center();

        let first = self.nodes.len();
        self.nodes
            .extend((0..8).map(|octant| OctreeNode::new(bounds.octant(center, octant), depth)));
        self.nodes[node].first_child = Some(first);
        first..first + 8
    }

    /// Closest indexed point to `target`, or `None` if the index is empty.
    pub fn find_closest_point(&self, target: Vec3) -> Option<Vec3> {
        self.nearest(target).map(|n| n.point)
    }

    pub fn nearest(&self, target: Vec3) -> Option<Nearest> {
        if self.is_empty() {
            return None;
        }
        let mut best: Option<(usize, f32)> = None;
        self.search(ROOT, target, &mut best);
        best.map(|(index, distance_sq)| Nearest {
            point: self.points[index],
            index,
            distance_sq,
        })
    }

    /// Children of one node paired with their box distance to `target`, nearest first.
    fn visit_order(&self, children: std::ops::Range<usize>, target: Vec3) -> [(f32, usize); 8] {
        let mut order = [(0.0, 0); 8];
        for (slot, child) in order.iter_mut().zip(children) {
            *slot = (self.nodes[child].bounds.distance_squared_to_point(target), child);
        }
        order.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        order
    }

    fn search(&self, node: usize, target: Vec3, best: &mut Option<(usize, f32)>) {
        let node = &self.nodes[node];
        for &index in &node.points {
            let d = self.points[index].distance_squared(target);
            if best.map_or(true, |(_, b)| d < b) {
                *best = Some((index, d));
            }
        }

        let Some(children) = node.children() else {
            return;
        };

        for (box_distance, child) in self.visit_order(children, target) {
            if best.map_or(false, |(_, b)| box_distance >= b) {
                break;
            }
            self.search(child, target, best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn brute_force(points: &[Vec3], target: Vec3) -> f32 {
        points
            .iter()
            .map(|p| p.distance_squared(target))
            .fold(f32::INFINITY, f32::min)
    }

    fn random_points(rng: &mut StdRng, n: usize, extent: Vec3) -> Vec<Vec3> {
        (0..n)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                ) * extent
            })
            .collect()
    }

    fn assert_matches_linear_scan(points: &[Vec3], rng: &mut StdRng) {
        let tree = PointOctree::from_points(points);
        assert_eq!(tree.len(), points.len());
        for _ in 0..50 {
            let target = Vec3::new(
                rng.gen_range(-1500.0..1500.0),
                rng.gen_range(-300.0..300.0),
                rng.gen_range(-1500.0..1500.0),
            );
            let found = tree.nearest(target).unwrap();
            assert_eq!(found.distance_sq, brute_force(points, target));
            assert_eq!(points[found.index], found.point);
        }
    }

    #[test]
    fn empty_index_returns_none() {
        let tree = PointOctree::from_points(&[]);
        assert!(tree.is_empty());
        assert!(tree.find_closest_point(Vec3::ONE).is_none());
    }

    #[test]
    fn single_point_always_wins() {
        let p = Vec3::new(3.0, -7.0, 12.5);
        let tree = PointOctree::from_points(&[p]);
        for target in [Vec3::ZERO, p, Vec3::splat(1e6), Vec3::new(-40.0, 2.0, 9.0)] {
            assert_eq!(tree.find_closest_point(target), Some(p));
        }
    }

    #[test]
    fn matches_linear_scan_on_random_sets() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [2, 9, 64, 500, 3000] {
            let points = random_points(&mut rng, n, Vec3::new(1000.0, 150.0, 1000.0));
            assert_matches_linear_scan(&points, &mut rng);
        }
    }

    #[test]
    fn matches_linear_scan_on_flat_and_collinear_sets() {
        let mut rng = StdRng::seed_from_u64(2);
        let flat = random_points(&mut rng, 400, Vec3::new(800.0, 0.0, 800.0));
        assert_matches_linear_scan(&flat, &mut rng);

        let line: Vec<Vec3> = (0..300).map(|i| Vec3::new(i as f32 * 3.0, 0.0, 0.0)).collect();
        assert_matches_linear_scan(&line, &mut rng);
    }

    #[test]
    fn duplicate_points_terminate() {
        let points = vec![Vec3::new(5.0, 5.0, 5.0); 100];
        let tree = PointOctree::build(&points, None, 4);
        assert_eq!(tree.len(), 100);
        assert!(tree.depth() <= MAX_DEPTH);
        let found = tree.nearest(Vec3::ZERO).unwrap();
        assert_eq!(found.point, points[0]);
    }

    #[test]
    fn stored_points_lie_in_their_node() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(&mut rng, 1000, Vec3::splat(100.0));
        let tree = PointOctree::build(&points, None, 4);

        let mut stored = 0;
        for node in tree.nodes() {
            if node.is_leaf() {
                assert!(node.point_indices().len() <= 4 || node.depth() == MAX_DEPTH);
            }
            for &i in node.point_indices() {
                assert!(node.bounds().contains(points[i]));
                stored += 1;
            }
        }
        assert_eq!(stored, 1000);
        assert!(tree.node_count() > 1);
        assert_eq!((tree.node_count() - 1) % 8, 0);
    }

    #[test]
    fn explicit_bounds_skip_outside_points() {
        let points = [Vec3::ZERO, Vec3::splat(2.0), Vec3::splat(50.0)];
        let bounds = Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0));
        let tree = PointOctree::build(&points, Some(bounds), 8);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find_closest_point(Vec3::splat(40.0)), Some(Vec3::splat(2.0)));
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let tree = PointOctree::build(&points, None, 0);
        assert_eq!(tree.capacity(), 1);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.find_closest_point(Vec3::new(0.1, 0.9, 0.0)), Some(Vec3::Y));
    }

    #[test]
    fn children_visited_nearest_box_first() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_points(&mut rng, 200, Vec3::splat(100.0));
        let tree = PointOctree::build(&points, None, 4);
        let root_children = tree.nodes()[0].children().unwrap();
        let target = Vec3::new(50.0, -40.0, 30.0);

        let order = tree.visit_order(root_children.clone(), target);
        let mut visited: Vec<usize> = order.iter().map(|&(_, child)| child).collect();
        visited.sort_unstable();
        assert_eq!(visited, root_children.collect::<Vec<_>>());
        assert!(order.windows(2).all(|w| w[0].0 <= w[1].0));
        // The target lies inside one octant, so the nearest box is at distance zero.
        assert_eq!(order[0].0, 0.0);
        assert!(tree.nodes()[order[0].1].bounds().contains(target));
    }
}
