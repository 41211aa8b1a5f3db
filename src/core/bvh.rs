// Copyright @yucwang 2026

use crate::core::hit_record::{HitRecord, HitRecordPacket};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

const SAH_BUCKETS: usize = 12;

#[derive(Clone)]
struct BVHNode {
    bounds: AABB,
    left: Option<usize>,
    right: Option<usize>,
    start: usize,
    count: usize,
}

impl BVHNode {
    fn leaf(bounds: AABB, start: usize, count: usize) -> Self {
        Self { bounds, left: None, right: None, start, count }
    }

    fn interior(bounds: AABB, left: usize, right: usize) -> Self {
        Self { bounds, left: Some(left), right: Some(right), start: 0, count: 0 }
    }

    fn is_leaf(&self) -> bool {
        self.count > 0
    }
}

/// Bounding volume hierarchy over an owned primitive list.
///
/// Primitives keep their input order; the tree only permutes an index list,
/// so `primitive(i)` is the i-th primitive handed to `new`. Hits report
/// that position in `primitive_list_index`.
pub struct IndexBvh<P> {
    primitives: Vec<P>,
    nodes: Vec<BVHNode>,
    indices: Vec<usize>,
    prim_bounds: Vec<AABB>,
    prim_centroids: Vec<Vector3f>,
    max_leaf_size: usize,
}

impl<P: Shape> IndexBvh<P> {
    pub fn new(primitives: Vec<P>) -> Self {
        Self::with_max_leaf_size(primitives, 4)
    }

    pub fn with_max_leaf_size(primitives: Vec<P>, max_leaf_size: usize) -> Self {
        let prim_bounds: Vec<AABB> = primitives.iter().map(|p| p.bounding_box()).collect();
        let prim_centroids = prim_bounds.iter().map(|b| b.center()).collect();

        let mut bvh = Self {
            indices: (0..primitives.len()).collect(),
            primitives,
            nodes: Vec::new(),
            prim_bounds,
            prim_centroids,
            max_leaf_size: max_leaf_size.max(1),
        };

        if !bvh.indices.is_empty() {
            let (bounds, centroid_bounds) = bvh.compute_bounds(0, bvh.indices.len());
            bvh.build(0, bvh.indices.len(), bounds, centroid_bounds);
        }

        log::debug!("Built BVH over {} primitives with {} nodes.", bvh.primitives.len(), bvh.nodes.len());
        bvh
    }

    /// Closest hit along the ray, if any.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<HitRecord> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut ray = *ray;
        let mut closest: Option<HitRecord> = None;
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds.ray_intersect(&ray) {
                continue;
            }

            if node.is_leaf() {
                for i in 0..node.count {
                    let prim_idx = self.indices[node.start + i];
                    if let Some(mut hit) = self.primitives[prim_idx].ray_intersection(&ray) {
                        // Shrinking the segment keeps later candidates strictly closer.
                        ray.max_t = hit.t;
                        hit.primitive_list_index = prim_idx as u32;
                        closest = Some(hit);
                    }
                }
            } else {
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }

        closest
    }

    /// Traverse each lane independently and pack the results.
    pub fn ray_intersection_packet<const N: usize>(&self, rays: &[Ray3f; N]) -> HitRecordPacket<N> {
        let records: [HitRecord; N] = std::array::from_fn(|i| {
            self.ray_intersection(&rays[i]).unwrap_or_default()
        });
        HitRecordPacket::pack(&records)
    }

    fn build(&mut self, start: usize, end: usize, bounds: AABB, centroid_bounds: AABB) -> usize {
        let count = end - start;
        if count <= self.max_leaf_size {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let axis = centroid_bounds.max_extent() as usize;
        let axis_min = centroid_bounds.p_min[axis];
        let axis_max = centroid_bounds.p_max[axis];
        if (axis_max - axis_min).abs() < 1e-6 {
            // Degenerate centroid bounds: fall back to leaf.
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let bucket_of = |c: Float| -> usize {
            let b = ((c - axis_min) / (axis_max - axis_min) * SAH_BUCKETS as Float) as usize;
            b.min(SAH_BUCKETS - 1)
        };

        // SAH with fixed buckets along the split axis.
        let mut buckets = vec![(0usize, AABB::default()); SAH_BUCKETS];
        for i in start..end {
            let idx = self.indices[i];
            let b = bucket_of(self.prim_centroids[idx][axis]);
            buckets[b].0 += 1;
            buckets[b].1.expand_by_aabb(&self.prim_bounds[idx]);
        }

        let area = bounds.surface_area().max(1e-6);
        let mut min_cost = Float::MAX;
        let mut min_split = 0usize;
        for i in 0..(SAH_BUCKETS - 1) {
            let mut b0 = AABB::default();
            let mut b1 = AABB::default();
            let mut count0 = 0usize;
            let mut count1 = 0usize;
            for (n, bnd) in &buckets[..=i] {
                count0 += n;
                b0.expand_by_aabb(bnd);
            }
            for (n, bnd) in &buckets[(i + 1)..] {
                count1 += n;
                b1.expand_by_aabb(bnd);
            }
            let cost0 = if count0 > 0 { (count0 as Float) * b0.surface_area() } else { 0.0 };
            let cost1 = if count1 > 0 { (count1 as Float) * b1.surface_area() } else { 0.0 };
            let cost = 1.0 + (cost0 + cost1) / area;
            if cost < min_cost {
                min_cost = cost;
                min_split = i;
            }
        }

        // If SAH says leaf is cheaper, stop splitting.
        if min_cost >= count as Float {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let mut mid = start;
        for i in start..end {
            let idx = self.indices[i];
            if bucket_of(self.prim_centroids[idx][axis]) <= min_split {
                self.indices.swap(i, mid);
                mid += 1;
            }
        }

        if mid == start || mid == end {
            let node_idx = self.nodes.len();
            self.nodes.push(BVHNode::leaf(bounds, start, count));
            return node_idx;
        }

        let (left_bounds, left_centroids) = self.compute_bounds(start, mid);
        let (right_bounds, right_centroids) = self.compute_bounds(mid, end);
        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode::leaf(bounds, 0, 0));
        let left = self.build(start, mid, left_bounds, left_centroids);
        let right = self.build(mid, end, right_bounds, right_centroids);
        self.nodes[node_idx] = BVHNode::interior(bounds, left, right);
        node_idx
    }

    fn compute_bounds(&self, start: usize, end: usize) -> (AABB, AABB) {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for i in start..end {
            let idx = self.indices[i];
            bounds.expand_by_aabb(&self.prim_bounds[idx]);
            centroid_bounds.expand_by_point(&self.prim_centroids[idx]);
        }
        (bounds, centroid_bounds)
    }
}

impl<P> IndexBvh<P> {
    pub fn primitive(&self, index: usize) -> &P {
        &self.primitives[index]
    }

    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    pub fn num_primitives(&self) -> usize {
        self.primitives.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn bounds(&self) -> AABB {
        self.nodes.first().map(|n| n.bounds).unwrap_or_default()
    }
}
