// Copyright @yucwang 2026

use std::sync::Arc;

use crate::core::bvh::IndexBvh;
use crate::core::hit_record::HitRecord;
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// A shared BVH placed in the world by an affine transform.
///
/// Hits report `t` in world units, while `isect_pos` stays in the
/// instance's object space so that primitive normals computed from it agree
/// with the primitive's own geometry.
pub struct BvhInstance<P> {
    bvh: Arc<IndexBvh<P>>,
    transform: Transform,
}

impl<P> BvhInstance<P> {
    pub fn new(bvh: Arc<IndexBvh<P>>, transform: Transform) -> Self {
        Self { bvh, transform }
    }

    pub fn bvh(&self) -> &IndexBvh<P> {
        &self.bvh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl<P: Shape> Shape for BvhInstance<P> {
    fn bounding_box(&self) -> AABB {
        self.transform.apply_aabb(&self.bvh.bounds())
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<HitRecord> {
        // The object-space direction is renormalized, so distances scale by
        // its original length.
        let local_dir = self.transform.inv_apply_vector(ray.dir());
        let scale = local_dir.norm();
        if scale == 0.0 {
            return None;
        }

        let local_ray = Ray3f::new(self.transform.inv_apply_point(ray.origin()),
                                   local_dir,
                                   Some(ray.min_t * scale),
                                   Some(ray.max_t * scale));

        let mut hit = self.bvh.ray_intersection(&local_ray)?;
        hit.t /= scale;
        hit.primitive_list_index_inst = hit.primitive_list_index;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::{Float, Vector3f};
    use crate::shapes::triangle::Triangle;

    fn quad_bvh() -> Arc<IndexBvh<Triangle>> {
        let p = |x: Float, y: Float| Vector3f::new(x, y, 0.0);
        let tris = vec![
            Triangle::new(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)).with_ids(0, 0),
            Triangle::new(p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)).with_ids(1, 0),
        ];
        Arc::new(IndexBvh::new(tris))
    }

    fn down_ray(x: Float, y: Float) -> Ray3f {
        Ray3f::new(Vector3f::new(x, y, 10.0), Vector3f::new(0.0, 0.0, -1.0), None, None)
    }

    #[test]
    fn test_instance_world_distance_and_local_index() {
        let instance = BvhInstance::new(quad_bvh(), Transform::translate(Vector3f::new(5.0, 0.0, 2.0)));
        let hit = instance.ray_intersection(&down_ray(5.2, 0.8)).expect("hit");

        assert!((hit.t - 8.0).abs() < 1e-5);
        assert_eq!(hit.prim_id, 1);
        assert_eq!(hit.primitive_list_index_inst, 1);
        assert!((hit.isect_pos - Vector3f::new(0.2, 0.8, 0.0)).norm() < 1e-5);
        assert!(instance.ray_intersection(&down_ray(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_scaled_instance_distance() {
        let instance = BvhInstance::new(quad_bvh(), Transform::scale(Vector3f::new(1.0, 1.0, 4.0)));
        let ray = Ray3f::new(Vector3f::new(0.5, 0.2, 10.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = instance.ray_intersection(&ray).expect("hit");
        assert!((hit.t - 10.0).abs() < 1e-4);

        let short = Ray3f::new(Vector3f::new(0.5, 0.2, 10.0), Vector3f::new(0.0, 0.0, -1.0), None, Some(9.0));
        assert!(instance.ray_intersection(&short).is_none());
    }

    #[test]
    fn test_bvh_of_instances_fills_both_indices() {
        let inner = quad_bvh();
        let instances = vec![
            BvhInstance::new(inner.clone(), Transform::translate(Vector3f::new(-3.0, 0.0, 0.0))),
            BvhInstance::new(inner, Transform::translate(Vector3f::new(3.0, 0.0, 0.0))),
        ];
        let top = IndexBvh::new(instances);
        let hit = top.ray_intersection(&down_ray(3.8, 0.2)).expect("hit");

        assert_eq!(hit.primitive_list_index, 1);
        assert_eq!(hit.primitive_list_index_inst, 0);
        let prim = top.primitive(hit.primitive_list_index as usize)
                      .bvh()
                      .primitive(hit.primitive_list_index_inst as usize);
        assert_eq!(prim.vertices().1, Vector3f::new(1.0, 0.0, 0.0));
    }
}
