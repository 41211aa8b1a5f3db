// Copyright @yucwang 2023

use crate::core::hit_record::HitRecord;
use crate::math::aabb::AABB;
use crate::math::ray::Ray3f;

/// Intersection side of a primitive, consumed by acceleration structures.
pub trait Shape: Send + Sync {
    fn bounding_box(&self) -> AABB;
    fn ray_intersection(&self, ray: &Ray3f) -> Option<HitRecord>;
}
