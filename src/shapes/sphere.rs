// Copyright @yucwang 2026

use crate::core::hit_record::HitRecord;
use crate::core::primitive::{ Attribute, Primitive };
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
    prim_id: u32,
    geom_id: u32,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius, prim_id: 0, geom_id: 0 }
    }

    pub fn with_ids(mut self, prim_id: u32, geom_id: u32) -> Self {
        self.prim_id = prim_id;
        self.geom_id = geom_id;
        self
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<HitRecord> {
        let oc = ray.origin() - self.center;
        let b = oc.dot(&ray.dir());
        let c = oc.dot(&oc) - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let t = [-b - sqrt_disc, -b + sqrt_disc]
            .into_iter()
            .find(|t| ray.test_segment(*t))?;

        Some(HitRecord {
            hit: true,
            t,
            prim_id: self.prim_id,
            geom_id: self.geom_id,
            u: 0.0,
            v: 0.0,
            isect_pos: ray.at(t),
            primitive_list_index: 0,
            primitive_list_index_inst: 0,
        })
    }
}

impl Primitive for Sphere {
    fn prim_id(&self) -> u32 {
        self.prim_id
    }

    fn geom_id(&self) -> u32 {
        self.geom_id
    }

    fn geometric_normal(&self, hit: &HitRecord) -> Vector3f {
        (hit.isect_pos - self.center) / self.radius
    }

    // A sphere has no vertices: one attribute per primitive.
    #[inline]
    fn interpolate<A: Attribute>(&self, attrs: &[A], hit: &HitRecord) -> A {
        attrs[hit.prim_id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_and_normal() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, -5.0), 1.0).with_ids(1, 3);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = sphere.ray_intersection(&ray).expect("ray should hit");

        assert_eq!(hit.t, 4.0);
        assert_eq!(hit.geom_id, 3);
        assert_eq!(sphere.geometric_normal(&hit), Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sphere_from_inside_and_miss() {
        let sphere = Sphere::new(Vector3f::zeros(), 2.0);
        let inside = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert_eq!(sphere.ray_intersection(&inside).map(|h| h.t), Some(2.0));

        let miss = Ray3f::new(Vector3f::new(0.0, 3.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(sphere.ray_intersection(&miss).is_none());
    }

    #[test]
    fn test_sphere_attributes_per_primitive() {
        let sphere = Sphere::new(Vector3f::zeros(), 1.0).with_ids(1, 0);
        let attrs: Vec<Float> = vec![5.0, 6.0];
        let hit = HitRecord { hit: true, prim_id: 1, ..HitRecord::default() };
        assert_eq!(sphere.interpolate(&attrs, &hit), 6.0);
    }
}
