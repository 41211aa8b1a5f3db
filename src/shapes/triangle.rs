// Copyright @yucwang 2023

use crate::core::hit_record::HitRecord;
use crate::core::primitive::{ Attribute, Primitive };
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f,
    prim_id: u32,
    geom_id: u32,
}

impl Shape for Triangle {
    fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);

        bound
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<HitRecord> {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1).normalize();

        let n_dot_dir = geo_normal.dot(&ray.dir());

        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.p0);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;
        if !ray.test_segment(t) {
            return None;
        }

        let intersection_p = ray.at(t);
        if !self.is_in_triangle(&intersection_p) {
            return None;
        }

        let bary = self.barycentric(&intersection_p);
        Some(HitRecord {
            hit: true,
            t,
            prim_id: self.prim_id,
            geom_id: self.geom_id,
            u: bary.y,
            v: bary.z,
            isect_pos: intersection_p,
            primitive_list_index: 0,
            primitive_list_index_inst: 0,
        })
    }
}

impl Primitive for Triangle {
    fn prim_id(&self) -> u32 {
        self.prim_id
    }

    fn geom_id(&self) -> u32 {
        self.geom_id
    }

    fn geometric_normal(&self, _hit: &HitRecord) -> Vector3f {
        self.normal()
    }

    // Three attributes per triangle, stored consecutively.
    #[inline]
    fn interpolate<A: Attribute>(&self, attrs: &[A], hit: &HitRecord) -> A {
        let base = hit.prim_id as usize * 3;
        let (w, u, v) = hit.barycentric();
        attrs[base] * w + attrs[base + 1] * u + attrs[base + 2] * v
    }
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
            prim_id: 0,
            geom_id: 0,
        }
    }

    pub fn with_ids(mut self, prim_id: u32, geom_id: u32) -> Self {
        self.prim_id = prim_id;
        self.geom_id = geom_id;
        self
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1);

        let n0 = (self.p1 - self.p0).cross(&(p - self.p0));
        let n1 = (self.p2 - self.p1).cross(&(p - self.p1));
        let n2 = (self.p0 - self.p2).cross(&(p - self.p2));

        (n0.dot(&geo_normal) >= 0.0) && (n1.dot(&geo_normal) >= 0.0) && (n2.dot(&geo_normal) >= 0.0)
    }

    pub fn normal(&self) -> Vector3f {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        edge0.cross(&edge1).normalize()
    }

    pub fn vertices(&self) -> (Vector3f, Vector3f, Vector3f) {
        (self.p0, self.p1, self.p2)
    }

    pub fn surface_area(&self) -> Float {
        0.5 * ((self.p1 - self.p0).cross(&(self.p2 - self.p0))).norm()
    }

    pub fn barycentric(&self, p: &Vector3f) -> Vector3f {
        let v0 = self.p1 - self.p0;
        let v1 = self.p2 - self.p0;
        let v2 = *p - self.p0;

        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < EPSILON {
            return Vector3f::new(1.0, 0.0, 0.0);
        }

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;
        Vector3f::new(u, v, w)
    }
}
