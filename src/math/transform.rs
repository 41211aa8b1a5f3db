// Copyright 2020 @TwoCookingMice

use super::aabb::AABB;
use super::constants::{ Vector3f, Matrix4f };

/// Affine placement of an instance in world space, with its inverse cached.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix,
               inv_matrix: matrix.try_inverse().unwrap_or(Matrix4f::identity())}
    }

    pub fn translate(offset: Vector3f) -> Self {
        Self::new(Matrix4f::new_translation(&offset))
    }

    pub fn scale(factors: Vector3f) -> Self {
        Self::new(Matrix4f::new_nonuniform_scaling(&factors))
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        self.matrix.transform_point(&p.into()).coords
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.transform_vector(&v)
    }

    // Normals transform with the inverse transpose:
    // n^T x = 0 and (S n)^T (M x) = 0 give S = (M^{-1})^T.
    pub fn apply_normal(&self, n: Vector3f) -> Vector3f {
        self.inv_matrix.transpose().transform_vector(&n)
    }

    pub fn apply_aabb(&self, bounds: &AABB) -> AABB {
        let mut out = AABB::default();
        for corner in bounds.corners().iter() {
            out.expand_by_point(&self.apply_point(*corner));
        }
        out
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        self.inv_matrix.transform_point(&p.into()).coords
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.transform_vector(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_roundtrip() {
        let t = Transform::translate(Vector3f::new(1.0, 2.0, 3.0));
        let p = Vector3f::new(0.5, 0.5, 0.5);
        assert_eq!(t.apply_point(p), Vector3f::new(1.5, 2.5, 3.5));
        assert_eq!(t.inv_apply_point(t.apply_point(p)), p);
        assert_eq!(t.apply_vector(p), p);
    }

    #[test]
    fn test_scaled_normal_stays_perpendicular() {
        let t = Transform::scale(Vector3f::new(2.0, 1.0, 1.0));
        let tangent = t.apply_vector(Vector3f::new(1.0, -1.0, 0.0));
        let normal = t.apply_normal(Vector3f::new(1.0, 1.0, 0.0));
        assert!(tangent.dot(&normal).abs() < 1e-6);
    }
}
