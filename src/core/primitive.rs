// Copyright @yucwang 2026

use crate::core::hit_record::HitRecord;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::Spectrum;

use std::ops::{Add, Mul};

/// Anything that can be blended with barycentric weights.
pub trait Attribute: Copy + Add<Output = Self> + Mul<Float, Output = Self> {}

impl Attribute for Float {}
impl Attribute for Vector2f {}
impl Attribute for Vector3f {}
impl Attribute for Spectrum {}

/// Attribute side of a primitive: what the surface resolver needs to know
/// about the primitive a hit record points at.
pub trait Primitive: Send + Sync {
    fn prim_id(&self) -> u32;
    fn geom_id(&self) -> u32;

    /// Normal computed from the primitive's own geometry.
    fn geometric_normal(&self, hit: &HitRecord) -> Vector3f;

    /// Per-vertex attribute lookup for this primitive kind.
    fn interpolate<A: Attribute>(&self, attrs: &[A], hit: &HitRecord) -> A;
}
