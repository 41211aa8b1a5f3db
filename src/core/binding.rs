// Copyright @yucwang 2026

//! Attribute binding tags. A scene chooses one tag for normals and one for
//! colors when its parameter bundle is built; the choice is part of the
//! bundle's type, so no per-hit branch exists on it.

use crate::core::hit_record::HitRecord;
use crate::core::primitive::{Attribute, Primitive};
use crate::math::constants::Vector3f;

pub trait AttributeBinding: Copy + Default + Send + Sync {
    const MODE: BindingMode;

    fn fetch<A: Attribute, P: Primitive>(attrs: &[A], hit: &HitRecord, prim: &P) -> A;

    fn fetch_normal<P: Primitive>(normals: &[Vector3f], hit: &HitRecord, prim: &P) -> Vector3f {
        Self::fetch(normals, hit, prim)
    }
}

/// One attribute per primitive, indexed by primitive id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerFace;

/// One attribute per geometry, indexed by geometry id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerGeometry;

/// Attributes stored per vertex and interpolated across the primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerVertex;

impl AttributeBinding for PerFace {
    const MODE: BindingMode = BindingMode::PerFace;

    #[inline]
    fn fetch<A: Attribute, P: Primitive>(attrs: &[A], hit: &HitRecord, _prim: &P) -> A {
        attrs[hit.prim_id as usize]
    }
}

impl AttributeBinding for PerGeometry {
    const MODE: BindingMode = BindingMode::PerGeometry;

    #[inline]
    fn fetch<A: Attribute, P: Primitive>(attrs: &[A], hit: &HitRecord, _prim: &P) -> A {
        attrs[hit.geom_id as usize]
    }
}

impl AttributeBinding for PerVertex {
    const MODE: BindingMode = BindingMode::PerVertex;

    #[inline]
    fn fetch<A: Attribute, P: Primitive>(attrs: &[A], hit: &HitRecord, prim: &P) -> A {
        prim.interpolate(attrs, hit)
    }

    #[inline]
    fn fetch_normal<P: Primitive>(normals: &[Vector3f], hit: &HitRecord, prim: &P) -> Vector3f {
        prim.interpolate(normals, hit).normalize()
    }
}

/// Runtime name of a binding, as read from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingMode {
    PerFace,
    PerGeometry,
    PerVertex,
}

impl BindingMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "per_face" => Some(BindingMode::PerFace),
            "per_geometry" => Some(BindingMode::PerGeometry),
            "per_vertex" => Some(BindingMode::PerVertex),
            _ => None,
        }
    }
}
