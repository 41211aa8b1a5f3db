// Copyright @yucwang 2026

use crate::core::binding::{AttributeBinding, PerFace};
use crate::core::bvh::IndexBvh;
use crate::core::hit_record::HitRecord;
use crate::core::instance::BvhInstance;
use crate::core::primitive::Primitive;
use crate::core::texture::{NoTexture, TextureSampler};
use crate::math::constants::Vector3f;
use crate::math::spectrum::Spectrum;

/// Storage topology of the scene's primitives. Each implementation knows
/// how to walk from a hit record to the primitive that produced it.
pub trait PrimitiveSource: Send + Sync {
    type Prim: Primitive;

    fn locate(&self, hit: &HitRecord) -> &Self::Prim;
}

/// Primitives in a flat array, addressed by primitive id.
#[derive(Clone, Copy)]
pub struct PrimitiveArray<'a, P> {
    prims: &'a [P],
}

impl<'a, P> PrimitiveArray<'a, P> {
    pub fn new(prims: &'a [P]) -> Self {
        Self { prims }
    }
}

impl<'a, P: Primitive> PrimitiveSource for PrimitiveArray<'a, P> {
    type Prim = P;

    #[inline]
    fn locate(&self, hit: &HitRecord) -> &P {
        &self.prims[hit.prim_id as usize]
    }
}

/// Primitives owned by a BVH, addressed by primitive id through the BVH.
#[derive(Clone, Copy)]
pub struct BvhPrimitives<'a, P> {
    bvhs: &'a [IndexBvh<P>],
}

impl<'a, P> BvhPrimitives<'a, P> {
    pub fn new(bvhs: &'a [IndexBvh<P>]) -> Self {
        Self { bvhs }
    }
}

impl<'a, P: Primitive> PrimitiveSource for BvhPrimitives<'a, P> {
    type Prim = P;

    // Only the first top-level BVH is consulted.
    #[inline]
    fn locate(&self, hit: &HitRecord) -> &P {
        self.bvhs[0].primitive(hit.prim_id as usize)
    }
}

/// A BVH of instances: the hit's instance index picks the instance, the
/// instance-local index picks the primitive inside its BVH.
#[derive(Clone, Copy)]
pub struct InstancedBvhPrimitives<'a, P> {
    bvhs: &'a [IndexBvh<BvhInstance<P>>],
}

impl<'a, P> InstancedBvhPrimitives<'a, P> {
    pub fn new(bvhs: &'a [IndexBvh<BvhInstance<P>>]) -> Self {
        Self { bvhs }
    }
}

impl<'a, P: Primitive> PrimitiveSource for InstancedBvhPrimitives<'a, P> {
    type Prim = P;

    // Only the first top-level BVH is consulted.
    #[inline]
    fn locate(&self, hit: &HitRecord) -> &P {
        self.bvhs[0]
            .primitive(hit.primitive_list_index as usize)
            .bvh()
            .primitive(hit.primitive_list_index_inst as usize)
    }
}

/// Read-only view of everything the surface resolver reads for one render
/// pass. Optional arrays may be absent; the binding tags `NB` (normals) and
/// `CB` (colors) and the texture type `X` are fixed by the type.
///
/// Materials and textures are indexed by geometry id.
pub struct SceneParams<'a, S, M, X: TextureSampler = NoTexture, NB = PerFace, CB = PerFace> {
    prims: S,
    geometric_normals: Option<&'a [Vector3f]>,
    shading_normals: Option<&'a [Vector3f]>,
    colors: Option<&'a [Spectrum]>,
    tex_coords: Option<&'a [X::Coord]>,
    materials: &'a [M],
    textures: &'a [X],
    normal_binding: NB,
    color_binding: CB,
}

impl<'a, S: PrimitiveSource, M> SceneParams<'a, S, M> {
    pub fn new(prims: S, materials: &'a [M]) -> Self {
        Self {
            prims,
            geometric_normals: None,
            shading_normals: None,
            colors: None,
            tex_coords: None,
            materials,
            textures: &[],
            normal_binding: PerFace,
            color_binding: PerFace,
        }
    }
}

impl<'a, S, M, X, NB, CB> SceneParams<'a, S, M, X, NB, CB>
where
    S: PrimitiveSource,
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    pub fn with_geometric_normals(mut self, normals: &'a [Vector3f]) -> Self {
        self.geometric_normals = Some(normals);
        self
    }

    pub fn with_shading_normals(mut self, normals: &'a [Vector3f]) -> Self {
        self.shading_normals = Some(normals);
        self
    }

    pub fn with_colors(mut self, colors: &'a [Spectrum]) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Bind texture coordinates and the per-geometry textures they index.
    pub fn with_textures<Y: TextureSampler>(self,
                                            tex_coords: &'a [Y::Coord],
                                            textures: &'a [Y]) -> SceneParams<'a, S, M, Y, NB, CB> {
        SceneParams {
            prims: self.prims,
            geometric_normals: self.geometric_normals,
            shading_normals: self.shading_normals,
            colors: self.colors,
            tex_coords: Some(tex_coords),
            materials: self.materials,
            textures,
            normal_binding: self.normal_binding,
            color_binding: self.color_binding,
        }
    }

    pub fn with_normal_binding<B: AttributeBinding>(self, binding: B) -> SceneParams<'a, S, M, X, B, CB> {
        SceneParams {
            prims: self.prims,
            geometric_normals: self.geometric_normals,
            shading_normals: self.shading_normals,
            colors: self.colors,
            tex_coords: self.tex_coords,
            materials: self.materials,
            textures: self.textures,
            normal_binding: binding,
            color_binding: self.color_binding,
        }
    }

    pub fn with_color_binding<B: AttributeBinding>(self, binding: B) -> SceneParams<'a, S, M, X, NB, B> {
        SceneParams {
            prims: self.prims,
            geometric_normals: self.geometric_normals,
            shading_normals: self.shading_normals,
            colors: self.colors,
            tex_coords: self.tex_coords,
            materials: self.materials,
            textures: self.textures,
            normal_binding: self.normal_binding,
            color_binding: binding,
        }
    }

    pub fn prims(&self) -> &S {
        &self.prims
    }

    pub fn geometric_normals(&self) -> Option<&'a [Vector3f]> {
        self.geometric_normals
    }

    pub fn shading_normals(&self) -> Option<&'a [Vector3f]> {
        self.shading_normals
    }

    pub fn colors(&self) -> Option<&'a [Spectrum]> {
        self.colors
    }

    pub fn tex_coords(&self) -> Option<&'a [X::Coord]> {
        self.tex_coords
    }

    pub fn materials(&self) -> &'a [M] {
        self.materials
    }

    pub fn textures(&self) -> &'a [X] {
        self.textures
    }

    pub fn normal_binding(&self) -> NB {
        self.normal_binding
    }

    pub fn color_binding(&self) -> CB {
        self.color_binding
    }
}
