// Copyright @yucwang 2026

//! Surface resolution: from a hit record and the scene's parameter bundle to
//! the normals, color and material needed to shade the hit.

use crate::core::binding::AttributeBinding;
use crate::core::hit_record::{HitRecord, HitRecordPacket};
use crate::core::primitive::Primitive;
use crate::core::scene_params::{PrimitiveSource, SceneParams};
use crate::core::surface::{Surface, SurfacePacket};
use crate::core::texture::TextureSampler;
use crate::math::constants::Vector3f;
use crate::math::spectrum::Spectrum;

/// Hit records that can be resolved against a parameter bundle. Scalar
/// records resolve to a `Surface`, packets to a `SurfacePacket`.
pub trait ResolveSurface<Params> {
    type Output;

    fn resolve_surface(&self, params: &Params) -> Self::Output;
}

#[inline]
pub fn get_surface<H, P>(hit: &H, params: &P) -> H::Output
where
    H: ResolveSurface<P>,
{
    hit.resolve_surface(params)
}

impl<'a, S, M, X, NB, CB> ResolveSurface<SceneParams<'a, S, M, X, NB, CB>> for HitRecord
where
    S: PrimitiveSource,
    M: Clone + Default,
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    type Output = Surface<M>;

    fn resolve_surface(&self, params: &SceneParams<'a, S, M, X, NB, CB>) -> Surface<M> {
        if !self.hit {
            return Surface::default();
        }
        resolve_hit(self, params)
    }
}

impl<'a, S, M, X, NB, CB, const N: usize> ResolveSurface<SceneParams<'a, S, M, X, NB, CB>> for HitRecordPacket<N>
where
    S: PrimitiveSource,
    M: Clone + Default,
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    type Output = SurfacePacket<M, N>;

    fn resolve_surface(&self, params: &SceneParams<'a, S, M, X, NB, CB>) -> SurfacePacket<M, N> {
        // Lanes without a hit may carry garbage indices and are never looked up.
        let surfaces = self.unpack().map(|hit| {
            if hit.hit { resolve_hit(&hit, params) } else { Surface::default() }
        });
        SurfacePacket::pack(surfaces)
    }
}

fn resolve_hit<S, M, X, NB, CB>(hit: &HitRecord, params: &SceneParams<'_, S, M, X, NB, CB>) -> Surface<M>
where
    S: PrimitiveSource,
    M: Clone,
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    let prim = params.prims().locate(hit);
    let (geometric_normal, shading_normal) = resolve_normals::<NB, _>(params.geometric_normals(),
                                                                      params.shading_normals(),
                                                                      hit,
                                                                      prim);

    let vertex_color = params
        .colors()
        .map(|colors| CB::fetch(colors, hit, prim))
        .unwrap_or_else(Spectrum::white);

    Surface {
        geometric_normal,
        shading_normal,
        color: vertex_color * texture_color(params, hit, prim),
        material: params.materials()[hit.geom_id as usize].clone(),
    }
}

fn resolve_normals<NB: AttributeBinding, P: Primitive>(geometric_normals: Option<&[Vector3f]>,
                                                       shading_normals: Option<&[Vector3f]>,
                                                       hit: &HitRecord,
                                                       prim: &P) -> (Vector3f, Vector3f) {
    let gn = match geometric_normals {
        Some(normals) => NB::fetch_normal(normals, hit, prim),
        None => prim.geometric_normal(hit),
    };
    let sn = match shading_normals {
        Some(normals) => NB::fetch_normal(normals, hit, prim),
        None => gn,
    };
    (gn, sn)
}

fn texture_color<S, M, X, NB, CB>(params: &SceneParams<'_, S, M, X, NB, CB>,
                                  hit: &HitRecord,
                                  prim: &S::Prim) -> Spectrum
where
    S: PrimitiveSource,
    X: TextureSampler,
    NB: AttributeBinding,
    CB: AttributeBinding,
{
    match params.tex_coords() {
        Some(tex_coords) => {
            let coord = prim.interpolate(tex_coords, hit);
            params.textures()[hit.geom_id as usize].sample(coord)
        }
        None => Spectrum::white(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::binding::{PerFace, PerGeometry, PerVertex};
    use crate::core::bvh::IndexBvh;
    use crate::core::instance::BvhInstance;
    use crate::core::scene_params::{BvhPrimitives, InstancedBvhPrimitives, PrimitiveArray};
    use crate::math::constants::{Float, Vector2f};
    use crate::math::ray::Ray3f;
    use crate::math::transform::Transform;
    use crate::shapes::sphere::Sphere;
    use crate::shapes::triangle::Triangle;
    use crate::textures::texture::{Texture1D, Texture2D, Texture3D};
    use crate::textures::{AddressMode, FilterMode};
    use std::sync::Arc;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Material {
        name: &'static str,
    }

    fn unit_triangle(prim_id: u32, geom_id: u32) -> Triangle {
        Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                      Vector3f::new(1.0, 0.0, 0.0),
                      Vector3f::new(0.0, 1.0, 0.0)).with_ids(prim_id, geom_id)
    }

    fn hit_at(prim_id: u32, geom_id: u32, u: Float, v: Float) -> HitRecord {
        HitRecord { hit: true, prim_id, geom_id, u, v, ..HitRecord::default() }
    }

    fn materials() -> Vec<Material> {
        vec![Material { name: "first" }, Material { name: "second" }]
    }

    fn approx_vec(a: Vector3f, b: Vector3f) -> bool {
        (a - b).norm() < 1e-6
    }

    #[test]
    fn test_defaults_without_optional_arrays() {
        let prims = vec![unit_triangle(0, 1)];
        let materials = materials();
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials);

        let surface = get_surface(&hit_at(0, 1, 0.2, 0.3), &params);
        assert_eq!(surface.geometric_normal, Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(surface.shading_normal, surface.geometric_normal);
        assert_eq!(surface.color, Spectrum::white());
        assert_eq!(surface.material, Material { name: "second" });
    }

    #[test]
    fn test_per_vertex_shading_normals_at_corners_and_center() {
        let prims = vec![unit_triangle(0, 0)];
        let materials = materials();
        let n0 = Vector3f::new(1.0, 0.0, 0.0);
        let n1 = Vector3f::new(0.0, 1.0, 0.0);
        let n2 = Vector3f::new(0.0, 0.0, 1.0);
        let shading = vec![n0, n1, n2];
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_shading_normals(&shading)
            .with_normal_binding(PerVertex);

        // barycentric (1, 0, 0), (0, 1, 0), (0, 0, 1)
        assert_eq!(get_surface(&hit_at(0, 0, 0.0, 0.0), &params).shading_normal, n0);
        assert_eq!(get_surface(&hit_at(0, 0, 1.0, 0.0), &params).shading_normal, n1);
        assert_eq!(get_surface(&hit_at(0, 0, 0.0, 1.0), &params).shading_normal, n2);

        let third = 1.0 / 3.0;
        let center = get_surface(&hit_at(0, 0, third, third), &params);
        assert!(approx_vec(center.shading_normal, (n0 + n1 + n2).normalize()));
        assert_eq!(center.geometric_normal, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_per_face_and_per_geometry_normals() {
        let prims = vec![unit_triangle(0, 0), unit_triangle(1, 1)];
        let materials = materials();
        let normals = vec![Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0)];

        let per_face = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_geometric_normals(&normals)
            .with_normal_binding(PerFace);
        let s = get_surface(&hit_at(1, 0, 0.1, 0.1), &per_face);
        assert_eq!(s.geometric_normal, normals[1]);
        assert_eq!(s.shading_normal, normals[1]);

        let per_geometry = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_geometric_normals(&normals)
            .with_normal_binding(PerGeometry);
        let s = get_surface(&hit_at(1, 0, 0.1, 0.1), &per_geometry);
        assert_eq!(s.geometric_normal, normals[0]);
    }

    #[test]
    fn test_shading_normals_without_geometric_normals() {
        let prims = vec![unit_triangle(0, 0)];
        let materials = materials();
        let shading = vec![Vector3f::new(0.0, 1.0, 0.0)];
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_shading_normals(&shading);

        let s = get_surface(&hit_at(0, 0, 0.5, 0.25), &params);
        assert_eq!(s.geometric_normal, Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(s.shading_normal, shading[0]);
    }

    #[test]
    fn test_vertex_colors_without_texture_are_exact() {
        let prims = vec![unit_triangle(0, 0)];
        let materials = materials();
        let colors = vec![
            Spectrum::new(0.9, 0.1, 0.3, 1.0),
            Spectrum::new(0.2, 0.7, 0.5, 1.0),
            Spectrum::new(0.4, 0.4, 0.8, 0.5),
        ];
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_colors(&colors)
            .with_color_binding(PerVertex);

        let hit = hit_at(0, 0, 0.25, 0.5);
        let expected = colors[0] * 0.25 + colors[1] * 0.25 + colors[2] * 0.5;
        assert_eq!(get_surface(&hit, &params).color, expected);
    }

    #[test]
    fn test_texture_only_and_modulated_color() {
        let prims = vec![unit_triangle(0, 0)];
        let materials = materials();
        let tex_coords = vec![0.125 as Float, 0.375, 0.625];
        let texels: Vec<Float> = vec![0.0, 0.25, 0.5, 1.0];
        let textures = vec![Texture1D::new(texels, [4])
            .unwrap()
            .with_filter_mode(FilterMode::Nearest)
            .with_address_mode(AddressMode::Clamp)];

        let textured = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_textures(&tex_coords, &textures);
        // u = 1 selects the second vertex's coordinate, texel 1.
        assert_eq!(get_surface(&hit_at(0, 0, 1.0, 0.0), &textured).color, Spectrum::splat(0.25));

        let colors = vec![Spectrum::new(1.0, 0.5, 0.0, 1.0)];
        let modulated = textured.with_colors(&colors);
        let s = get_surface(&hit_at(0, 0, 0.0, 1.0), &modulated);
        assert_eq!(s.color, Spectrum::new(0.5, 0.25, 0.0, 0.5));
    }

    fn garbage_lane(seed: u32) -> HitRecord {
        HitRecord {
            hit: false,
            prim_id: 9999 + seed,
            geom_id: 77,
            primitive_list_index: 12345,
            u: Float::NAN,
            ..HitRecord::default()
        }
    }

    fn check_packet_against_scalar<const N: usize>(lanes: [HitRecord; N]) {
        let prims = vec![unit_triangle(0, 0), unit_triangle(1, 1)];
        let materials = materials();
        let shading: Vec<Vector3f> = (0..6)
            .map(|i| Vector3f::new(i as Float, 1.0, 2.0).normalize())
            .collect();
        let colors = vec![Spectrum::new(0.9, 0.8, 0.7, 1.0), Spectrum::new(0.3, 0.6, 0.9, 0.5)];
        let uvs: Vec<Vector2f> = (0..6).map(|i| Vector2f::new(0.1 * i as Float, 0.9 - 0.1 * i as Float)).collect();
        let texels: Vec<Float> = (0..16).map(|i| i as Float / 16.0).collect();
        let textures = vec![
            Texture2D::new(texels.clone(), [4, 4]).unwrap().with_filter_mode(FilterMode::CubicBSpline),
            Texture2D::new(texels, [4, 4]).unwrap().with_filter_mode(FilterMode::CatmullRom),
        ];
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_shading_normals(&shading)
            .with_colors(&colors)
            .with_normal_binding(PerVertex)
            .with_textures(&uvs, &textures);

        let mut packet = HitRecordPacket::<N>::default();
        for (i, hit) in lanes.iter().enumerate() {
            packet.set_lane(i, hit);
        }

        let surfaces = get_surface(&packet, &params);
        for (i, hit) in lanes.iter().enumerate() {
            if hit.hit {
                assert_eq!(surfaces.lane(i), get_surface(hit, &params));
            } else {
                assert_eq!(surfaces.lane(i), Surface::default());
            }
        }
    }

    #[test]
    fn test_packet_matches_scalar_and_masks_inactive_lanes() {
        check_packet_against_scalar([
            hit_at(1, 1, 0.2, 0.3),
            garbage_lane(0),
            hit_at(0, 0, 0.6, 0.1),
            hit_at(1, 0, 0.0, 0.0),
        ]);
    }

    #[test]
    fn test_eight_lane_packet_matches_scalar() {
        check_packet_against_scalar([
            garbage_lane(0),
            hit_at(0, 0, 0.1, 0.1),
            hit_at(1, 1, 0.7, 0.2),
            garbage_lane(1),
            hit_at(0, 1, 1.0, 0.0),
            hit_at(1, 0, 0.25, 0.25),
            garbage_lane(2),
            hit_at(1, 1, 0.0, 1.0),
        ]);
    }

    #[test]
    fn test_volume_texture_through_resolver() {
        let prims = vec![unit_triangle(0, 0)];
        let materials = materials();
        let uvw = vec![
            Vector3f::new(0.25, 0.25, 0.25),
            Vector3f::new(0.75, 0.25, 0.75),
            Vector3f::new(0.25, 0.75, 0.75),
        ];
        // texel (x, y, z) holds (x + 2 * (y + 2 * z)) / 8
        let texels: Vec<Float> = (0..8).map(|i| i as Float / 8.0).collect();
        let volume = Texture3D::new(texels, [2, 2, 2]).unwrap().with_address_mode(AddressMode::Clamp);
        assert_eq!(volume.clone().with_filter_mode(FilterMode::CatmullRom).sample(uvw[1]),
                   Spectrum::splat(0.625));

        let textures = vec![volume.with_filter_mode(FilterMode::Nearest)];
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials)
            .with_textures(&uvw, &textures);

        assert_eq!(get_surface(&hit_at(0, 0, 0.0, 0.0), &params).color, Spectrum::splat(0.0));
        assert_eq!(get_surface(&hit_at(0, 0, 1.0, 0.0), &params).color, Spectrum::splat(0.625));
        assert_eq!(get_surface(&hit_at(0, 0, 0.0, 1.0), &params).color, Spectrum::splat(0.75));
    }

    #[test]
    fn test_bvh_topology() {
        let prims = vec![unit_triangle(0, 0), unit_triangle(1, 1)];
        let colors = vec![Spectrum::rgb(1.0, 0.0, 0.0), Spectrum::rgb(0.0, 1.0, 0.0)];
        let materials = materials();
        let bvhs = vec![IndexBvh::new(prims)];
        let params = SceneParams::new(BvhPrimitives::new(&bvhs), &materials).with_colors(&colors);

        let ray = Ray3f::new(Vector3f::new(0.2, 0.2, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = bvhs[0].ray_intersection(&ray).expect("hit");
        let s = get_surface(&hit, &params);
        assert_eq!(s.color, colors[hit.prim_id as usize]);
        assert_eq!(s.geometric_normal, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_instanced_spheres() {
        let spheres = vec![
            Sphere::new(Vector3f::zeros(), 1.0).with_ids(0, 0),
            Sphere::new(Vector3f::new(0.0, 0.0, -3.0), 0.5).with_ids(1, 1),
        ];
        let inner = Arc::new(IndexBvh::new(spheres));
        let top = vec![IndexBvh::new(vec![
            BvhInstance::new(inner.clone(), Transform::translate(Vector3f::new(-4.0, 0.0, 0.0))),
            BvhInstance::new(inner, Transform::translate(Vector3f::new(4.0, 0.0, 0.0))),
        ])];
        let colors = vec![Spectrum::rgb(0.5, 0.5, 0.5), Spectrum::rgb(0.1, 0.2, 0.3)];
        let materials = materials();
        let params = SceneParams::new(InstancedBvhPrimitives::new(&top), &materials).with_colors(&colors);

        let ray = Ray3f::new(Vector3f::new(4.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = top[0].ray_intersection(&ray).expect("hit");
        assert_eq!(hit.primitive_list_index, 1);
        assert_eq!(hit.primitive_list_index_inst, 0);
        assert!((hit.t - 4.0).abs() < 1e-5);

        let s = get_surface(&hit, &params);
        assert!(approx_vec(s.geometric_normal, Vector3f::new(0.0, 0.0, 1.0)));
        assert_eq!(s.color, colors[0]);
        assert_eq!(s.material, Material { name: "first" });
    }

    #[test]
    fn test_concurrent_readers() {
        let prims: Vec<Triangle> = (0..8).map(|i| unit_triangle(i, 0)).collect();
        let materials = materials();
        let params = SceneParams::new(PrimitiveArray::new(&prims), &materials);

        std::thread::scope(|scope| {
            for i in 0..4u32 {
                let params = &params;
                scope.spawn(move || {
                    let s = get_surface(&hit_at(i * 2, 0, 0.1, 0.1), params);
                    assert_eq!(s.color, Spectrum::white());
                });
            }
        });
    }
}
