// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::core::shape::Shape;
use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ Vector2f, Vector3f };

use std::vec::Vec;
use wavefront_obj::obj;

/// Triangle soup with the attribute arrays a surface resolver binds.
///
/// Triangle `i` has primitive id `i`. Geometric normals are one per
/// triangle; shading normals and texture coordinates are three per
/// triangle (one per corner) and only present when every face provides
/// them.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    geometric_normals: Vec<Vector3f>,
    shading_normals: Option<Vec<Vector3f>>,
    tex_coords: Option<Vec<Vector2f>>,
}

impl TriangleMesh {
    pub fn from_obj(path: &str, geom_id: u32) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::read_obj_file(path)?;
        let mesh = Self::from_obj_set(obj_set, geom_id)?;
        log::info!("Mesh {} loaded: {} triangles.", path, mesh.triangles.len());
        Ok(mesh)
    }

    pub fn from_obj_str(input: &str, geom_id: u32) -> Result<Self, ObjLoadError> {
        Self::from_obj_set(obj_utils::parse_obj_str(input)?, geom_id)
    }

    fn from_obj_set(obj_set: obj::ObjSet, geom_id: u32) -> Result<Self, ObjLoadError> {
        let mut triangles = Vec::new();
        let mut geometric_normals = Vec::new();
        let mut shading_normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut all_normals = true;
        let mut all_uvs = true;

        let to_vec3 = |v: &obj::Vertex| Vector3f::new(v.x as f32, v.y as f32, v.z as f32);

        for object in obj_set.objects {
            for geom in object.geometry {
                for shape in geom.shapes {
                    let (a, b, c) = match shape.primitive {
                        obj::Primitive::Triangle(a, b, c) => (a, b, c),
                        _ => continue,
                    };
                    let corners = [a, b, c];

                    let [p0, p1, p2] = corners.map(|k| to_vec3(&object.vertices[k.0]));
                    let tri = Triangle::new(p0, p1, p2).with_ids(triangles.len() as u32, geom_id);
                    geometric_normals.push(tri.normal());
                    triangles.push(tri);

                    match corners.map(|k| k.2.and_then(|i| object.normals.get(i))) {
                        [Some(n0), Some(n1), Some(n2)] => {
                            shading_normals.extend([n0, n1, n2].map(|n| to_vec3(n).normalize()));
                        }
                        _ => all_normals = false,
                    }

                    match corners.map(|k| k.1.and_then(|i| object.tex_vertices.get(i))) {
                        [Some(t0), Some(t1), Some(t2)] => {
                            tex_coords.extend([t0, t1, t2].map(|t| Vector2f::new(t.u as f32, t.v as f32)));
                        }
                        _ => all_uvs = false,
                    }
                }
            }
        }

        if triangles.is_empty() {
            return Err(ObjLoadError::Empty);
        }
        if !all_normals && !shading_normals.is_empty() {
            log::warn!("Some faces have no vertex normals, dropping shading normals.");
        }
        if !all_uvs && !tex_coords.is_empty() {
            log::warn!("Some faces have no texture coordinates, dropping them.");
        }

        Ok(Self {
            triangles,
            geometric_normals,
            shading_normals: if all_normals { Some(shading_normals) } else { None },
            tex_coords: if all_uvs { Some(tex_coords) } else { None },
        })
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn geometric_normals(&self) -> &[Vector3f] {
        &self.geometric_normals
    }

    pub fn shading_normals(&self) -> Option<&[Vector3f]> {
        self.shading_normals.as_deref()
    }

    pub fn tex_coords(&self) -> Option<&[Vector2f]> {
        self.tex_coords.as_deref()
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::default();
        for tri in &self.triangles {
            bound.expand_by_aabb(&tri.bounding_box());
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 2.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_mesh_attributes() {
        let mesh = TriangleMesh::from_obj_str(QUAD, 3).expect("failed to load quad");
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.geometric_normals(), &[Vector3f::new(0.0, 0.0, 1.0); 2]);

        let normals = mesh.shading_normals().expect("normals present");
        assert_eq!(normals.len(), 6);
        assert_eq!(normals[4], Vector3f::new(0.0, 0.0, 1.0));

        let uvs = mesh.tex_coords().expect("uvs present");
        assert_eq!(uvs[3..6], [Vector2f::new(0.0, 0.0), Vector2f::new(1.0, 1.0), Vector2f::new(0.0, 1.0)]);

        let second = mesh.triangles()[1];
        assert_eq!(second.vertices().2, Vector3f::new(0.0, 1.0, 0.0));
        let bounds = mesh.bounding_box();
        assert_eq!(bounds.p_max, Vector3f::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_missing_attributes_are_dropped() {
        let input = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let mesh = TriangleMesh::from_obj_str(input, 0).expect("failed to load triangle");
        assert!(mesh.shading_normals().is_none());
        assert!(mesh.tex_coords().is_none());
        assert_eq!(mesh.triangles()[0].normal(), mesh.geometric_normals()[0]);
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        assert!(TriangleMesh::from_obj_str("v 0 0 0\n", 0).is_err());
    }
}
