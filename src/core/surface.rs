// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::Spectrum;

/// Resolved shading attributes at one hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface<M> {
    pub geometric_normal: Vector3f,
    pub shading_normal: Vector3f,
    pub color: Spectrum,
    pub material: M,
}

/// `N` surfaces stored lane-major, the packet counterpart of `Surface`.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfacePacket<M, const N: usize> {
    pub geometric_normal: [[Float; N]; 3],
    pub shading_normal: [[Float; N]; 3],
    pub color: [[Float; N]; 4],
    pub material: [M; N],
}

impl<M: Clone, const N: usize> SurfacePacket<M, N> {
    pub fn pack(surfaces: [Surface<M>; N]) -> Self {
        let mut geometric_normal = [[0.0; N]; 3];
        let mut shading_normal = [[0.0; N]; 3];
        let mut color = [[0.0; N]; 4];
        for (i, s) in surfaces.iter().enumerate() {
            for axis in 0..3 {
                geometric_normal[axis][i] = s.geometric_normal[axis];
                shading_normal[axis][i] = s.shading_normal[axis];
            }
            for c in 0..4 {
                color[c][i] = s.color[c];
            }
        }

        Self {
            geometric_normal,
            shading_normal,
            color,
            material: surfaces.map(|s| s.material),
        }
    }

    pub fn lane(&self, i: usize) -> Surface<M> {
        let g = &self.geometric_normal;
        let s = &self.shading_normal;
        let c = &self.color;
        Surface {
            geometric_normal: Vector3f::new(g[0][i], g[1][i], g[2][i]),
            shading_normal: Vector3f::new(s[0][i], s[1][i], s[2][i]),
            color: Spectrum::new(c[0][i], c[1][i], c[2][i], c[3][i]),
            material: self.material[i].clone(),
        }
    }

    pub fn unpack(&self) -> [Surface<M>; N] {
        std::array::from_fn(|i| self.lane(i))
    }
}
