// Copyright @yucwang 2026

use crate::core::texture::Texel;
use crate::math::constants::{Float, Int};
use crate::math::spectrum::Spectrum;
use crate::textures::texel_space;
use crate::textures::texture::Texture;

/// Multilinear filter over the `2^D` texels surrounding the coordinate.
pub fn linear<T: Texel, const D: usize>(tex: &Texture<T, D>, coord: [Float; D]) -> Spectrum {
    let size = tex.size();
    let modes = tex.address_modes();

    let mut lo = [0 as Int; D];
    let mut hi = [0 as Int; D];
    let mut frac = [0.0 as Float; D];
    for axis in 0..D {
        let (base, u) = texel_space(coord[axis], size[axis]);
        lo[axis] = modes[axis].map(base, size[axis]);
        hi[axis] = modes[axis].map(base + 1, size[axis]);
        frac[axis] = u;
    }

    let mut result = Spectrum::default();
    for corner in 0..(1usize << D) {
        let mut weight = 1.0 as Float;
        let texel: [Int; D] = std::array::from_fn(|axis| {
            if corner & (1 << axis) != 0 {
                weight *= frac[axis];
                hi[axis]
            } else {
                weight *= 1.0 - frac[axis];
                lo[axis]
            }
        });
        result += weight * T::fetch(tex.texels(), tex.linear_index(texel));
    }
    result
}
