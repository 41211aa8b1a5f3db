// Copyright @yucwang 2026

use crate::core::texture::Texel;
use crate::math::constants::{Float, Int};
use crate::textures::texel_floor;
use crate::math::spectrum::Spectrum;
use crate::textures::texture::Texture;

/// Point sampling: the texel whose cell contains the coordinate.
pub fn nearest<T: Texel, const D: usize>(tex: &Texture<T, D>, coord: [Float; D]) -> Spectrum {
    let size = tex.size();
    let modes = tex.address_modes();
    let texel: [Int; D] = std::array::from_fn(|axis| {
        modes[axis].map(texel_floor(coord[axis] * size[axis] as Float), size[axis])
    });
    T::fetch(tex.texels(), tex.linear_index(texel))
}
