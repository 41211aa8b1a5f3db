// Copyright @yucwang 2026

use crate::core::primitive::Attribute;
use crate::math::constants::{Float, Vector2f, Vector4f};
use crate::math::gather::gather;
use crate::math::simd::{i32x4, Lanes};
use crate::math::spectrum::Spectrum;
use crate::math::unorm::{Rgba8, Unorm16, Unorm32, Unorm8};

/// A storable texel. Filters work on `Spectrum`; every tap goes through
/// `gather`, so fixed-point texels are decoded as they are fetched.
///
/// Scalar texels broadcast to all four channels.
pub trait Texel: Copy + Send + Sync {
    fn fetch(texels: &[Self], index: usize) -> Spectrum;

    /// Four taps of one filter row in a single 4-wide gather.
    fn fetch_row(texels: &[Self], index: i32x4) -> [Spectrum; 4];
}

macro_rules! scalar_texel {
    ($t:ty) => {
        impl Texel for $t {
            #[inline]
            fn fetch(texels: &[$t], index: usize) -> Spectrum {
                Spectrum::splat(gather(texels, index))
            }

            #[inline]
            fn fetch_row(texels: &[$t], index: i32x4) -> [Spectrum; 4] {
                gather(texels, index).to_array().map(Spectrum::splat)
            }
        }
    };
}

scalar_texel!(Float);
scalar_texel!(Unorm8);
scalar_texel!(Unorm16);
scalar_texel!(Unorm32);

macro_rules! vector_texel {
    ($t:ty) => {
        impl Texel for $t {
            #[inline]
            fn fetch(texels: &[$t], index: usize) -> Spectrum {
                Spectrum::from_vector(gather(texels, index))
            }

            #[inline]
            fn fetch_row(texels: &[$t], index: i32x4) -> [Spectrum; 4] {
                gather(texels, index).lanes().map(Spectrum::from_vector)
            }
        }
    };
}

vector_texel!(Vector4f);
vector_texel!(Rgba8);
vector_texel!(Spectrum);

/// Something the surface resolver can sample with an interpolated texture
/// coordinate. The coordinate type fixes the dimensionality, so the choice
/// of 1D, 2D or 3D lookup is made by the type of the texture array.
pub trait TextureSampler: Send + Sync {
    type Coord: Attribute + Send + Sync;

    const DIMENSIONS: usize;

    fn sample(&self, coord: Self::Coord) -> Spectrum;
}

/// Placeholder texture type for scenes without textures. Sampling yields
/// the multiplicative identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoTexture;

impl TextureSampler for NoTexture {
    type Coord = Vector2f;

    const DIMENSIONS: usize = 2;

    #[inline]
    fn sample(&self, _coord: Vector2f) -> Spectrum {
        Spectrum::white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_texels_broadcast() {
        let texels = vec![Unorm8(0), Unorm8(51), Unorm8(255)];
        assert_eq!(Unorm8::fetch(&texels, 1), Spectrum::splat(0.2));

        let row = Unorm8::fetch_row(&texels, i32x4::new([2, 2, 0, 1]));
        assert_eq!(row[0], Spectrum::white());
        assert_eq!(row[2], Spectrum::default());
        assert_eq!(row[3], Spectrum::splat(0.2));
    }

    #[test]
    fn test_vector_texels_componentwise() {
        let texels: Vec<Rgba8> = vec![
            [Unorm8(255), Unorm8(0), Unorm8(51), Unorm8(255)],
            [Unorm8(0), Unorm8(255), Unorm8(0), Unorm8(0)],
        ];
        assert_eq!(Rgba8::fetch(&texels, 0), Spectrum::new(1.0, 0.0, 0.2, 1.0));

        let row = Rgba8::fetch_row(&texels, i32x4::new([1, 0, 1, 0]));
        assert_eq!(row[0], Spectrum::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(row[1], Rgba8::fetch(&texels, 0));

        let floats = vec![Vector4f::new(0.5, 0.25, 0.125, 1.0)];
        assert_eq!(Vector4f::fetch_row(&floats, i32x4::new([0; 4]))[3], Spectrum::new(0.5, 0.25, 0.125, 1.0));
    }

    #[test]
    fn test_no_texture_is_identity() {
        assert_eq!(NoTexture.sample(Vector2f::new(0.3, 0.7)), Spectrum::white());
    }
}
