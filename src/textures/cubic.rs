// Copyright @yucwang 2026

//! Separable four-tap cubic reconstruction.
//!
//! Along every axis the filter reads the texels at offsets -1, 0, +1, +2
//! from the texel just below the sample position and blends them with the
//! kernel weights `w0..w3(u)`, where `u` is the distance from that texel's
//! center. Rows along x are fetched with one 4-wide gather each; 2D and 3D
//! results are collapsed x first, then y, then z.

use crate::core::texture::Texel;
use crate::math::constants::{Float, Int, Vector2f, Vector3f};
use crate::math::simd::i32x4;
use crate::math::spectrum::Spectrum;
use crate::textures::texel_space;
use crate::textures::texture::{Texture1D, Texture2D, Texture3D};
use crate::textures::AddressMode;

/// Four-tap cubic kernel evaluated at the fractional offset `u` in `[0, 1)`.
pub trait CubicWeights {
    fn w0(u: Float) -> Float;
    fn w1(u: Float) -> Float;
    fn w2(u: Float) -> Float;
    fn w3(u: Float) -> Float;

    #[inline]
    fn weights(u: Float) -> [Float; 4] {
        [Self::w0(u), Self::w1(u), Self::w2(u), Self::w3(u)]
    }
}

/// Uniform cubic B-spline. Smooth but approximating.
#[derive(Clone, Copy, Debug, Default)]
pub struct BSpline;

impl CubicWeights for BSpline {
    #[inline]
    fn w0(u: Float) -> Float {
        (1.0 / 6.0) * (-u * u * u + 3.0 * u * u - 3.0 * u + 1.0)
    }

    #[inline]
    fn w1(u: Float) -> Float {
        (1.0 / 6.0) * (3.0 * u * u * u - 6.0 * u * u + 4.0)
    }

    #[inline]
    fn w2(u: Float) -> Float {
        (1.0 / 6.0) * (-3.0 * u * u * u + 3.0 * u * u + 3.0 * u + 1.0)
    }

    #[inline]
    fn w3(u: Float) -> Float {
        (1.0 / 6.0) * (u * u * u)
    }
}

/// Catmull-Rom spline. Interpolating: at `u = 0` only `w1` is non-zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatmullRom;

impl CubicWeights for CatmullRom {
    #[inline]
    fn w0(u: Float) -> Float {
        0.5 * (-u * u * u + 2.0 * u * u - u)
    }

    #[inline]
    fn w1(u: Float) -> Float {
        0.5 * (3.0 * u * u * u - 5.0 * u * u + 2.0)
    }

    #[inline]
    fn w2(u: Float) -> Float {
        0.5 * (-3.0 * u * u * u + 4.0 * u * u + u)
    }

    #[inline]
    fn w3(u: Float) -> Float {
        0.5 * (u * u * u - u * u)
    }
}

/// Mapped tap positions and kernel weights along one axis.
struct CubicAxis {
    taps: [Int; 4],
    weights: [Float; 4],
}

impl CubicAxis {
    #[inline]
    fn new<W: CubicWeights>(coord: Float, size: usize, mode: AddressMode) -> Self {
        let (base, u) = texel_space(coord, size);
        Self {
            taps: [base - 1, base, base + 1, base + 2].map(|i| mode.map(i, size)),
            weights: W::weights(u),
        }
    }

    #[inline]
    fn blend(&self, s: [Spectrum; 4]) -> Spectrum {
        let w = self.weights;
        w[0] * s[0] + w[1] * s[1] + w[2] * s[2] + w[3] * s[3]
    }

    /// Linear indices of the four taps in the row starting at `row_offset`.
    #[inline]
    fn row(&self, row_offset: usize) -> i32x4 {
        i32x4::new(self.taps.map(|x| row_offset as Int + x))
    }
}

pub fn cubic1d<W: CubicWeights, T: Texel>(tex: &Texture1D<T>, coord: Float) -> Spectrum {
    let [w] = tex.size();
    let [mode] = tex.address_modes();
    let x = CubicAxis::new::<W>(coord, w, mode);

    x.blend(T::fetch_row(tex.texels(), x.row(0)))
}

pub fn cubic2d<W: CubicWeights, T: Texel>(tex: &Texture2D<T>, coord: Vector2f) -> Spectrum {
    let [w, h] = tex.size();
    let [mode_x, mode_y] = tex.address_modes();
    let x = CubicAxis::new::<W>(coord.x, w, mode_x);
    let y = CubicAxis::new::<W>(coord.y, h, mode_y);

    let rows = y.taps.map(|ty| x.blend(T::fetch_row(tex.texels(), x.row(ty as usize * w))));
    y.blend(rows)
}

pub fn cubic3d<W: CubicWeights, T: Texel>(tex: &Texture3D<T>, coord: Vector3f) -> Spectrum {
    let [w, h, d] = tex.size();
    let [mode_x, mode_y, mode_z] = tex.address_modes();
    let x = CubicAxis::new::<W>(coord.x, w, mode_x);
    let y = CubicAxis::new::<W>(coord.y, h, mode_y);
    let z = CubicAxis::new::<W>(coord.z, d, mode_z);

    let slices = z.taps.map(|tz| {
        let rows = y.taps.map(|ty| {
            let offset = (tz as usize * h + ty as usize) * w;
            x.blend(T::fetch_row(tex.texels(), x.row(offset)))
        });
        y.blend(rows)
    });
    z.blend(slices)
}
