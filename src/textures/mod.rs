// Copyright @yucwang 2026

pub mod cubic;
pub mod image;
pub mod linear;
pub mod point;
pub mod texture;

use crate::math::constants::{Float, Int};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
    CubicBSpline,
    CatmullRom,
}

impl FilterMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nearest" => Some(FilterMode::Nearest),
            "linear" | "bilinear" => Some(FilterMode::Linear),
            "bspline" | "cubic" => Some(FilterMode::CubicBSpline),
            "catmull_rom" => Some(FilterMode::CatmullRom),
            _ => None,
        }
    }
}

/// How an integer texel coordinate outside `[0, size)` is brought back in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
}

impl AddressMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wrap" | "repeat" => Some(AddressMode::Wrap),
            "mirror" => Some(AddressMode::Mirror),
            "clamp" => Some(AddressMode::Clamp),
            _ => None,
        }
    }

    /// Texel indices are `i64` so that neighbour taps of a far-away
    /// coordinate cannot overflow; the result always fits `Int`.
    #[inline]
    pub fn map(self, idx: i64, size: usize) -> Int {
        let n = size as i64;
        let i = match self {
            AddressMode::Wrap => idx.rem_euclid(n),
            AddressMode::Clamp => idx.clamp(0, n - 1),
            AddressMode::Mirror => {
                // Period 2n, edge texels repeated: ... 1 0 | 0 1 .. n-1 | n-1 ...
                let i = idx.rem_euclid(2 * n);
                if i >= n { 2 * n - 1 - i } else { i }
            }
        };
        i as Int
    }
}

// Far beyond any texture size, small enough that a few taps past it stay
// inside i64.
const TEXEL_LIMIT: Float = (1u64 << 60) as Float;

/// `floor` of a texel-space position as an integer texel index.
#[inline]
pub(crate) fn texel_floor(t: Float) -> i64 {
    t.clamp(-TEXEL_LIMIT, TEXEL_LIMIT).floor() as i64
}

/// Continuous texel-space position of a normalized coordinate, split into
/// the texel just below it and the fractional offset from that texel's
/// center.
#[inline]
pub(crate) fn texel_space(coord: Float, size: usize) -> (i64, Float) {
    let t = (coord * size as Float - 0.5).clamp(-TEXEL_LIMIT, TEXEL_LIMIT);
    let base = t.floor();
    (base as i64, t - base)
}
