// Copyright @yucwang 2026

//! Lane types for 4- and 8-wide packets.
//!
//! Structured values are kept structure-of-arrays: a `Vec4x8` holds the x
//! components of eight vectors in one register, then the y components, and
//! so on.

use super::constants::{Float, Int, Vector4f};

pub use wide::{f32x4, f32x8, i32x4, i32x8};

/// Split a lane-group value into its per-lane scalars.
pub trait Lanes<const N: usize> {
    type Lane;

    fn lanes(self) -> [Self::Lane; N];
}

impl Lanes<4> for f32x4 {
    type Lane = Float;

    fn lanes(self) -> [Float; 4] {
        self.to_array()
    }
}

impl Lanes<8> for f32x8 {
    type Lane = Float;

    fn lanes(self) -> [Float; 8] {
        self.to_array()
    }
}

impl Lanes<4> for i32x4 {
    type Lane = Int;

    fn lanes(self) -> [Int; 4] {
        self.to_array()
    }
}

impl Lanes<8> for i32x8 {
    type Lane = Int;

    fn lanes(self) -> [Int; 8] {
        self.to_array()
    }
}

macro_rules! vec4_lanes {
    ($name:ident, $float:ident, $n:expr) => {
        #[derive(Clone, Copy, Debug)]
        pub struct $name {
            pub x: $float,
            pub y: $float,
            pub z: $float,
            pub w: $float,
        }

        impl $name {
            pub fn new(x: [Float; $n], y: [Float; $n], z: [Float; $n], w: [Float; $n]) -> Self {
                Self {
                    x: $float::new(x),
                    y: $float::new(y),
                    z: $float::new(z),
                    w: $float::new(w),
                }
            }

            pub fn from_vecs(v: [Vector4f; $n]) -> Self {
                Self::new(v.map(|v| v.x), v.map(|v| v.y), v.map(|v| v.z), v.map(|v| v.w))
            }

            pub fn splat(v: Vector4f) -> Self {
                Self {
                    x: $float::splat(v.x),
                    y: $float::splat(v.y),
                    z: $float::splat(v.z),
                    w: $float::splat(v.w),
                }
            }

            pub fn lane(&self, i: usize) -> Vector4f {
                Vector4f::new(
                    self.x.to_array()[i],
                    self.y.to_array()[i],
                    self.z.to_array()[i],
                    self.w.to_array()[i],
                )
            }
        }

        impl Lanes<$n> for $name {
            type Lane = Vector4f;

            fn lanes(self) -> [Vector4f; $n] {
                let (x, y, z, w) = (
                    self.x.to_array(),
                    self.y.to_array(),
                    self.z.to_array(),
                    self.w.to_array(),
                );
                std::array::from_fn(|i| Vector4f::new(x[i], y[i], z[i], w[i]))
            }
        }
    };
}

vec4_lanes!(Vec4x4, f32x4, 4);
vec4_lanes!(Vec4x8, f32x8, 8);
