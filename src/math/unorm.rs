// Copyright @yucwang 2026

//! Fixed-point texel channels. A `BITS`-wide raw value `r` decodes to
//! `r / (2^BITS - 1)`.

use super::constants::Float;

pub trait Unorm: Copy + Send + Sync {
    const BITS: u32;

    fn to_float(self) -> Float;
    fn from_float(v: Float) -> Self;
}

macro_rules! unorm_type {
    ($name:ident, $raw:ty, $bits:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $raw);

        impl $name {
            pub const MAX: $raw = <$raw>::MAX;

            pub fn raw(self) -> $raw {
                self.0
            }
        }

        impl Unorm for $name {
            const BITS: u32 = $bits;

            #[inline]
            fn to_float(self) -> Float {
                (self.0 as f64 / Self::MAX as f64) as Float
            }

            fn from_float(v: Float) -> Self {
                let v = (v as f64).clamp(0.0, 1.0);
                $name((v * Self::MAX as f64).round() as $raw)
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for Float {
            fn from(v: $name) -> Float {
                v.to_float()
            }
        }
    };
}

unorm_type!(Unorm8, u8, 8);
unorm_type!(Unorm16, u16, 16);
unorm_type!(Unorm32, u32, 32);

/// 8-bit RGBA texel, the storage format of LDR image textures.
pub type Rgba8 = [Unorm8; 4];
