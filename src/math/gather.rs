// Copyright @yucwang 2026

//! Gather: fetch one element per lane from a flat array at per-lane indices.
//!
//! The index type selects the lane width (`usize` for one lane, `i32x4`,
//! `i32x8`), the element type selects the result encoding. Fixed-point
//! elements are decoded to floating point during the fetch, structured
//! elements are fetched with one gather per component.
//!
//! Indices are not validated beyond the slice bounds check; every lane must
//! hold a valid index.

use super::constants::{Float, Int, Vector4f};
use super::simd::{f32x4, f32x8, i32x4, i32x8, Lanes, Vec4x4, Vec4x8};
use super::spectrum::Spectrum;
use super::unorm::{Unorm, Unorm16, Unorm32, Unorm8};

pub trait Gather<I>: Sized {
    type Output;

    fn gather(base: &[Self], index: I) -> Self::Output;
}

#[inline]
pub fn gather<T: Gather<I>, I>(base: &[T], index: I) -> T::Output {
    T::gather(base, index)
}

#[inline]
fn indices4(index: i32x4) -> [usize; 4] {
    index.to_array().map(|i| i as usize)
}

#[inline]
fn indices8(index: i32x8) -> [usize; 8] {
    index.to_array().map(|i| i as usize)
}

impl Gather<usize> for Float {
    type Output = Float;

    #[inline]
    fn gather(base: &[Float], index: usize) -> Float {
        base[index]
    }
}

impl Gather<i32x4> for Float {
    type Output = f32x4;

    #[inline]
    fn gather(base: &[Float], index: i32x4) -> f32x4 {
        f32x4::new(indices4(index).map(|i| base[i]))
    }
}

impl Gather<i32x8> for Float {
    type Output = f32x8;

    #[inline]
    fn gather(base: &[Float], index: i32x8) -> f32x8 {
        f32x8::new(indices8(index).map(|i| base[i]))
    }
}

impl Gather<usize> for Int {
    type Output = Int;

    #[inline]
    fn gather(base: &[Int], index: usize) -> Int {
        base[index]
    }
}

impl Gather<i32x4> for Int {
    type Output = i32x4;

    #[inline]
    fn gather(base: &[Int], index: i32x4) -> i32x4 {
        i32x4::new(indices4(index).map(|i| base[i]))
    }
}

impl Gather<i32x8> for Int {
    type Output = i32x8;

    #[inline]
    fn gather(base: &[Int], index: i32x8) -> i32x8 {
        i32x8::new(indices8(index).map(|i| base[i]))
    }
}

macro_rules! gather_unorm {
    ($t:ty) => {
        impl Gather<usize> for $t {
            type Output = Float;

            #[inline]
            fn gather(base: &[$t], index: usize) -> Float {
                base[index].to_float()
            }
        }

        impl Gather<i32x4> for $t {
            type Output = f32x4;

            #[inline]
            fn gather(base: &[$t], index: i32x4) -> f32x4 {
                // Raw fetch first, decode once all lanes are in.
                let raw = indices4(index).map(|i| base[i]);
                f32x4::new(raw.map(|v| v.to_float()))
            }
        }

        impl Gather<i32x8> for $t {
            type Output = f32x8;

            #[inline]
            fn gather(base: &[$t], index: i32x8) -> f32x8 {
                let raw = indices8(index).map(|i| base[i]);
                f32x8::new(raw.map(|v| v.to_float()))
            }
        }
    };
}

gather_unorm!(Unorm8);
gather_unorm!(Unorm16);
gather_unorm!(Unorm32);

impl Gather<usize> for Vector4f {
    type Output = Vector4f;

    #[inline]
    fn gather(base: &[Vector4f], index: usize) -> Vector4f {
        base[index]
    }
}

impl Gather<i32x4> for Vector4f {
    type Output = Vec4x4;

    #[inline]
    fn gather(base: &[Vector4f], index: i32x4) -> Vec4x4 {
        let idx = indices4(index);
        Vec4x4 {
            x: f32x4::new(idx.map(|i| base[i].x)),
            y: f32x4::new(idx.map(|i| base[i].y)),
            z: f32x4::new(idx.map(|i| base[i].z)),
            w: f32x4::new(idx.map(|i| base[i].w)),
        }
    }
}

impl Gather<i32x8> for Vector4f {
    type Output = Vec4x8;

    #[inline]
    fn gather(base: &[Vector4f], index: i32x8) -> Vec4x8 {
        let idx = indices8(index);
        Vec4x8 {
            x: f32x8::new(idx.map(|i| base[i].x)),
            y: f32x8::new(idx.map(|i| base[i].y)),
            z: f32x8::new(idx.map(|i| base[i].z)),
            w: f32x8::new(idx.map(|i| base[i].w)),
        }
    }
}

impl Gather<usize> for Spectrum {
    type Output = Vector4f;

    #[inline]
    fn gather(base: &[Spectrum], index: usize) -> Vector4f {
        base[index].as_vector()
    }
}

impl Gather<i32x4> for Spectrum {
    type Output = Vec4x4;

    #[inline]
    fn gather(base: &[Spectrum], index: i32x4) -> Vec4x4 {
        Vec4x4::from_vecs(indices4(index).map(|i| base[i].as_vector()))
    }
}

impl Gather<i32x8> for Spectrum {
    type Output = Vec4x8;

    #[inline]
    fn gather(base: &[Spectrum], index: i32x8) -> Vec4x8 {
        Vec4x8::from_vecs(indices8(index).map(|i| base[i].as_vector()))
    }
}

impl<U: Unorm> Gather<usize> for [U; 4] {
    type Output = Vector4f;

    #[inline]
    fn gather(base: &[[U; 4]], index: usize) -> Vector4f {
        let t = base[index];
        Vector4f::new(t[0].to_float(), t[1].to_float(), t[2].to_float(), t[3].to_float())
    }
}

impl<U: Unorm> Gather<i32x4> for [U; 4] {
    type Output = Vec4x4;

    #[inline]
    fn gather(base: &[[U; 4]], index: i32x4) -> Vec4x4 {
        let idx = indices4(index);
        let component = |c: usize| f32x4::new(idx.map(|i| base[i][c].to_float()));
        Vec4x4 { x: component(0), y: component(1), z: component(2), w: component(3) }
    }
}

impl<U: Unorm> Gather<i32x8> for [U; 4] {
    type Output = Vec4x8;

    #[inline]
    fn gather(base: &[[U; 4]], index: i32x8) -> Vec4x8 {
        let idx = indices8(index);
        let component = |c: usize| f32x8::new(idx.map(|i| base[i][c].to_float()));
        Vec4x8 { x: component(0), y: component(1), z: component(2), w: component(3) }
    }
}

/// Gather for an arbitrary lane count: runs as many 8-wide gathers as fit
/// and fetches the remaining lanes one at a time.
pub fn gather_lanes<T, const N: usize>(base: &[T], index: [Int; N]) -> [<T as Gather<usize>>::Output; N]
where
    T: Gather<usize> + Gather<i32x8>,
    <T as Gather<usize>>::Output: Copy + Default,
    <T as Gather<i32x8>>::Output: Lanes<8, Lane = <T as Gather<usize>>::Output>,
{
    let mut out = [<<T as Gather<usize>>::Output as Default>::default(); N];
    let full = N / 8 * 8;

    for start in (0..full).step_by(8) {
        let mut lanes = [0; 8];
        lanes.copy_from_slice(&index[start..start + 8]);
        let values = <T as Gather<i32x8>>::gather(base, i32x8::new(lanes)).lanes();
        out[start..start + 8].copy_from_slice(&values);
    }

    for lane in full..N {
        out[lane] = <T as Gather<usize>>::gather(base, index[lane] as usize);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_unorm<U>(make: fn(usize) -> U)
    where
        U: Unorm + Gather<i32x4, Output = f32x4> + Gather<i32x8, Output = f32x8>,
    {
        let arr: Vec<U> = (0..16).map(make).collect();

        let res4: f32x4 = gather(&arr, i32x4::new([0, 2, 4, 6]));
        let res4 = res4.to_array();
        for (k, i) in [0usize, 2, 4, 6].iter().enumerate() {
            assert_eq!(res4[k], arr[*i].to_float());
        }

        let res8: f32x8 = gather(&arr, i32x8::new([0, 2, 4, 6, 8, 10, 12, 14]));
        let res8 = res8.to_array();
        for k in 0..8 {
            assert_eq!(res8[k], arr[2 * k].to_float());
        }
    }

    #[test]
    fn test_gather_unorm() {
        check_unorm::<Unorm8>(|i| Unorm8(i as u8));
        check_unorm::<Unorm16>(|i| Unorm16(i as u16));
        check_unorm::<Unorm32>(|i| Unorm32(i as u32));
    }

    #[test]
    fn test_gather_float() {
        let arr: Vec<Float> = (0..16).map(|i| i as Float).collect();

        let res4 = gather(&arr, i32x4::new([0, 2, 4, 6])).to_array();
        assert_eq!(res4, [0.0, 2.0, 4.0, 6.0]);

        let res8 = gather(&arr, i32x8::new([0, 2, 4, 6, 8, 10, 12, 14])).to_array();
        assert_eq!(res8, [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);

        assert_eq!(gather(&arr, 5usize), 5.0);
    }

    #[test]
    fn test_gather_int() {
        let arr: Vec<Int> = (0..16).collect();

        let res4 = gather(&arr, i32x4::new([0, 2, 4, 6])).to_array();
        assert_eq!(res4, [0, 2, 4, 6]);

        let res8 = gather(&arr, i32x8::new([14, 12, 10, 8, 6, 4, 2, 0])).to_array();
        assert_eq!(res8, [14, 12, 10, 8, 6, 4, 2, 0]);
    }

    #[test]
    fn test_gather_vec4() {
        let arr: Vec<Vector4f> = (0..16)
            .map(|i| {
                let i = i as Float;
                Vector4f::new(i * 4.0, i * 4.0 + 1.0, i * 4.0 + 2.0, i * 4.0 + 3.0)
            })
            .collect();

        let res4 = gather(&arr, i32x4::new([0, 2, 4, 6]));
        assert_eq!(res4.lane(0), Vector4f::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(res4.lane(1), Vector4f::new(8.0, 9.0, 10.0, 11.0));
        assert_eq!(res4.lane(2), Vector4f::new(16.0, 17.0, 18.0, 19.0));
        assert_eq!(res4.lane(3), Vector4f::new(24.0, 25.0, 26.0, 27.0));

        let res8 = gather(&arr, i32x8::new([0, 2, 4, 6, 8, 10, 12, 14])).lanes();
        for (k, v) in res8.iter().enumerate() {
            let base = (k * 8) as Float;
            assert_eq!(*v, Vector4f::new(base, base + 1.0, base + 2.0, base + 3.0));
        }
    }

    #[test]
    fn test_gather_spectrum() {
        let arr: Vec<Spectrum> = (0..8).map(|i| Spectrum::new(i as Float, 0.5, 1.0 - i as Float, 1.0)).collect();

        let res4 = gather(&arr, i32x4::new([6, 1, 1, 0]));
        assert_eq!(res4.x.to_array(), [6.0, 1.0, 1.0, 0.0]);
        assert_eq!(res4.lane(0), arr[6].as_vector());

        let res8 = gather(&arr, i32x8::new([7, 6, 5, 4, 3, 2, 1, 0])).lanes();
        for (k, v) in res8.iter().enumerate() {
            assert_eq!(*v, arr[7 - k].as_vector());
        }
    }

    #[test]
    fn test_gather_rgba8_componentwise() {
        let arr: Vec<[Unorm8; 4]> = (0..8u8)
            .map(|i| [Unorm8(i), Unorm8(i + 10), Unorm8(i + 20), Unorm8(255)])
            .collect();

        let res = gather(&arr, i32x4::new([7, 0, 3, 3]));
        for (k, i) in [7usize, 0, 3, 3].iter().enumerate() {
            let expected = <[Unorm8; 4] as Gather<usize>>::gather(&arr, *i);
            assert_eq!(res.lane(k), expected);
        }
        assert_eq!(res.lane(0).w, 1.0);
    }

    #[test]
    fn test_gather_lanes_decomposes_wide_widths() {
        let arr: Vec<Float> = (0..32).map(|i| (i * i) as Float).collect();
        let mut index = [0 as Int; 19];
        for (k, i) in index.iter_mut().enumerate() {
            *i = (31 - k) as Int;
        }

        let res = gather_lanes(&arr, index);
        for k in 0..19 {
            assert_eq!(res[k], arr[index[k] as usize]);
        }
    }
}
