// Copyright @yucwang 2026

use crate::core::texture::{Texel, TextureSampler};
use crate::math::constants::{Float, Int, Vector2f, Vector3f};
use crate::math::spectrum::Spectrum;
use crate::textures::cubic::{cubic1d, cubic2d, cubic3d, BSpline, CatmullRom};
use crate::textures::linear::linear;
use crate::textures::point::nearest;
use crate::textures::{AddressMode, FilterMode};

/// Immutable `D`-dimensional texel array. Texels are stored with x fastest:
/// the texel at `(x, y, z)` lives at `x + w * (y + h * z)`.
///
/// Sampling coordinates are normalized; `[0, 1]` spans the whole texture
/// and texel `i` is centered at `(i + 0.5) / size`.
#[derive(Clone, Debug)]
pub struct Texture<T, const D: usize> {
    texels: Vec<T>,
    size: [usize; D],
    address_modes: [AddressMode; D],
    filter_mode: FilterMode,
}

pub type Texture1D<T> = Texture<T, 1>;
pub type Texture2D<T> = Texture<T, 2>;
pub type Texture3D<T> = Texture<T, 3>;

impl<T: Texel, const D: usize> Texture<T, D> {
    pub fn new(texels: Vec<T>, size: [usize; D]) -> Result<Self, String> {
        if size.iter().any(|s| *s == 0 || *s > Int::MAX as usize) {
            return Err(format!("invalid texture size {:?}", size));
        }
        let expected: usize = size.iter().product();
        if texels.len() != expected {
            return Err(format!("texture of size {:?} needs {} texels, got {}",
                               size, expected, texels.len()));
        }

        Ok(Self {
            texels,
            size,
            address_modes: [AddressMode::Wrap; D],
            filter_mode: FilterMode::Linear,
        })
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    pub fn with_address_mode(mut self, address_mode: AddressMode) -> Self {
        self.address_modes = [address_mode; D];
        self
    }

    pub fn with_address_modes(mut self, address_modes: [AddressMode; D]) -> Self {
        self.address_modes = address_modes;
        self
    }
}

impl<T, const D: usize> Texture<T, D> {
    pub fn texels(&self) -> &[T] {
        &self.texels
    }

    pub fn size(&self) -> [usize; D] {
        self.size
    }

    pub fn address_modes(&self) -> [AddressMode; D] {
        self.address_modes
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// Linear index of an in-range texel coordinate.
    #[inline]
    pub fn linear_index(&self, coord: [Int; D]) -> usize {
        let mut index = 0usize;
        for axis in (0..D).rev() {
            index = index * self.size[axis] + coord[axis] as usize;
        }
        index
    }
}

impl<T: Texel> TextureSampler for Texture1D<T> {
    type Coord = Float;

    const DIMENSIONS: usize = 1;

    fn sample(&self, coord: Float) -> Spectrum {
        match self.filter_mode {
            FilterMode::Nearest => nearest(self, [coord]),
            FilterMode::Linear => linear(self, [coord]),
            FilterMode::CubicBSpline => cubic1d::<BSpline, T>(self, coord),
            FilterMode::CatmullRom => cubic1d::<CatmullRom, T>(self, coord),
        }
    }
}

impl<T: Texel> TextureSampler for Texture2D<T> {
    type Coord = Vector2f;

    const DIMENSIONS: usize = 2;

    fn sample(&self, coord: Vector2f) -> Spectrum {
        match self.filter_mode {
            FilterMode::Nearest => nearest(self, [coord.x, coord.y]),
            FilterMode::Linear => linear(self, [coord.x, coord.y]),
            FilterMode::CubicBSpline => cubic2d::<BSpline, T>(self, coord),
            FilterMode::CatmullRom => cubic2d::<CatmullRom, T>(self, coord),
        }
    }
}

impl<T: Texel> TextureSampler for Texture3D<T> {
    type Coord = Vector3f;

    const DIMENSIONS: usize = 3;

    fn sample(&self, coord: Vector3f) -> Spectrum {
        match self.filter_mode {
            FilterMode::Nearest => nearest(self, [coord.x, coord.y, coord.z]),
            FilterMode::Linear => linear(self, [coord.x, coord.y, coord.z]),
            FilterMode::CubicBSpline => cubic3d::<BSpline, T>(self, coord),
            FilterMode::CatmullRom => cubic3d::<CatmullRom, T>(self, coord),
        }
    }
}
