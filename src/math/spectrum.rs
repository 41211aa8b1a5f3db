// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector4f};

use std::ops;

/// RGBA color. Products are component-wise, so `white()` is the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spectrum {
    rgba: Vector4f
}

impl Default for Spectrum {
    fn default() -> Self {
        Self { rgba: Vector4f::zeros() }
    }
}

impl Spectrum {
    pub fn new(r: Float, g: Float, b: Float, a: Float) -> Self {
        Self { rgba: Vector4f::new(r, g, b, a) }
    }

    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn white() -> Self {
        Self::splat(1.0)
    }

    pub fn from_vector(rgba: Vector4f) -> Self {
        Self { rgba }
    }

    pub fn as_vector(&self) -> Vector4f {
        self.rgba
    }

    pub fn is_black(&self) -> bool {
        self.rgba.x == 0.0 && self.rgba.y == 0.0 && self.rgba.z == 0.0
    }
}

impl ops::Index<usize> for Spectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgba[index]
    }
}

impl ops::Add for Spectrum {
    type Output = Spectrum;

    fn add(self, rhs: Spectrum) -> Spectrum {
        Spectrum { rgba: self.rgba + rhs.rgba }
    }
}

impl ops::AddAssign for Spectrum {
    fn add_assign(&mut self, rhs: Spectrum) {
        self.rgba += rhs.rgba;
    }
}

impl ops::Mul for Spectrum {
    type Output = Spectrum;

    fn mul(self, rhs: Spectrum) -> Spectrum {
        Spectrum { rgba: self.rgba.component_mul(&rhs.rgba) }
    }
}

impl ops::Mul<Float> for Spectrum {
    type Output = Spectrum;

    fn mul(self, rhs: Float) -> Spectrum {
        Spectrum { rgba: self.rgba * rhs }
    }
}

impl ops::Mul<Spectrum> for Float {
    type Output = Spectrum;

    fn mul(self, rhs: Spectrum) -> Spectrum {
        rhs * self
    }
}
