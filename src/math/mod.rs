// Copyright 2020 @TwoCookingMice

pub mod aabb;
pub mod constants;
pub mod gather;
pub mod ray;
pub mod simd;
pub mod spectrum;
pub mod transform;
pub mod unorm;
