// Copyright @yucwang 2021

pub mod binding;
pub mod bvh;
pub mod get_surface;
pub mod hit_record;
pub mod instance;
pub mod primitive;
pub mod scene_params;
pub mod shape;
pub mod surface;
pub mod surface_config;
pub mod texture;
