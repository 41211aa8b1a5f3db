/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Vector4f;
use crate::math::spectrum::Spectrum;
use crate::textures::texture::Texture2D;

use exr::prelude::*;

struct RgbaPixels {
    width: usize,
    height: usize,
    texels: Vec<Vector4f>,
}

/// Read the first RGBA layer of an OpenEXR file as a floating point texture.
/// Rows are flipped so that texel row 0 is the bottom of the image.
pub fn read_exr_texture(file_path: &str) -> std::result::Result<Texture2D<Vector4f>, String> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| {
                let width = resolution.width();
                let height = resolution.height();
                RgbaPixels { width, height, texels: vec![Vector4f::zeros(); width * height] }
            },
            |pixels: &mut RgbaPixels, position, (r, g, b, a): (f32, f32, f32, f32)| {
                let row = pixels.height - 1 - position.y();
                pixels.texels[row * pixels.width + position.x()] = Vector4f::new(r, g, b, a);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(file_path)
        .map_err(|e| format!("failed to read exr {}: {}", file_path, e))?;

    let pixels = image.layer_data.channel_data.pixels;
    log::info!("OpenEXR loaded, width = {}, height = {}.", pixels.width, pixels.height);
    Texture2D::new(pixels.texels, [pixels.width, pixels.height])
}

/// Write `width * height` colors, stored top row first, to an RGBA EXR file.
pub fn write_exr_to_file(image: &[Spectrum],
                         width: usize,
                         height: usize,
                         file_path: &str) -> std::result::Result<(), String> {
    log::info!("Starting writing openexr images: {}.", file_path);
    if image.len() != width * height {
        return Err(format!("expected {} pixels, got {}", width * height, image.len()));
    }

    write_rgba_file(file_path, width, height, |x, y| {
        let c = image[y * width + x];
        (c[0], c[1], c[2], c[3])
    })
    .map_err(|e| format!("failed to write exr {}: {}", file_path, e))?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
