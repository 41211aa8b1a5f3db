// Copyright @yucwang 2026

use crate::math::unorm::{Rgba8, Unorm8};
use crate::textures::texture::Texture2D;

use image::io::Reader as ImageReader;
use std::path::Path;

/// Texture formats the loaders understand, by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFileKind {
    Exr,
    Ldr,
}

impl TextureFileKind {
    pub fn from_path(path: &str) -> std::result::Result<Self, String> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "exr" => Ok(TextureFileKind::Exr),
            "jpg" | "jpeg" | "png" => Ok(TextureFileKind::Ldr),
            _ => Err(format!("unsupported texture format: {}", ext)),
        }
    }
}

/// Load a PNG or JPEG image as 8-bit RGBA texels. Values are kept as
/// stored (no sRGB decode) and rows are flipped so that texel row 0 is the
/// bottom of the image.
pub fn load_rgba8(path: &str) -> std::result::Result<Texture2D<Rgba8>, String> {
    let img = ImageReader::open(path)
        .map_err(|e| format!("failed to open image {}: {}", path, e))?
        .decode()
        .map_err(|e| format!("failed to decode image {}: {}", path, e))?
        .to_rgba8();

    let (width, height) = img.dimensions();
    let (width, height) = (width as usize, height as usize);
    let mut texels: Vec<Rgba8> = Vec::with_capacity(width * height);
    for y in (0..height).rev() {
        for x in 0..width {
            let p = img.get_pixel(x as u32, y as u32);
            texels.push(p.0.map(Unorm8));
        }
    }

    log::info!("Loaded image texture {} ({}x{}).", path, width, height);
    Texture2D::new(texels, [width, height])
}
