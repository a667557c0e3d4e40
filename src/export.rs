//! PNG export of a rendered color buffer.

use std::path::Path;

use image::{ImageError, Rgba, RgbaImage};
use log::info;

use crate::colors::argb_to_rgba;
use crate::render::Renderer;

/// Copies the renderer's ARGB8888 buffer into an RGBA image.
pub fn to_rgba_image(renderer: &Renderer) -> RgbaImage {
    let width = renderer.width();
    let buffer = renderer.color_buffer();
    RgbaImage::from_fn(width, renderer.height(), |x, y| {
        Rgba(argb_to_rgba(buffer[(y * width + x) as usize]))
    })
}

pub fn save_png<P: AsRef<Path>>(renderer: &Renderer, path: P) -> Result<(), ImageError> {
    let path = path.as_ref();
    to_rgba_image(renderer).save_with_format(path, image::ImageFormat::Png)?;
    info!(
        "wrote {}x{} image to {}",
        renderer.width(),
        renderer.height(),
        path.display()
    );
    Ok(())
}
