use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgb as ImageRgb, RgbImage};
use tiny_skia::Pixmap;

use super::color::Rgb;
use super::error::VizError;

pub fn new_canvas(width: u32, height: u32) -> Result<Pixmap, VizError> {
    Pixmap::new(width, height).ok_or(VizError::CanvasError { width, height })
}

pub fn fill_from_fn(canvas: &mut Pixmap, mut f: impl FnMut(u32, u32) -> Rgb) {
    let width = canvas.width() as usize;
    for (i, px) in canvas.data_mut().chunks_exact_mut(4).enumerate() {
        let Rgb { red, green, blue } = f((i % width) as u32, (i / width) as u32);
        px.copy_from_slice(&[red, green, blue, 255]);
    }
}

pub fn pixel_rgba(canvas: &Pixmap, x: u32, y: u32) -> Option<[u8; 4]> {
    let c = canvas.pixel(x, y)?.demultiply();
    Some([c.red(), c.green(), c.blue(), c.alpha()])
}

pub fn to_rgb8(canvas: &Pixmap) -> RgbImage {
    ImageBuffer::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b, _] = pixel_rgba(canvas, x, y).unwrap_or_default();
        ImageRgb([r, g, b])
    })
}

// Alpha is dropped; canvases are opaque once the plane is painted.
pub fn save_canvas(canvas: &Pixmap, path: impl AsRef<Path>) -> Result<(), VizError> {
    DynamicImage::ImageRgb8(to_rgb8(canvas)).save(path)?;
    Ok(())
}
