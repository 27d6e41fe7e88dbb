use tiny_skia::Pixmap;

use super::canvas::fill_from_fn;
use super::color::Hsl;

pub fn paint_plane(canvas: &mut Pixmap, hue: f32) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;

    fill_from_fn(canvas, |x, y| {
        let s = x as f32 / width * 100.;
        let l = 100. - y as f32 / height * 100.;
        Hsl::new(hue, s, l).to_rgb()
    });
}
