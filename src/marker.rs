use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use super::bounds::Bounds;
use super::color::Hsl;
use super::font::*;
use super::layout::Stop;

pub const MARKER_RADIUS: f32 = 6.;
pub const MARKER_OUTLINE: f32 = 2.;
pub const LABEL_OFFSET: f32 = 12.;
pub const LABEL_PAD_X: f32 = 8.;
pub const LABEL_PAD_Y: f32 = 4.;
pub const LABEL_RADIUS: f32 = 6.;
const EDGE_MARGIN: f32 = 30.;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub align: TextAlign,
    pub text_x: f32,
    pub text_y: f32,
    pub background: Bounds,
}

// Labels are not checked against each other.
pub fn place_label(x: f32, y: f32, text_width: f32, canvas_width: f32, size: f32) -> LabelPlacement {
    let (align, text_x) = if x + text_width + EDGE_MARGIN > canvas_width {
        (TextAlign::Right, x - LABEL_OFFSET)
    } else {
        (TextAlign::Left, x + LABEL_OFFSET)
    };

    let bg_x = match align {
        TextAlign::Left => text_x - LABEL_PAD_X,
        TextAlign::Right => text_x - text_width - LABEL_PAD_X,
    };

    LabelPlacement {
        align,
        text_x,
        text_y: y,
        background: Bounds::from_xywh(
            bg_x,
            y - LABEL_PAD_Y - size / 2.,
            text_width + 2. * LABEL_PAD_X,
            size + 2. * LABEL_PAD_Y,
        ),
    }
}

pub fn label_colors(hsl: Hsl) -> (Color, Color) {
    if hsl.l > 50. {
        (Color::from_rgba8(0, 0, 0, 153), Color::WHITE)
    } else {
        (Color::from_rgba8(255, 255, 255, 153), Color::BLACK)
    }
}

pub fn round_rect(rect: Bounds, r: f32) -> Option<Path> {
    let Bounds { x_min: x0, x_max: x1, y_min: y0, y_max: y1 } = rect;

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.quad_to(x1, y0, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.quad_to(x1, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.quad_to(x0, y1, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.quad_to(x0, y0, x0 + r, y0);
    pb.close();
    pb.finish()
}

pub fn draw_marker(canvas: &mut Pixmap, stop: &Stop) {
    let Some(circle) = PathBuilder::from_circle(stop.x, stop.y, MARKER_RADIUS) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(stop.hsl.to_sk_color());
    canvas.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);

    paint.set_color_rgba8(0x11, 0x11, 0x11, 255);
    let stroke = Stroke { width: MARKER_OUTLINE, ..Stroke::default() };
    canvas.stroke_path(&circle, &paint, &stroke, Transform::identity(), None);
}

pub fn draw_label(canvas: &mut Pixmap, stop: &Stop, size: f32) {
    let width = text_width(&stop.id, size);
    let label = place_label(stop.x, stop.y, width, canvas.width() as f32, size);
    let (background, foreground) = label_colors(stop.hsl);

    if let Some(path) = round_rect(label.background, LABEL_RADIUS) {
        let mut paint = Paint::default();
        paint.set_color(background);
        canvas.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    draw_text(canvas, &stop.id, label.text_x, label.text_y, size, label.align, foreground);
}

pub fn draw_markers(canvas: &mut Pixmap, stops: &[Stop], label_size: f32) {
    for stop in stops {
        draw_marker(canvas, stop);
        draw_label(canvas, stop, label_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::*;

    fn stop(id: &str, hex: &str, x: f32, y: f32) -> Stop {
        Stop {
            id: id.into(),
            hex: hex.into(),
            hsl: crate::color::hex_to_hsl(hex).unwrap(),
            x,
            y,
        }
    }

    #[test]
    fn label_sits_right_of_marker_near_left_edge() {
        let label = place_label(20., 100., 25.5, 480., 12.);
        assert_eq!(label.align, TextAlign::Left);
        assert_eq!(label.text_x, 32.);
        assert_eq!(label.background, Bounds::from_xywh(24., 90., 41.5, 20.));
    }

    #[test]
    fn label_flips_left_near_right_edge() {
        let label = place_label(460., 100., 25.5, 480., 12.);
        assert_eq!(label.align, TextAlign::Right);
        assert_eq!(label.text_x, 448.);
        assert_eq!(label.background, Bounds::from_xywh(414.5, 90., 41.5, 20.));
    }

    #[test]
    fn flips_exactly_past_the_margin() {
        // 424.5 + 25.5 + 30 == 480 still fits
        assert_eq!(place_label(424.5, 0., 25.5, 480., 12.).align, TextAlign::Left);
        assert_eq!(place_label(425., 0., 25.5, 480., 12.).align, TextAlign::Right);
    }

    #[test]
    fn light_colors_get_dark_labels() {
        let (bg, fg) = label_colors(Hsl::new(0., 0., 90.));
        assert_eq!(bg, Color::from_rgba8(0, 0, 0, 153));
        assert_eq!(fg, Color::WHITE);

        let (bg, fg) = label_colors(Hsl::new(0., 0., 50.));
        assert_eq!(bg, Color::from_rgba8(255, 255, 255, 153));
        assert_eq!(fg, Color::BLACK);
    }

    #[test]
    fn round_rect_stays_inside_its_box() {
        let rect = Bounds::from_xywh(10., 20., 40., 20.);
        let path = round_rect(rect, 6.).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (10., 20., 50., 40.));
    }

    #[test]
    fn marker_is_filled_with_its_color() {
        let mut canvas = new_canvas(60, 60).unwrap();
        draw_marker(&mut canvas, &stop("500", "#3b82f6", 30., 30.));

        assert_eq!(pixel_rgba(&canvas, 30, 30), Some([0x3b, 0x82, 0xf6, 255]));
        // outline ring
        let [r, g, b, _] = pixel_rgba(&canvas, 36, 30).unwrap();
        assert!(r < 0x30 && g < 0x30 && b < 0x30, "{r} {g} {b}");
    }

    #[test]
    fn label_background_lands_beside_the_marker() {
        let mut canvas = new_canvas(120, 60).unwrap();
        let s = stop("50", "#eff6ff", 20., 30.);
        draw_label(&mut canvas, &s, 12.);

        let label = place_label(20., 30., text_width("50", 12.), 120., 12.);
        let bg = label.background;
        assert!(bg.x_min < 33. && 33. < bg.x_max && bg.y_min < 23. && 23. < bg.y_max);
        // dark translucent background behind a light stop
        let [_, _, _, a] = pixel_rgba(&canvas, 33, 23).unwrap();
        assert!((150..=155).contains(&a), "alpha {a}");
        // nothing drawn on the far side of the marker
        assert_eq!(pixel_rgba(&canvas, 5, 30), Some([0, 0, 0, 0]));
    }
}
