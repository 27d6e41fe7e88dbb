use nalgebra::Point2;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const CURVE_WIDTH: f32 = 3.;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<f32>,
    pub cp1: Point2<f32>,
    pub cp2: Point2<f32>,
    pub end: Point2<f32>,
}

/// The end points act as their own outer neighbors. Fewer than two points
/// give no segments.
pub fn catmull_rom(points: &[Point2<f32>]) -> Vec<Segment> {
    if points.len() < 2 {
        return Vec::new();
    }

    let last = points.len() - 1;
    (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[usize::min(i + 2, last)];

            Segment {
                start: p1,
                cp1: p1 + (p2 - p0) / 6.,
                cp2: p2 - (p3 - p1) / 6.,
                end: p2,
            }
        })
        .collect()
}

pub fn draw_curve(canvas: &mut Pixmap, points: &[Point2<f32>]) {
    let segments = catmull_rom(points);
    let Some(first) = segments.first() else {
        return;
    };

    let mut builder = PathBuilder::new();
    builder.move_to(first.start.x, first.start.y);
    for s in &segments {
        builder.cubic_to(s.cp1.x, s.cp1.y, s.cp2.x, s.cp2.y, s.end.x, s.end.y);
    }

    // degenerate path, nothing to stroke
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    let stroke = Stroke { width: CURVE_WIDTH, ..Stroke::default() };
    canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
