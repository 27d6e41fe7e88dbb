use std::cmp::Ordering;

use nalgebra::Point2;
use serde::Serialize;
use tracing::warn;

use super::color::*;
use super::error::ColorError;
use super::palette::Palette;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub hex: String,
    #[serde(flatten)]
    pub hsl: Hsl,
    pub x: f32,
    pub y: f32,
}

impl Stop {
    pub fn point(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedStop {
    pub id: String,
    pub color: String,
    pub error: ColorError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub stops: Vec<Stop>,
    pub rejected: Vec<RejectedStop>,
}

impl Layout {
    pub fn mean_hue(&self) -> f32 {
        mean_hue(self.stops.iter().map(|s| &s.hsl))
    }

    pub fn points(&self) -> Vec<Point2<f32>> {
        self.stops.iter().map(Stop::point).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|s| s.id.as_str())
    }
}

pub fn plane_position(hsl: Hsl, width: u32, height: u32) -> Point2<f32> {
    Point2::new(
        hsl.s / 100. * width as f32,
        (100. - hsl.l) / 100. * height as f32,
    )
}

// Leading integer of a step id, as `parseInt` reads it.
pub fn step_number(id: &str) -> Option<f64> {
    let id = id.trim_start();
    let (sign, rest) = match id.as_bytes().first() {
        Some(b'-') => (-1., &id[1..]),
        Some(b'+') => (1., &id[1..]),
        _ => (1., id),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    // Digit runs of any length parse as f64; `+ 0.` folds -0 into 0.
    rest[..end].parse::<f64>().ok().map(|n| sign * n + 0.)
}

/// Ids without a leading number sort last, in input order. Steps whose color
/// is not valid hex go to `rejected` and take no further part.
pub fn layout(palette: &Palette, width: u32, height: u32) -> Layout {
    let mut out = Layout::default();

    for step in &palette.steps {
        match hex_to_hsl(&step.color) {
            Ok(hsl) => {
                let pos = plane_position(hsl, width, height);
                out.stops.push(Stop {
                    id: step.id.clone(),
                    hex: step.color.clone(),
                    hsl,
                    x: pos[0],
                    y: pos[1],
                });
            }
            Err(error) => {
                warn!(palette = %palette.name, step = %step.id, "skipping step: {error}");
                out.rejected.push(RejectedStop {
                    id: step.id.clone(),
                    color: step.color.clone(),
                    error,
                });
            }
        }
    }

    out.stops.sort_by(|a, b| match (step_number(&a.id), step_number(&b.id)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue() -> Palette {
        Palette::new("Blue", [("100", "#dbeafe"), ("50", "#eff6ff"), ("900", "#1e3a8a")])
    }

    #[test]
    fn orders_numerically() {
        let layout = layout(&blue(), 480, 480);
        assert_eq!(layout.ids().collect::<Vec<_>>(), ["50", "100", "900"]);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(layout(&blue(), 480, 480), layout(&blue(), 480, 480));
    }

    #[test]
    fn places_stops_like_the_plane() {
        let red = Palette::new("Red", [("1", "#ff0000"), ("2", "#ffffff"), ("3", "#000000")]);
        let layout = layout(&red, 480, 240);
        let points = layout.points();
        assert_eq!(points[0], Point2::new(480., 120.));
        assert_eq!(points[1], Point2::new(0., 0.));
        assert_eq!(points[2], Point2::new(0., 240.));
    }

    #[test]
    fn parses_leading_integers() {
        assert_eq!(step_number("50"), Some(50.));
        assert_eq!(step_number(" 950"), Some(950.));
        assert_eq!(step_number("-5"), Some(-5.));
        assert_eq!(step_number("700a"), Some(700.));
        assert_eq!(step_number("-"), None);
        assert_eq!(step_number("A100"), None);
        assert_eq!(step_number(""), None);
    }

    #[test]
    fn unnumbered_steps_sort_last_in_input_order() {
        let p = Palette::new(
            "Mixed",
            [("dark", "#111111"), ("200", "#cccccc"), ("light", "#eeeeee"), ("100", "#dddddd")],
        );
        let layout = layout(&p, 480, 480);
        assert_eq!(layout.ids().collect::<Vec<_>>(), ["100", "200", "dark", "light"]);
    }

    #[test]
    fn long_numeric_ids_stay_numeric() {
        assert_eq!(step_number("100000000000000000000"), Some(1e20));

        let p = Palette::new(
            "Long",
            [("x", "#111111"), ("100000000000000000000", "#222222"), ("5", "#333333")],
        );
        let layout = layout(&p, 480, 480);
        assert_eq!(layout.ids().collect::<Vec<_>>(), ["5", "100000000000000000000", "x"]);
    }

    #[test]
    fn malformed_colors_are_rejected_alone() {
        let p = Palette::new("Broken", [("1", "#ff0000"), ("2", "#zzzzzz"), ("3", "#00ff00")]);
        let layout = layout(&p, 480, 480);

        assert_eq!(layout.ids().collect::<Vec<_>>(), ["1", "3"]);
        assert_eq!(layout.rejected.len(), 1);
        assert_eq!(layout.rejected[0].id, "2");
        assert_eq!(layout.rejected[0].error, ColorError::Malformed("#zzzzzz".into()));
        assert_eq!(layout.mean_hue(), 60.);
    }
}
