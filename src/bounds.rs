#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Bounds { x_min: x, x_max: x + width, y_min: y, y_max: y + height }
    }
}
