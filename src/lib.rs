pub mod bounds;
pub mod canvas;
pub mod color;
pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod marker;
pub mod palette;
pub mod plane;
pub mod spline;

pub use color::{Hsl, Rgb, hex_to_hsl, mean_hue};
pub use compose::*;
pub use error::*;
pub use layout::{Layout, RejectedStop, Stop, layout};
pub use palette::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub label_size: f32,
    pub title_size: f32,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 480,
            height: 480,
            label_size: 12.,
            title_size: 16.,
        }
    }
}
