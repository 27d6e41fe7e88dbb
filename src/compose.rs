use std::time::Instant;

use serde::Serialize;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};
use tracing::{debug, info};

use super::canvas::new_canvas;
use super::error::*;
use super::font::*;
use super::layout::*;
use super::marker::draw_markers;
use super::palette::*;
use super::plane::paint_plane;
use super::spline::draw_curve;
use super::RenderConfig;

pub const SUMMARY_SEPARATOR: &str = " • ";
const STRIP_PADDING: f32 = 8.;
const SHEET_GAP: u32 = 16;

fn block_background() -> Color {
    Color::from_rgba8(0x1b, 0x1b, 0x1f, 255)
}

fn summary_color() -> Color {
    Color::from_rgba8(0xc8, 0xc8, 0xc8, 255)
}

#[derive(Debug, Clone)]
pub struct PaletteBlock {
    pub title: String,
    pub canvas: Pixmap,
    pub summary: String,
    pub mean_hue: f32,
    pub layout: Layout,
    title_size: f32,
    label_size: f32,
}

pub fn draw_palette(canvas: &mut Pixmap, palette: &Palette, label_size: f32) -> Layout {
    let layout = layout(palette, canvas.width(), canvas.height());

    paint_plane(canvas, layout.mean_hue());
    draw_curve(canvas, &layout.points());
    draw_markers(canvas, &layout.stops, label_size);

    layout
}

pub fn render_palette(palette: &Palette, cfg: &RenderConfig) -> Result<PaletteBlock, VizError> {
    let started = Instant::now();

    let mut canvas = new_canvas(cfg.width, cfg.height)?;
    let layout = draw_palette(&mut canvas, palette, cfg.label_size);
    let summary = layout.ids().collect::<Vec<_>>().join(SUMMARY_SEPARATOR);

    debug!(
        palette = %palette.name,
        stops = layout.stops.len(),
        rejected = layout.rejected.len(),
        elapsed = ?started.elapsed(),
        "rendered palette"
    );

    Ok(PaletteBlock {
        title: palette.name.clone(),
        canvas,
        summary,
        mean_hue: layout.mean_hue(),
        layout,
        title_size: cfg.title_size,
        label_size: cfg.label_size,
    })
}

impl PaletteBlock {
    fn strip_height(size: f32) -> u32 {
        (size + 2. * STRIP_PADDING).ceil() as u32
    }

    pub fn to_image(&self) -> Result<Pixmap, VizError> {
        let title_h = Self::strip_height(self.title_size);
        let summary_h = Self::strip_height(self.label_size);
        let width = self.canvas.width();

        let mut image = new_canvas(width, title_h + self.canvas.height() + summary_h)?;
        image.fill(block_background());

        draw_text(
            &mut image,
            &self.title,
            STRIP_PADDING,
            title_h as f32 / 2.,
            self.title_size,
            TextAlign::Left,
            Color::WHITE,
        );
        image.draw_pixmap(
            0,
            title_h as i32,
            self.canvas.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        draw_text(
            &mut image,
            &self.summary,
            STRIP_PADDING,
            (title_h + self.canvas.height()) as f32 + summary_h as f32 / 2.,
            self.label_size,
            TextAlign::Left,
            summary_color(),
        );

        Ok(image)
    }

    pub fn report(&self) -> PaletteReport<'_> {
        PaletteReport {
            name: &self.title,
            mean_hue: self.mean_hue,
            summary: &self.summary,
            stops: &self.layout.stops,
            rejected: self
                .layout
                .rejected
                .iter()
                .map(|r| RejectedReport { id: &r.id, color: &r.color, reason: r.error.to_string() })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaletteReport<'a> {
    pub name: &'a str,
    pub mean_hue: f32,
    pub summary: &'a str,
    pub stops: &'a [Stop],
    pub rejected: Vec<RejectedReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RejectedReport<'a> {
    pub id: &'a str,
    pub color: &'a str,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Visualization {
    pub blocks: Vec<PaletteBlock>,
}

impl Visualization {
    pub fn render(set: &PaletteSet, cfg: &RenderConfig) -> Result<Visualization, VizError> {
        info!("rendering {} palettes", set.len());
        let blocks = set
            .palettes
            .iter()
            .map(|p| render_palette(p, cfg))
            .collect::<Result<_, _>>()?;
        Ok(Visualization { blocks })
    }

    pub fn to_sheet(&self) -> Result<Pixmap, VizError> {
        let images = self
            .blocks
            .iter()
            .map(PaletteBlock::to_image)
            .collect::<Result<Vec<_>, _>>()?;

        let width = images.iter().map(Pixmap::width).max().ok_or(VizError::NothingToRender)?;
        let height = images.iter().map(Pixmap::height).sum::<u32>()
            + SHEET_GAP * (images.len() as u32 - 1);

        let mut sheet = new_canvas(width, height)?;
        sheet.fill(block_background());

        let mut y = 0;
        for image in &images {
            sheet.draw_pixmap(
                0,
                y as i32,
                image.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            y += image.height() + SHEET_GAP;
        }

        Ok(sheet)
    }

    pub fn report(&self) -> Vec<PaletteReport<'_>> {
        self.blocks.iter().map(PaletteBlock::report).collect()
    }
}

pub fn visualize(src: &str, cfg: &RenderConfig) -> Result<Visualization, VizError> {
    let set = PaletteSet::from_json(src)?;
    Visualization::render(&set, cfg)
}
