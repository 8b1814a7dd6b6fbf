//! Drawing capabilities the renderers rely on.
//!
//! Renderers only compose through this trait, so the same scene can be
//! rasterized to a file or captured for inspection.

use std::path::Path;

use geo::{Coord, Rect};

use crate::error::Result;
use crate::style::{Color, Stroke, TextStyle};

pub trait Canvas {
    /// Canvas size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    fn fill_background(&mut self, color: Color);

    fn draw_line(&mut self, from: Coord<f64>, to: Coord<f64>, stroke: &Stroke);

    fn fill_polygon(&mut self, points: &[Coord<f64>], color: Color);

    fn fill_circle(&mut self, center: Coord<f64>, radius: f64, color: Color);

    /// Draw text with its baseline starting at `origin`
    fn draw_text(&mut self, origin: Coord<f64>, text: &str, style: &TextStyle);

    /// Draw a rectangle with rounded corners; a radius of 0 gives square corners
    fn draw_rounded_rect(
        &mut self,
        rect: Rect<f64>,
        radius: f64,
        fill: Option<Color>,
        border: Option<&Stroke>,
    );

    /// Rasterize the canvas and write it to `path`
    fn encode_and_write(&self, path: &Path) -> Result<()>;
}
