//! Canvas backed by an SVG document and rasterized with resvg.

use std::path::Path;
use std::sync::Arc;

use geo::{Coord, Rect};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use crate::canvas::Canvas;
use crate::error::{RenderError, Result};
use crate::style::{Color, FontWeight, Stroke, TextStyle};

/// Font database shared by every canvas of a run.
///
/// Loading system fonts is slow, so renderers load it once and hand clones
/// of the `Arc` to each canvas they create.
pub fn system_fonts() -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Loaded {} font faces", db.len());
    Arc::new(db)
}

pub struct SvgCanvas {
    width: u32,
    height: u32,
    font_family: String,
    fonts: Arc<fontdb::Database>,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, font_family: &str, fonts: Arc<fontdb::Database>) -> Self {
        Self {
            width,
            height,
            font_family: font_family.to_string(),
            fonts,
            body: String::new(),
        }
    }

    /// Complete SVG document for everything drawn so far
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    pub fn rasterize(&self) -> Result<Pixmap> {
        let mut options = usvg::Options::default();
        options.font_family = self.font_family.clone();
        options.fontdb = self.fonts.clone();

        let tree = usvg::Tree::from_str(&self.to_svg(), &options)?;

        let mut pixmap = Pixmap::new(self.width, self.height).ok_or(RenderError::Allocation {
            width: self.width,
            height: self.height,
        })?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.rasterize()?
            .encode_png()
            .map_err(|err| RenderError::Encode(err.to_string()))
    }
}

impl Canvas for SvgCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_background(&mut self, color: Color) {
        self.body.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" {}/>",
            paint("fill", color)
        ));
    }

    fn draw_line(&mut self, from: Coord<f64>, to: Coord<f64>, stroke: &Stroke) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {} stroke-linecap=\"round\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(stroke)
        ));
    }

    fn fill_polygon(&mut self, points: &[Coord<f64>], color: Color) {
        let points = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.body.push_str(&format!(
            "<polygon points=\"{}\" {}/>",
            points,
            paint("fill", color)
        ));
    }

    fn fill_circle(&mut self, center: Coord<f64>, radius: f64, color: Color) {
        self.body.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
            center.x,
            center.y,
            radius,
            paint("fill", color)
        ));
    }

    fn draw_text(&mut self, origin: Coord<f64>, text: &str, style: &TextStyle) {
        let weight = match style.weight {
            FontWeight::Regular => "normal",
            FontWeight::Bold => "bold",
        };
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" {}>{}</text>",
            origin.x,
            origin.y,
            escape_xml(&self.font_family),
            style.size,
            weight,
            paint("fill", style.color),
            escape_xml(text)
        ));
    }

    fn draw_rounded_rect(
        &mut self,
        rect: Rect<f64>,
        radius: f64,
        fill: Option<Color>,
        border: Option<&Stroke>,
    ) {
        let fill = fill.map_or_else(|| "fill=\"none\"".to_string(), |c| paint("fill", c));
        let border = border.map(stroke_attrs).unwrap_or_default();
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r:.2}\" ry=\"{r:.2}\" {} {}/>",
            rect.min().x,
            rect.min().y,
            rect.width(),
            rect.height(),
            fill,
            border,
            r = radius
        ));
    }

    fn encode_and_write(&self, path: &Path) -> Result<()> {
        let png = self.encode_png()?;
        std::fs::write(path, png).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn paint(attr: &str, color: Color) -> String {
    let opacity = f64::from(color.alpha) / 255.0;
    format!(
        "{attr}=\"rgb({},{},{})\" {attr}-opacity=\"{:.3}\"",
        color.red, color.green, color.blue, opacity
    )
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        "{} stroke-width=\"{:.2}\"",
        paint("stroke", stroke.color),
        stroke.width
    )
}

/// Escape markup and drop characters XML 1.0 cannot carry, which would
/// otherwise make the whole document unparsable
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
