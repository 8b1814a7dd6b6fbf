//! Fixed palettes and canvas geometry for the two renderers.
//!
//! Styles are plain values handed to a renderer at construction; nothing here
//! is global, so tests can swap palettes freely.

use palette::Srgba;

pub type Color = Srgba<u8>;

pub fn rgb(red: u8, green: u8, blue: u8) -> Color {
    Srgba::new(red, green, blue, 255)
}

pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
    Srgba::new(red, green, blue, alpha)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f64, weight: FontWeight, color: Color) -> Self {
        Self {
            size,
            weight,
            color,
        }
    }

    /// Approximate (width, height) of a rendered string.
    ///
    /// Glyph metrics are not available before rasterization, so this uses an
    /// average advance for proportional sans-serif faces.
    pub fn text_extent(&self, text: &str) -> (f64, f64) {
        let advance = match self.weight {
            FontWeight::Regular => 0.55,
            FontWeight::Bold => 0.6,
        };
        let chars = text.chars().count() as f64;
        (chars * self.size * advance, (self.size * 1.25).ceil())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Style of a single route/orientation image
#[derive(Clone, Debug, PartialEq)]
pub struct RouteStyle {
    pub width: u32,
    pub height: u32,
    pub margin: f64,
    pub header_height: f64,
    pub footer_height: f64,

    /// Network name shown in the footer
    pub network_name: String,
    pub font_family: String,

    pub background: Color,
    pub route_line: Color,
    pub stop_node: Color,
    pub first_stop: Color,
    pub last_stop: Color,
    pub text: Color,
    pub muted_text: Color,
    pub legend_background: Color,
    pub legend_border: Color,
    pub footer_background: Color,
    pub footer_text: Color,
    pub label_background: Color,
    pub label_border: Color,
    pub label_text: Color,

    pub node_radius: f64,
    pub node_radius_big: f64,
    pub route_stroke_width: f64,
    pub arrow_size: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1600,
            margin: 120.0,
            header_height: 120.0,
            footer_height: 80.0,

            network_name: "SITM-MIO".to_string(),
            font_family: "sans-serif".to_string(),

            background: rgb(252, 252, 252),
            route_line: rgba(0, 90, 200, 190),
            stop_node: rgb(220, 20, 60),
            first_stop: rgb(0, 160, 60),
            last_stop: rgb(240, 140, 0),
            text: rgb(25, 25, 25),
            muted_text: rgb(70, 70, 70),
            legend_background: rgba(255, 255, 255, 240),
            legend_border: rgb(128, 128, 128),
            footer_background: rgb(240, 240, 240),
            footer_text: rgb(90, 90, 90),
            label_background: rgba(255, 255, 255, 240),
            label_border: rgb(180, 180, 180),
            label_text: rgb(20, 20, 20),

            node_radius: 7.0,
            node_radius_big: 10.0,
            route_stroke_width: 4.0,
            arrow_size: 12.0,
        }
    }
}

/// Style of the whole-network image
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkStyle {
    pub width: u32,
    pub height: u32,
    pub margin_x: f64,
    pub margin_y: f64,
    pub header_height: f64,
    pub footer_height: f64,

    pub network_name: String,
    pub font_family: String,
    /// File name without extension
    pub file_stem: String,

    pub background: Color,
    pub arc: Color,
    pub node: Color,
    pub text: Color,
    pub muted_text: Color,
    pub footer_background: Color,
    pub footer_text: Color,

    pub arc_stroke_width: f64,
    pub node_radius: f64,
}

impl Default for NetworkStyle {
    fn default() -> Self {
        Self {
            width: 2400,
            height: 1800,
            margin_x: 80.0,
            margin_y: 100.0,
            header_height: 80.0,
            footer_height: 60.0,

            network_name: "SITM-MIO".to_string(),
            font_family: "sans-serif".to_string(),
            file_stem: "Grafo_Completo_MIO".to_string(),

            background: rgb(252, 252, 252),
            arc: rgba(0, 90, 200, 50),
            node: rgba(200, 0, 0, 180),
            text: rgb(25, 25, 25),
            muted_text: rgb(70, 70, 70),
            footer_background: rgb(240, 240, 240),
            footer_text: rgb(90, 90, 90),

            arc_stroke_width: 1.2,
            node_radius: 3.0,
        }
    }
}
