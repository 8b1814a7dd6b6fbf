//! Linear projection from longitude/latitude into canvas pixels.

use geo::{coord, Coord};

use crate::spatial::bbox::BoundingBox;

/// Sub-region of a canvas that receives projected points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    pub fn project(&self, bbox: &BoundingBox, lon: f64, lat: f64) -> Coord<f64> {
        project(lon, lat, bbox, self)
    }
}

/// Map (lon, lat) into pixel space. Y is inverted so that north is up.
pub fn project(lon: f64, lat: f64, bbox: &BoundingBox, viewport: &Viewport) -> Coord<f64> {
    let x = (lon - bbox.min_lon()) / bbox.lon_span();
    let y = (lat - bbox.min_lat()) / bbox.lat_span();

    coord! {
        x: viewport.origin_x + x * viewport.width,
        y: viewport.origin_y + (1.0 - y) * viewport.height,
    }
}
