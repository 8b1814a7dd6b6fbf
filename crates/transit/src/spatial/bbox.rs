//! Padded bounding boxes over sets of stops.

use geo::{coord, Point, Rect};

use crate::identifiers::StopId;
use crate::models::traits::TransitLookup;

/// Geographic rectangle used as the projection domain
///
/// Spans are always strictly positive: coincident points are widened by
/// [`BoundingBox::DEGENERATE_SPAN`] before padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    /// Fraction of the raw span added on every side
    pub const PADDING_RATIO: f64 = 0.05;

    /// Span forced onto an axis whose points all coincide (degrees)
    pub const DEGENERATE_SPAN: f64 = 0.0001;

    /// Compute the padded box over a set of points (x = lon, y = lat).
    ///
    /// Returns `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;

        let (mut min_lon, mut max_lon) = (first.x(), first.x());
        let (mut min_lat, mut max_lat) = (first.y(), first.y());

        for p in points {
            min_lon = min_lon.min(p.x());
            max_lon = max_lon.max(p.x());
            min_lat = min_lat.min(p.y());
            max_lat = max_lat.max(p.y());
        }

        if min_lon == max_lon {
            max_lon = min_lon + Self::DEGENERATE_SPAN;
        }
        if min_lat == max_lat {
            max_lat = min_lat + Self::DEGENERATE_SPAN;
        }

        let pad_lon = (max_lon - min_lon) * Self::PADDING_RATIO;
        let pad_lat = (max_lat - min_lat) * Self::PADDING_RATIO;

        Some(Self {
            rect: Rect::new(
                coord! { x: min_lon - pad_lon, y: min_lat - pad_lat },
                coord! { x: max_lon + pad_lon, y: max_lat + pad_lat },
            ),
        })
    }

    /// Box over the stops that resolve; unresolvable ids are skipped
    pub fn for_stops<L, I>(stop_ids: I, lookup: &L) -> Option<Self>
    where
        L: TransitLookup + ?Sized,
        I: IntoIterator<Item = StopId>,
    {
        Self::from_points(
            stop_ids
                .into_iter()
                .filter_map(|id| lookup.stop(id))
                .map(|stop| stop.location),
        )
    }

    pub fn min_lon(&self) -> f64 {
        self.rect.min().x
    }

    pub fn max_lon(&self) -> f64 {
        self.rect.max().x
    }

    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    pub fn lon_span(&self) -> f64 {
        self.rect.width()
    }

    pub fn lat_span(&self) -> f64 {
        self.rect.height()
    }

    pub fn rect(&self) -> Rect<f64> {
        self.rect
    }
}
