//! Core data types and enums for transit data.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Direction of travel along a route.
///
/// 0 is outbound and 1 is inbound; any other value is carried through as-is
/// so that numbered variants keep their own section in reports and images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Outbound,
    Inbound,
    Other(i32),
}

impl Orientation {
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Self::Outbound,
            1 => Self::Inbound,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::Outbound => 0,
            Self::Inbound => 1,
            Self::Other(value) => value,
        }
    }

    /// Display label, also used (lowercased) in output file names.
    pub fn label(self) -> String {
        match self {
            Self::Outbound => "outbound".to_string(),
            Self::Inbound => "inbound".to_string(),
            Self::Other(value) => format!("orientation {value}"),
        }
    }
}

impl Ord for Orientation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw().cmp(&other.raw())
    }
}

impl PartialOrd for Orientation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ============================================================================
// Records
// ============================================================================

/// A named transit line
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub id: RouteId,
    /// Short name (e.g., "T31", "A11")
    pub short_name: String,
    pub description: String,
}

/// A geocoded point of service
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub short_name: String,
    pub long_name: String,
    /// x = longitude, y = latitude
    pub location: Point,
}

impl Stop {
    pub fn new(
        id: StopId,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            id,
            short_name: short_name.into(),
            long_name: long_name.into(),
            location: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.location.y()
    }

    pub fn lon(&self) -> f64 {
        self.location.x()
    }
}

/// Position of a stop within one orientation of a route
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteStop {
    pub route_id: RouteId,
    pub stop_id: StopId,
    pub sequence: i32,
    pub orientation: Orientation,
}

impl RouteStop {
    pub fn new(route_id: RouteId, stop_id: StopId, sequence: i32, orientation: Orientation) -> Self {
        Self {
            route_id,
            stop_id,
            sequence,
            orientation,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_labels() {
        assert_eq!(Orientation::from_raw(0).label(), "outbound");
        assert_eq!(Orientation::from_raw(1).label(), "inbound");
        assert_eq!(Orientation::from_raw(2).label(), "orientation 2");
        assert_eq!(Orientation::from_raw(-1).to_string(), "orientation -1");
    }

    #[test]
    fn test_orientation_round_trip_raw() {
        for raw in [-3, 0, 1, 2, 17] {
            assert_eq!(Orientation::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn test_orientation_orders_numerically() {
        let mut orientations = vec![
            Orientation::Other(5),
            Orientation::Inbound,
            Orientation::Other(-1),
            Orientation::Outbound,
        ];
        orientations.sort();
        assert_eq!(
            orientations,
            vec![
                Orientation::Other(-1),
                Orientation::Outbound,
                Orientation::Inbound,
                Orientation::Other(5),
            ]
        );
    }

    #[test]
    fn test_stop_coordinates() {
        let stop = Stop::new(StopId::new(10), "S10", "Stop Ten", 3.40, -76.50);
        assert_eq!(stop.lat(), 3.40);
        assert_eq!(stop.lon(), -76.50);
    }
}
