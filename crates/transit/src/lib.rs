//! # mio-transit
//!
//! Transit network snapshot and route graph construction for bus rapid
//! transit systems described by route, stop and route-stop tables.
//!
//! ## Features
//!
//! - **Typed identifiers**: route and stop ids cannot be mixed up
//! - **Tolerant loading**: malformed CSV rows are dropped, not fatal
//! - **Route graphs**: one ordered arc list per route and orientation
//! - **Projection**: padded bounding boxes and lon/lat to pixel mapping
//!
//! ## Example
//!
//! ```
//! use mio_transit::prelude::*;
//!
//! let route = Route {
//!     id: RouteId::new(1),
//!     short_name: "A1".into(),
//!     description: "Menga - Universidades".into(),
//! };
//! let stops = vec![
//!     Stop::new(StopId::new(10), "MENGA", "Menga", 3.40, -76.50),
//!     Stop::new(StopId::new(20), "CHIPI", "Chipichape", 3.41, -76.52),
//! ];
//! let memberships = vec![
//!     RouteStop::new(RouteId::new(1), StopId::new(20), 2, Orientation::Outbound),
//!     RouteStop::new(RouteId::new(1), StopId::new(10), 1, Orientation::Outbound),
//! ];
//!
//! let network = TransitNetwork::from_data(vec![route], stops, memberships);
//! let graphs = build_route_graphs(&network);
//!
//! assert_eq!(graphs.summary.arcs, 1);
//! assert_eq!(graphs.paths[0].arcs()[0].to_string(), "10 -> 20");
//! ```

pub mod graph;
pub mod identifiers;
pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::graph::{build_arcs, build_route_graphs, GraphSummary, RouteGraphs, RoutePath, StopArc};
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::provider::{GroupedMemberships, TransitNetwork};
    pub use crate::spatial::{project, BoundingBox, Viewport};
}

pub use prelude::*;
