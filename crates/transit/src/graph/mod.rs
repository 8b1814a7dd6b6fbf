//! Route graphs: one simple directed path per route and orientation.

pub mod path;
pub mod report;

pub use path::{build_arcs, build_route_graphs, GraphSummary, RouteGraphs, RoutePath, StopArc};
