//! Ordered stop sequences and the arcs derived from them.

use std::fmt;

use crate::identifiers::*;
use crate::models::types::*;
use crate::provider::TransitNetwork;

/// Directed edge between two consecutive stops of a route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StopArc {
    pub from: StopId,
    pub to: StopId,
}

impl fmt::Display for StopArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Pair every membership with its successor. N memberships yield N-1 arcs.
pub fn build_arcs(sequence: &[RouteStop]) -> Vec<StopArc> {
    sequence
        .windows(2)
        .map(|pair| StopArc {
            from: pair[0].stop_id,
            to: pair[1].stop_id,
        })
        .collect()
}

/// One orientation of one route, ordered by stop sequence
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePath {
    pub route_id: RouteId,
    pub orientation: Orientation,
    pub stops: Vec<RouteStop>,
}

impl RoutePath {
    /// Build a path from memberships in source order.
    ///
    /// The sort is stable, so memberships sharing a sequence number keep the
    /// order they had in the source table.
    pub fn new(route_id: RouteId, orientation: Orientation, mut stops: Vec<RouteStop>) -> Self {
        stops.sort_by_key(|m| m.sequence);
        Self {
            route_id,
            orientation,
            stops,
        }
    }

    pub fn arcs(&self) -> Vec<StopArc> {
        build_arcs(&self.stops)
    }

    pub fn arc_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    pub fn first_stop(&self) -> Option<StopId> {
        self.stops.first().map(|m| m.stop_id)
    }

    pub fn last_stop(&self) -> Option<StopId> {
        self.stops.last().map(|m| m.stop_id)
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.stops.iter().map(|m| m.stop_id)
    }
}

/// Totals over every path in a build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub routes: usize,
    pub arcs: usize,
}

/// All route paths in deterministic order: ascending route id, then ascending
/// orientation within each route
#[derive(Clone, Debug, Default)]
pub struct RouteGraphs {
    pub paths: Vec<RoutePath>,
    pub summary: GraphSummary,
}

impl RouteGraphs {
    /// Paths grouped by route, preserving order
    pub fn by_route(&self) -> impl Iterator<Item = (RouteId, &[RoutePath])> + '_ {
        self.paths
            .chunk_by(|a, b| a.route_id == b.route_id)
            .map(|chunk| (chunk[0].route_id, chunk))
    }
}

pub fn build_route_graphs(network: &TransitNetwork) -> RouteGraphs {
    let mut paths = Vec::new();
    let mut summary = GraphSummary::default();

    for (&route_id, by_orientation) in network.memberships() {
        for (&orientation, memberships) in by_orientation {
            let path = RoutePath::new(route_id, orientation, memberships.clone());
            summary.arcs += path.arc_count();
            paths.push(path);
        }
        summary.routes += 1;
    }

    log::debug!(
        "Built {} paths over {} routes ({} arcs)",
        paths.len(),
        summary.routes,
        summary.arcs
    );

    RouteGraphs { paths, summary }
}
