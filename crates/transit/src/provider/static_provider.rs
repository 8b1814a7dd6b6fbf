//! In-memory transit network built once from the loaded tables.
//!
//! This is the read-only snapshot every later stage borrows from: lookup maps
//! for routes and stops plus the memberships grouped by route and orientation.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::provider::csv_loader;

/// Memberships grouped route → orientation, each list in source order
pub type GroupedMemberships = BTreeMap<RouteId, BTreeMap<Orientation, Vec<RouteStop>>>;

/// In-memory transit network with id lookups
#[derive(Clone, Debug, Default)]
pub struct TransitNetwork {
    route_map: HashMap<RouteId, Route>,
    stop_map: HashMap<StopId, Stop>,
    memberships: GroupedMemberships,
}

impl TransitNetwork {
    /// Create a new empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from raw records.
    ///
    /// Later routes or stops with an already-seen id replace the earlier
    /// record. Memberships keep their input order within each group.
    pub fn from_data(routes: Vec<Route>, stops: Vec<Stop>, route_stops: Vec<RouteStop>) -> Self {
        let route_map: HashMap<_, _> = routes.into_iter().map(|r| (r.id, r)).collect();
        let stop_map: HashMap<_, _> = stops.into_iter().map(|s| (s.id, s)).collect();

        let mut memberships = GroupedMemberships::new();
        for route_stop in route_stops {
            memberships
                .entry(route_stop.route_id)
                .or_default()
                .entry(route_stop.orientation)
                .or_default()
                .push(route_stop);
        }

        Self {
            route_map,
            stop_map,
            memberships,
        }
    }

    /// Load the three source tables and build a network from them
    pub fn load(routes_path: &Path, stops_path: &Path, route_stops_path: &Path) -> Result<Self> {
        let routes = csv_loader::load_routes(routes_path)?;
        let stops = csv_loader::load_stops(stops_path)?;
        let route_stops = csv_loader::load_route_stops(route_stops_path)?;

        log::info!(
            "Loaded {} routes, {} stops, {} route-stop memberships",
            routes.len(),
            stops.len(),
            route_stops.len()
        );

        Ok(Self::from_data(routes, stops, route_stops))
    }

    /// Memberships grouped by route and orientation, ascending on both keys
    pub fn memberships(&self) -> &GroupedMemberships {
        &self.memberships
    }

    pub fn route_count(&self) -> usize {
        self.route_map.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stop_map.len()
    }

    pub fn membership_count(&self) -> usize {
        self.memberships
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

impl TransitLookup for TransitNetwork {
    fn route(&self, id: RouteId) -> Option<&Route> {
        self.route_map.get(&id)
    }

    fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stop_map.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(route: i64, stop: i64, sequence: i32, orientation: i32) -> RouteStop {
        RouteStop::new(
            RouteId::new(route),
            StopId::new(stop),
            sequence,
            Orientation::from_raw(orientation),
        )
    }

    #[test]
    fn test_empty_network() {
        let network = TransitNetwork::new();
        assert_eq!(network.route_count(), 0);
        assert_eq!(network.stop_count(), 0);
        assert!(network.memberships().is_empty());
    }

    #[test]
    fn test_network_lookups() {
        let route = Route {
            id: RouteId::new(1),
            short_name: "A1".into(),
            description: "Desc".into(),
        };
        let stop = Stop::new(StopId::new(10), "S10", "Stop Ten", 3.40, -76.50);

        let network = TransitNetwork::from_data(vec![route], vec![stop], vec![]);

        assert!(network.route(RouteId::new(1)).is_some());
        assert!(network.stop(StopId::new(10)).is_some());
        assert!(network.stop(StopId::new(11)).is_none());
        assert_eq!(network.stop_name(StopId::new(10)), "S10");
        assert_eq!(network.stop_name(StopId::new(11)), "N/A");
        assert_eq!(network.route_name(RouteId::new(1)), "A1");
        assert_eq!(network.route_name(RouteId::new(9)), "LINEID 9");
    }

    #[test]
    fn test_memberships_grouped_in_input_order() {
        let network = TransitNetwork::from_data(
            vec![],
            vec![],
            vec![
                membership(2, 30, 2, 1),
                membership(1, 10, 3, 0),
                membership(2, 31, 1, 1),
                membership(1, 11, 1, 0),
                membership(1, 12, 1, 1),
            ],
        );

        let route_ids: Vec<_> = network.memberships().keys().copied().collect();
        assert_eq!(route_ids, vec![RouteId::new(1), RouteId::new(2)]);

        let route_one = &network.memberships()[&RouteId::new(1)];
        let outbound: Vec<_> = route_one[&Orientation::Outbound].iter().map(|m| m.stop_id.get()).collect();
        assert_eq!(outbound, vec![10, 11]);
        assert_eq!(route_one[&Orientation::Inbound].len(), 1);

        assert_eq!(network.membership_count(), 5);
    }

    #[test]
    fn test_duplicate_ids_keep_last_record() {
        let first = Stop::new(StopId::new(10), "OLD", "", 0.0, 0.0);
        let second = Stop::new(StopId::new(10), "NEW", "", 1.0, 1.0);

        let network = TransitNetwork::from_data(vec![], vec![first, second], vec![]);
        assert_eq!(network.stop_count(), 1);
        assert_eq!(network.stop_name(StopId::new(10)), "NEW");
    }
}
