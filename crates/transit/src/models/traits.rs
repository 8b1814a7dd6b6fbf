//! Lookup interface for transit entities.
//!
//! Every id may be unresolvable (a membership can reference a route or stop
//! that the source tables dropped), so lookups return `Option` and callers
//! pick a placeholder or skip the drawable element.

use crate::identifiers::*;
use crate::models::types::*;

pub trait TransitLookup {
    fn route(&self, id: RouteId) -> Option<&Route>;
    fn stop(&self, id: StopId) -> Option<&Stop>;

    /// Short name of a stop, or `N/A` when the id does not resolve
    fn stop_name(&self, id: StopId) -> &str {
        self.stop(id).map_or("N/A", |s| s.short_name.as_str())
    }

    /// Short name of a route, or a label built from the raw id
    fn route_name(&self, id: RouteId) -> String {
        match self.route(id) {
            Some(route) => route.short_name.clone(),
            None => format!("LINEID {id}"),
        }
    }
}
