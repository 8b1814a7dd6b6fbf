//! Line-oriented arc listing printed for every route and orientation.

use std::io::{self, Write};

use crate::graph::path::RouteGraphs;
use crate::models::traits::TransitLookup;

const RULE: &str = "=================================================================";

impl RouteGraphs {
    /// Write the arc report for every path followed by the summary block
    pub fn write_report<L, W>(&self, lookup: &L, out: &mut W) -> io::Result<()>
    where
        L: TransitLookup + ?Sized,
        W: Write,
    {
        writeln!(out, "{RULE}")?;
        writeln!(out, "TRANSIT ROUTE GRAPHS - ARC LIST PER ROUTE")?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;

        for (route_id, paths) in self.by_route() {
            writeln!(out, "{RULE}")?;
            writeln!(out, "ROUTE: {} (ID: {})", lookup.route_name(route_id), route_id)?;
            if let Some(route) = lookup.route(route_id) {
                if !route.description.is_empty() {
                    writeln!(out, "Description: {}", route.description)?;
                }
            }
            writeln!(out, "{RULE}")?;

            for path in paths {
                let arcs = path.arcs();

                writeln!(out)?;
                writeln!(out, "--- {} ---", path.orientation.label())?;
                writeln!(out, "Stops: {} | Arcs: {}", path.stops.len(), arcs.len())?;
                writeln!(out, "Arc sequence:")?;

                for (i, arc) in arcs.iter().enumerate() {
                    writeln!(
                        out,
                        "  {:3}. [{} -> {}] {} -> {}",
                        i + 1,
                        arc.from,
                        arc.to,
                        lookup.stop_name(arc.from),
                        lookup.stop_name(arc.to)
                    )?;
                }
            }

            writeln!(out)?;
        }

        writeln!(out, "{RULE}")?;
        writeln!(out, "SUMMARY")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Total routes processed: {}", self.summary.routes)?;
        writeln!(out, "Total arcs generated: {}", self.summary.arcs)?;
        writeln!(out, "{RULE}")?;

        Ok(())
    }

    pub fn report<L: TransitLookup + ?Sized>(&self, lookup: &L) -> String {
        let mut buf = Vec::new();
        self.write_report(lookup, &mut buf)
            .expect("writing into a Vec cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::build_route_graphs;
    use crate::prelude::*;

    fn sample_network() -> TransitNetwork {
        let route = Route {
            id: RouteId::new(1),
            short_name: "A1".into(),
            description: "Desc".into(),
        };
        let stops = vec![
            Stop::new(StopId::new(10), "S10", "Stop 10", 3.40, -76.50),
            Stop::new(StopId::new(20), "S20", "Stop 20", 3.41, -76.52),
            Stop::new(StopId::new(30), "S30", "Stop 30", 3.42, -76.54),
        ];
        let memberships = vec![
            RouteStop::new(RouteId::new(1), StopId::new(10), 1, Orientation::Outbound),
            RouteStop::new(RouteId::new(1), StopId::new(20), 2, Orientation::Outbound),
            RouteStop::new(RouteId::new(1), StopId::new(30), 3, Orientation::Outbound),
        ];
        TransitNetwork::from_data(vec![route], stops, memberships)
    }

    #[test]
    fn test_report_matches_expected_text() {
        let network = sample_network();
        let report = build_route_graphs(&network).report(&network);

        let rule = "=".repeat(65);
        let expected = format!(
            "{rule}\n\
             TRANSIT ROUTE GRAPHS - ARC LIST PER ROUTE\n\
             {rule}\n\
             \n\
             {rule}\n\
             ROUTE: A1 (ID: 1)\n\
             Description: Desc\n\
             {rule}\n\
             \n\
             --- outbound ---\n\
             Stops: 3 | Arcs: 2\n\
             Arc sequence:\n\
             \x20   1. [10 -> 20] S10 -> S20\n\
             \x20   2. [20 -> 30] S20 -> S30\n\
             \n\
             {rule}\n\
             SUMMARY\n\
             {rule}\n\
             Total routes processed: 1\n\
             Total arcs generated: 2\n\
             {rule}\n"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_placeholders_for_unresolved_ids() {
        let network = TransitNetwork::from_data(
            vec![],
            vec![Stop::new(StopId::new(1), "ONE", "", 0.0, 0.0)],
            vec![
                RouteStop::new(RouteId::new(9), StopId::new(1), 1, Orientation::Other(4)),
                RouteStop::new(RouteId::new(9), StopId::new(2), 2, Orientation::Other(4)),
            ],
        );
        let report = build_route_graphs(&network).report(&network);

        assert!(report.contains("ROUTE: LINEID 9 (ID: 9)\n"));
        assert!(!report.contains("Description:"));
        assert!(report.contains("--- orientation 4 ---\n"));
        assert!(report.contains("    1. [1 -> 2] ONE -> N/A\n"));
    }

    #[test]
    fn test_report_orders_sections() {
        let network = TransitNetwork::from_data(
            vec![],
            vec![],
            vec![
                RouteStop::new(RouteId::new(5), StopId::new(1), 1, Orientation::Inbound),
                RouteStop::new(RouteId::new(2), StopId::new(1), 1, Orientation::Outbound),
                RouteStop::new(RouteId::new(5), StopId::new(1), 1, Orientation::Outbound),
            ],
        );
        let report = build_route_graphs(&network).report(&network);

        let route_two = report.find("(ID: 2)").unwrap();
        let route_five = report.find("(ID: 5)").unwrap();
        assert!(route_two < route_five);

        let five = &report[route_five..];
        let outbound = five.find("--- outbound ---").unwrap();
        let inbound = five.find("--- inbound ---").unwrap();
        assert!(outbound < inbound);
        assert!(report.contains("Stops: 1 | Arcs: 0\n"));
        assert!(report.contains("Total routes processed: 2\n"));
    }
}
