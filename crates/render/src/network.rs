//! Single image of the whole network.
//!
//! Arcs are drawn once per route that uses them, so shared corridors read
//! heavier. Stops are drawn once per id no matter how many routes serve them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use geo::{coord, Rect};
use mio_transit::{BoundingBox, RouteGraphs, StopId, TransitLookup, Viewport};
use resvg::usvg::fontdb;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::route::{create_output_dir, IMAGE_EXTENSION};
use crate::style::{FontWeight, NetworkStyle, Stroke, TextStyle};
use crate::svg::{system_fonts, SvgCanvas};

/// Counts shown in the footer: arcs per occurrence, stops per identity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    pub routes: usize,
    pub unique_stops: usize,
    pub arcs: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkOutcome {
    Written { path: PathBuf, summary: NetworkSummary },
    /// No stop resolved, so there was nothing to project
    Aborted,
}

pub struct NetworkRenderer {
    style: NetworkStyle,
    fonts: Arc<fontdb::Database>,
}

impl NetworkRenderer {
    pub fn new(style: NetworkStyle) -> Self {
        Self::with_fonts(style, system_fonts())
    }

    pub fn with_fonts(style: NetworkStyle, fonts: Arc<fontdb::Database>) -> Self {
        Self { style, fonts }
    }

    pub fn style(&self) -> &NetworkStyle {
        &self.style
    }

    pub fn viewport(&self) -> Viewport {
        let s = &self.style;
        Viewport::new(
            s.margin_x,
            s.margin_y,
            f64::from(s.width) - 2.0 * s.margin_x,
            f64::from(s.height) - s.margin_y - s.header_height,
        )
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.style.file_stem, IMAGE_EXTENSION)
    }

    pub fn render_network<L>(&self, graphs: &RouteGraphs, lookup: &L, output_dir: &Path) -> Result<NetworkOutcome>
    where
        L: TransitLookup + ?Sized,
    {
        let all_stops = graphs.paths.iter().flat_map(|p| p.stop_ids());
        let Some(bbox) = BoundingBox::for_stops(all_stops, lookup) else {
            log::warn!("No stop in the network resolves; skipping the network image");
            return Ok(NetworkOutcome::Aborted);
        };

        let mut canvas = SvgCanvas::new(
            self.style.width,
            self.style.height,
            &self.style.font_family,
            self.fonts.clone(),
        );
        let summary = self.compose(&mut canvas, graphs, lookup, &bbox);

        create_output_dir(output_dir)?;
        let path = output_dir.join(self.file_name());
        canvas.encode_and_write(&path)?;

        log::info!("Network image written to {}", path.display());
        log::info!("  Routes: {}", summary.routes);
        log::info!("  Unique stops: {}", summary.unique_stops);
        log::info!("  Total arcs: {}", summary.arcs);

        Ok(NetworkOutcome::Written { path, summary })
    }

    pub fn compose<C, L>(&self, canvas: &mut C, graphs: &RouteGraphs, lookup: &L, bbox: &BoundingBox) -> NetworkSummary
    where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        let s = &self.style;
        let viewport = self.viewport();
        let width = f64::from(s.width);
        let height = f64::from(s.height);

        // Routes that actually have stops, not every route record loaded
        let mut summary = NetworkSummary {
            routes: graphs.summary.routes,
            ..NetworkSummary::default()
        };
        let memberships: usize = graphs.paths.iter().map(|p| p.stops.len()).sum();

        canvas.fill_background(s.background);

        canvas.draw_text(
            coord! { x: s.margin_x, y: 50.0 },
            &format!("Complete graph - all {} routes", s.network_name),
            &TextStyle::new(32.0, FontWeight::Bold, s.text),
        );
        canvas.draw_text(
            coord! { x: s.margin_x, y: 75.0 },
            &format!("Routes: {} | Stops in graph: {}", summary.routes, memberships),
            &TextStyle::new(16.0, FontWeight::Regular, s.muted_text),
        );

        let stroke = Stroke::new(s.arc, s.arc_stroke_width);
        for path in &graphs.paths {
            for pair in path.stops.windows(2) {
                let (Some(a), Some(b)) = (lookup.stop(pair[0].stop_id), lookup.stop(pair[1].stop_id)) else {
                    continue;
                };
                canvas.draw_line(
                    viewport.project(bbox, a.lon(), a.lat()),
                    viewport.project(bbox, b.lon(), b.lat()),
                    &stroke,
                );
                summary.arcs += 1;
            }
        }

        let mut drawn: HashSet<StopId> = HashSet::new();
        for stop_id in graphs.paths.iter().flat_map(|p| p.stop_ids()) {
            if drawn.contains(&stop_id) {
                continue;
            }
            let Some(stop) = lookup.stop(stop_id) else {
                continue;
            };
            canvas.fill_circle(viewport.project(bbox, stop.lon(), stop.lat()), s.node_radius, s.node);
            drawn.insert(stop_id);
        }
        summary.unique_stops = drawn.len();

        canvas.draw_rounded_rect(
            Rect::new(
                coord! { x: 0.0, y: height - s.footer_height },
                coord! { x: width, y: height },
            ),
            0.0,
            Some(s.footer_background),
            None,
        );
        canvas.draw_text(
            coord! { x: s.margin_x, y: height - 25.0 },
            &format!(
                "{} - Complete graph | Routes: {} | Unique stops: {} | Arcs: {}",
                s.network_name, summary.routes, summary.unique_stops, summary.arcs
            ),
            &TextStyle::new(14.0, FontWeight::Regular, s.footer_text),
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::RecordingCanvas;
    use mio_transit::prelude::*;

    fn renderer() -> NetworkRenderer {
        NetworkRenderer::with_fonts(NetworkStyle::default(), Arc::new(fontdb::Database::new()))
    }

    fn membership(route: i64, stop: i64, sequence: i32) -> RouteStop {
        RouteStop::new(RouteId::new(route), StopId::new(stop), sequence, Orientation::Outbound)
    }

    /// Two routes crossing at stop 20
    fn shared_stop_network() -> TransitNetwork {
        let stops = vec![
            Stop::new(StopId::new(10), "A", "", 3.40, -76.50),
            Stop::new(StopId::new(20), "B", "", 3.41, -76.52),
            Stop::new(StopId::new(30), "C", "", 3.42, -76.54),
            Stop::new(StopId::new(40), "D", "", 3.43, -76.51),
            Stop::new(StopId::new(50), "E", "", 3.39, -76.53),
        ];
        let memberships = vec![
            membership(1, 10, 1),
            membership(1, 20, 2),
            membership(1, 30, 3),
            membership(2, 40, 1),
            membership(2, 20, 2),
            membership(2, 50, 3),
        ];
        TransitNetwork::from_data(vec![], stops, memberships)
    }

    #[test]
    fn test_shared_stop_drawn_once() {
        let network = shared_stop_network();
        let graphs = build_route_graphs(&network);
        let all = graphs.paths.iter().flat_map(|p| p.stop_ids());
        let bbox = BoundingBox::for_stops(all, &network).unwrap();

        let renderer = renderer();
        let mut canvas = RecordingCanvas::new(2400, 1800);
        let summary = renderer.compose(&mut canvas, &graphs, &network, &bbox);

        assert_eq!(
            summary,
            NetworkSummary {
                routes: 2,
                unique_stops: 5,
                arcs: 4
            }
        );
        assert_eq!(canvas.circles().len(), 5);
        assert_eq!(canvas.lines().len(), 4);

        let viewport = renderer.viewport();
        let shared = viewport.project(&bbox, -76.52, 3.41);
        let at_shared = canvas.circles().iter().filter(|c| c.0 == shared).count();
        assert_eq!(at_shared, 1);
        let arcs_touching_shared = canvas
            .lines()
            .iter()
            .filter(|(from, to, _)| *from == shared || *to == shared)
            .count();
        assert_eq!(arcs_touching_shared, 4);
    }

    #[test]
    fn test_overlapping_corridor_drawn_per_route() {
        let stops = vec![
            Stop::new(StopId::new(1), "A", "", 3.40, -76.50),
            Stop::new(StopId::new(2), "B", "", 3.41, -76.51),
        ];
        let memberships = vec![
            membership(1, 1, 1),
            membership(1, 2, 2),
            membership(2, 1, 1),
            membership(2, 2, 2),
        ];
        let network = TransitNetwork::from_data(vec![], stops, memberships);
        let graphs = build_route_graphs(&network);
        let bbox = BoundingBox::for_stops([StopId::new(1), StopId::new(2)], &network).unwrap();

        let mut canvas = RecordingCanvas::new(2400, 1800);
        let summary = renderer().compose(&mut canvas, &graphs, &network, &bbox);
        assert_eq!(summary.arcs, 2);
        assert_eq!(summary.unique_stops, 2);
    }

    #[test]
    fn test_faint_stroke_and_footer() {
        let network = shared_stop_network();
        let graphs = build_route_graphs(&network);
        let all = graphs.paths.iter().flat_map(|p| p.stop_ids());
        let bbox = BoundingBox::for_stops(all, &network).unwrap();

        let renderer = renderer();
        let mut canvas = RecordingCanvas::new(2400, 1800);
        renderer.compose(&mut canvas, &graphs, &network, &bbox);

        let lines = canvas.lines();
        let (_, _, stroke) = &lines[0];
        assert_eq!(stroke.color, renderer.style().arc);
        assert!(stroke.color.alpha < 255);

        let texts: Vec<String> = canvas.texts().into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts[1], "Routes: 2 | Stops in graph: 6");
        assert_eq!(
            texts.last().unwrap(),
            "SITM-MIO - Complete graph | Routes: 2 | Unique stops: 5 | Arcs: 4"
        );
    }

    #[test]
    fn test_route_count_ignores_records_without_stops() {
        let records = (1..=3)
            .map(|id| Route {
                id: RouteId::new(id),
                short_name: format!("R{id}"),
                description: String::new(),
            })
            .collect();
        let plain = shared_stop_network();
        let stops = [10, 20, 30, 40, 50]
            .iter()
            .filter_map(|&id| plain.stop(StopId::new(id)).cloned())
            .collect();
        let memberships = plain
            .memberships()
            .values()
            .flat_map(|by_orientation| by_orientation.values().flatten().cloned())
            .collect();
        let network = TransitNetwork::from_data(records, stops, memberships);
        let graphs = build_route_graphs(&network);
        let all = graphs.paths.iter().flat_map(|p| p.stop_ids());
        let bbox = BoundingBox::for_stops(all, &network).unwrap();

        let mut canvas = RecordingCanvas::new(2400, 1800);
        let summary = renderer().compose(&mut canvas, &graphs, &network, &bbox);
        assert_eq!(network.route_count(), 3);
        assert_eq!(summary.routes, 2);
    }

    #[test]
    fn test_render_network_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let network = shared_stop_network();
        let graphs = build_route_graphs(&network);

        let outcome = renderer().render_network(&graphs, &network, dir.path()).unwrap();
        let expected = dir.path().join("Grafo_Completo_MIO.png");
        match outcome {
            NetworkOutcome::Written { path, summary } => {
                assert_eq!(path, expected);
                assert_eq!(summary.unique_stops, 5);
            }
            NetworkOutcome::Aborted => panic!("Expected network image"),
        }
        assert!(expected.exists());
    }

    #[test]
    fn test_render_network_aborts_without_stops() {
        let dir = tempfile::tempdir().unwrap();
        let network = TransitNetwork::from_data(vec![], vec![], vec![membership(1, 1, 1), membership(1, 2, 2)]);
        let graphs = build_route_graphs(&network);

        let outcome = renderer().render_network(&graphs, &network, dir.path()).unwrap();
        assert_eq!(outcome, NetworkOutcome::Aborted);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
