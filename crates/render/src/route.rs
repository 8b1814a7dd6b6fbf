//! One image per route and orientation.
//!
//! Layers are drawn in a fixed order, each over the previous: background,
//! header, arcs with arrowheads, stop nodes, labels, legend, footer.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use geo::{coord, Coord, Rect};
use mio_transit::{
    BoundingBox, Orientation, Route, RouteGraphs, RouteId, RoutePath, TransitLookup, Viewport,
};
use resvg::usvg::fontdb;

use crate::canvas::Canvas;
use crate::error::{RenderError, Result};
use crate::labels::{plan_labels, LabelEmphasis};
use crate::style::{FontWeight, RouteStyle, Stroke, TextStyle};
use crate::svg::{system_fonts, SvgCanvas};

pub const IMAGE_EXTENSION: &str = "png";

/// Why a route/orientation produced no image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two stops resolve, so there is no arc to draw
    TooFewStops { resolvable: usize },
    NoBoundingBox,
    /// The composed scene could not be rasterized or encoded
    Rasterization,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
}

/// What ended up on a composed route canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteScene {
    pub arcs: usize,
    pub arrows: usize,
    pub nodes: usize,
    pub labels: usize,
}

/// Replace everything outside `[A-Za-z0-9_-]` with an underscore
pub fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<short name>_<orientation>_<route id>.png`, falling back to `LINE_<id>`
/// for routes without a record
pub fn route_file_name(route: Option<&Route>, route_id: RouteId, orientation: Orientation) -> String {
    let name = match route {
        Some(route) => route.short_name.clone(),
        None => format!("LINE_{route_id}"),
    };
    format!(
        "{}_{}_{}.{}",
        sanitize_file_component(&name),
        sanitize_file_component(&orientation.label().to_lowercase()),
        route_id,
        IMAGE_EXTENSION
    )
}

/// Filled triangle at 80% of the segment, wings at ±30° from its direction
pub fn arrowhead(from: Coord<f64>, to: Coord<f64>, size: f64) -> [Coord<f64>; 3] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let spread = PI / 6.0;

    let tip = coord! {
        x: from.x + 0.8 * (to.x - from.x),
        y: from.y + 0.8 * (to.y - from.y),
    };

    [
        tip,
        coord! {
            x: tip.x - size * (angle - spread).cos(),
            y: tip.y - size * (angle - spread).sin(),
        },
        coord! {
            x: tip.x - size * (angle + spread).cos(),
            y: tip.y - size * (angle + spread).sin(),
        },
    ]
}

pub struct RouteRenderer {
    style: RouteStyle,
    fonts: Arc<fontdb::Database>,
}

impl RouteRenderer {
    pub fn new(style: RouteStyle) -> Self {
        Self::with_fonts(style, system_fonts())
    }

    pub fn with_fonts(style: RouteStyle, fonts: Arc<fontdb::Database>) -> Self {
        Self { style, fonts }
    }

    pub fn style(&self) -> &RouteStyle {
        &self.style
    }

    /// Region between the header and the footer that receives the map
    pub fn viewport(&self) -> Viewport {
        let s = &self.style;
        Viewport::new(
            s.margin,
            s.header_height,
            f64::from(s.width) - 2.0 * s.margin,
            f64::from(s.height) - s.header_height - s.footer_height - s.margin,
        )
    }

    /// Render every path in report order into `output_dir`.
    ///
    /// `on_rendered` is called after each path with its outcome.
    pub fn render_all<L, F>(
        &self,
        graphs: &RouteGraphs,
        lookup: &L,
        output_dir: &Path,
        mut on_rendered: F,
    ) -> Result<BatchSummary>
    where
        L: TransitLookup + ?Sized,
        F: FnMut(&RoutePath, &RenderOutcome),
    {
        create_output_dir(output_dir)?;

        let mut summary = BatchSummary::default();
        for path in &graphs.paths {
            let outcome = self.render_route(path, lookup, output_dir)?;
            match outcome {
                RenderOutcome::Written(_) => summary.written += 1,
                RenderOutcome::Skipped(_) => summary.skipped += 1,
            }
            on_rendered(path, &outcome);
        }

        log::info!(
            "Route images: {} written, {} skipped",
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }

    pub fn render_route<L>(&self, path: &RoutePath, lookup: &L, output_dir: &Path) -> Result<RenderOutcome>
    where
        L: TransitLookup + ?Sized,
    {
        let resolvable = path.stop_ids().filter(|&id| lookup.stop(id).is_some()).count();
        if resolvable < 2 {
            log::debug!(
                "Skipping route {} ({}): {} resolvable stops",
                path.route_id,
                path.orientation,
                resolvable
            );
            return Ok(RenderOutcome::Skipped(SkipReason::TooFewStops { resolvable }));
        }

        let Some(bbox) = BoundingBox::for_stops(path.stop_ids(), lookup) else {
            return Ok(RenderOutcome::Skipped(SkipReason::NoBoundingBox));
        };

        let mut canvas = SvgCanvas::new(
            self.style.width,
            self.style.height,
            &self.style.font_family,
            self.fonts.clone(),
        );
        self.compose(&mut canvas, path, lookup, &bbox);

        create_output_dir(output_dir)?;
        let file = output_dir.join(route_file_name(
            lookup.route(path.route_id),
            path.route_id,
            path.orientation,
        ));
        match canvas.encode_and_write(&file) {
            Ok(()) => {}
            Err(err @ RenderError::Io { .. }) => return Err(err),
            Err(err) => {
                log::warn!(
                    "Skipping route {} ({}): {}",
                    path.route_id,
                    path.orientation,
                    err
                );
                return Ok(RenderOutcome::Skipped(SkipReason::Rasterization));
            }
        }

        log::debug!("Wrote {}", file.display());
        Ok(RenderOutcome::Written(file))
    }

    /// Draw every layer of a route image onto `canvas`
    pub fn compose<C, L>(&self, canvas: &mut C, path: &RoutePath, lookup: &L, bbox: &BoundingBox) -> RouteScene
    where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        let viewport = self.viewport();
        let mut scene = RouteScene::default();

        canvas.fill_background(self.style.background);
        self.draw_header(canvas, path, lookup);
        self.draw_arcs(canvas, path, lookup, bbox, &viewport, &mut scene);
        self.draw_stops(canvas, path, lookup, bbox, &viewport, &mut scene);
        self.draw_labels(canvas, path, lookup, bbox, &viewport, &mut scene);
        self.draw_legend(
            canvas,
            f64::from(self.style.width) - self.style.margin - 250.0,
            self.style.header_height + 40.0,
        );
        self.draw_footer(canvas, path.stops.len());

        scene
    }

    fn draw_header<C, L>(&self, canvas: &mut C, path: &RoutePath, lookup: &L)
    where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        let s = &self.style;
        let route = lookup.route(path.route_id);
        let name = route.map_or_else(|| path.route_id.to_string(), |r| r.short_name.clone());

        canvas.draw_text(
            coord! { x: s.margin, y: 45.0 },
            &format!("Route {} - {}", name, path.orientation.label()),
            &TextStyle::new(32.0, FontWeight::Bold, s.text),
        );

        if let Some(route) = route.filter(|r| !r.description.is_empty()) {
            canvas.draw_text(
                coord! { x: s.margin, y: 70.0 },
                &route.description,
                &TextStyle::new(16.0, FontWeight::Regular, s.text),
            );
        }

        canvas.draw_text(
            coord! { x: s.margin, y: 95.0 },
            &format!(
                "ID: {}  |  Stops: {}  |  Arcs: {}",
                path.route_id,
                path.stops.len(),
                path.arc_count()
            ),
            &TextStyle::new(14.0, FontWeight::Regular, s.muted_text),
        );
    }

    fn draw_arcs<C, L>(
        &self,
        canvas: &mut C,
        path: &RoutePath,
        lookup: &L,
        bbox: &BoundingBox,
        viewport: &Viewport,
        scene: &mut RouteScene,
    ) where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        let stroke = Stroke::new(self.style.route_line, self.style.route_stroke_width);

        for (i, pair) in path.stops.windows(2).enumerate() {
            let (Some(a), Some(b)) = (lookup.stop(pair[0].stop_id), lookup.stop(pair[1].stop_id)) else {
                continue;
            };

            let p1 = viewport.project(bbox, a.lon(), a.lat());
            let p2 = viewport.project(bbox, b.lon(), b.lat());

            canvas.draw_line(p1, p2, &stroke);
            scene.arcs += 1;

            // Every second arc carries a direction cue
            if i % 2 == 0 {
                canvas.fill_polygon(&arrowhead(p1, p2, self.style.arrow_size), self.style.route_line);
                scene.arrows += 1;
            }
        }
    }

    fn draw_stops<C, L>(
        &self,
        canvas: &mut C,
        path: &RoutePath,
        lookup: &L,
        bbox: &BoundingBox,
        viewport: &Viewport,
        scene: &mut RouteScene,
    ) where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        let s = &self.style;
        let (Some(first), Some(last)) = (path.first_stop(), path.last_stop()) else {
            return;
        };

        for stop_id in path.stop_ids() {
            let Some(stop) = lookup.stop(stop_id) else {
                continue;
            };

            // Start styling wins when a loop route ends where it began
            let (color, radius) = if stop_id == first {
                (s.first_stop, s.node_radius_big)
            } else if stop_id == last {
                (s.last_stop, s.node_radius_big)
            } else {
                (s.stop_node, s.node_radius)
            };

            canvas.fill_circle(viewport.project(bbox, stop.lon(), stop.lat()), radius, color);
            scene.nodes += 1;
        }
    }

    fn draw_labels<C, L>(
        &self,
        canvas: &mut C,
        path: &RoutePath,
        lookup: &L,
        bbox: &BoundingBox,
        viewport: &Viewport,
        scene: &mut RouteScene,
    ) where
        C: Canvas + ?Sized,
        L: TransitLookup + ?Sized,
    {
        for placement in plan_labels(&path.stops) {
            let Some(stop) = lookup.stop(placement.stop_id) else {
                continue;
            };
            let anchor = viewport.project(bbox, stop.lon(), stop.lat());
            self.draw_label(canvas, &stop.short_name, anchor, placement.emphasis);
            scene.labels += 1;
        }
    }

    /// Text on an opaque rounded box, offset up and to the right of the node
    fn draw_label<C>(&self, canvas: &mut C, text: &str, anchor: Coord<f64>, emphasis: LabelEmphasis)
    where
        C: Canvas + ?Sized,
    {
        let s = &self.style;
        let style = match emphasis {
            LabelEmphasis::Terminal => TextStyle::new(14.0, FontWeight::Bold, s.label_text),
            LabelEmphasis::Interior => TextStyle::new(12.0, FontWeight::Regular, s.label_text),
        };
        let (text_width, text_height) = style.text_extent(text);

        let x = anchor.x.trunc() + 10.0;
        let y = anchor.y.trunc() - 10.0;

        canvas.draw_rounded_rect(
            Rect::new(
                coord! { x: x - 4.0, y: y - text_height },
                coord! { x: x + text_width + 4.0, y: y + 6.0 },
            ),
            3.0,
            Some(s.label_background),
            Some(&Stroke::new(s.label_border, 1.0)),
        );
        canvas.draw_text(coord! { x: x, y: y }, text, &style);
    }

    fn draw_legend<C>(&self, canvas: &mut C, x: f64, y: f64)
    where
        C: Canvas + ?Sized,
    {
        let s = &self.style;
        let entry = TextStyle::new(12.0, FontWeight::Regular, s.text);

        canvas.draw_rounded_rect(
            Rect::new(coord! { x: x, y: y }, coord! { x: x + 240.0, y: y + 150.0 }),
            6.0,
            Some(s.legend_background),
            Some(&Stroke::new(s.legend_border, 1.0)),
        );
        canvas.draw_text(
            coord! { x: x + 12.0, y: y + 22.0 },
            "Legend",
            &TextStyle::new(14.0, FontWeight::Bold, s.text),
        );

        let mut py = y + 45.0;
        canvas.fill_circle(coord! { x: x + 18.0, y: py }, 6.0, s.first_stop);
        canvas.draw_text(coord! { x: x + 32.0, y: py }, "First stop", &entry);

        py += 22.0;
        canvas.fill_circle(coord! { x: x + 18.0, y: py }, 6.0, s.last_stop);
        canvas.draw_text(coord! { x: x + 32.0, y: py }, "Last stop", &entry);

        py += 22.0;
        canvas.fill_circle(coord! { x: x + 17.0, y: py - 1.0 }, 5.0, s.stop_node);
        canvas.draw_text(coord! { x: x + 32.0, y: py }, "Intermediate stops", &entry);

        py += 24.0;
        canvas.draw_line(
            coord! { x: x + 12.0, y: py },
            coord! { x: x + 40.0, y: py },
            &Stroke::new(s.route_line, 4.0),
        );
        canvas.draw_text(coord! { x: x + 55.0, y: py + 4.0 }, "Route / direction", &entry);
    }

    fn draw_footer<C>(&self, canvas: &mut C, stops: usize)
    where
        C: Canvas + ?Sized,
    {
        let s = &self.style;
        let width = f64::from(s.width);
        let height = f64::from(s.height);

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
            coord! { x: s.margin, y: height - 30.0 },
            &format!("{} - Route graph | Stops: {}", s.network_name, stops),
            &TextStyle::new(14.0, FontWeight::Regular, s.footer_text),
        );
    }
}

pub(crate) fn create_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
