//! # mio-render
//!
//! Raster images of transit route graphs.
//!
//! [`RouteRenderer`] draws one image per route and orientation with
//! start/end/intermediate stop styling, sparse direction arrows and thinned
//! labels. [`NetworkRenderer`] draws every route on one larger canvas with
//! faint arcs and each stop once.
//!
//! Both compose through the [`Canvas`] trait; [`SvgCanvas`] builds an SVG
//! document and rasterizes it to PNG with resvg.

pub mod canvas;
pub mod error;
pub mod labels;
pub mod network;
pub mod route;
pub mod style;
pub mod svg;

pub use canvas::Canvas;
pub use error::{RenderError, Result};
pub use labels::{plan_labels, LabelEmphasis, LabelPlacement};
pub use network::{NetworkOutcome, NetworkRenderer, NetworkSummary};
pub use route::{
    arrowhead, route_file_name, sanitize_file_component, BatchSummary, RenderOutcome, RouteRenderer,
    RouteScene, SkipReason, IMAGE_EXTENSION,
};
pub use style::{Color, FontWeight, NetworkStyle, RouteStyle, Stroke, TextStyle};
pub use svg::{system_fonts, SvgCanvas};
