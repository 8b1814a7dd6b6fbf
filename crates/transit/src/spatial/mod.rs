//! Geographic extent and pixel projection utilities.

pub mod bbox;
pub mod projection;

pub use bbox::BoundingBox;
pub use projection::{project, Viewport};
