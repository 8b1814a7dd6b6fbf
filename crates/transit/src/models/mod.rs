//! Transit data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::TransitLookup;
pub use types::{Orientation, Result, Route, RouteStop, Stop, TransitError};
