//! Transit data providers.

pub mod csv_loader;
pub mod static_provider;

pub use static_provider::{GroupedMemberships, TransitNetwork};
