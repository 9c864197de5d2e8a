//! Coordinate reference system transformations.
//!
//! Implements the projections map contexts use without external dependencies.

pub mod mercator;
pub mod transform;

pub use transform::{MercatorReprojector, Reprojector};
