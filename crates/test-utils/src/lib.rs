//! Shared test utilities for the WMC workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample WMC documents, from minimal to fully extended
//! - Builders for map configurations and capability-bearing layers
//! - Approximate comparison macros for extents
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures::wmc, wms_layer};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Assert that two numbers differ by at most `epsilon`.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001, 1.0, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        if (left - right).abs() > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n epsilon: `{:?}`",
                left, right, epsilon
            );
        }
    }};
}

/// Assert that two `[minx, miny, maxx, maxy]` extents match within `epsilon`.
///
/// ```ignore
/// use test_utils::assert_extent_approx_eq;
///
/// assert_extent_approx_eq!(config.map.max_extent, [0.0, 0.0, 1.0, 1.0], 1e-9);
/// ```
#[macro_export]
macro_rules! assert_extent_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: [f64; 4] = $left;
        let right: [f64; 4] = $right;
        for (l, r) in left.iter().zip(right.iter()) {
            $crate::assert_approx_eq!(*l, *r, $epsilon);
        }
    }};
}
