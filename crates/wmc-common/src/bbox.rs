//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A projected or geographic bounding box.
///
/// Field names follow the map configuration JSON (`minx`, `miny`, ...),
/// which is also how WMC spells the `BoundingBox` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Self {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Build from an extent array `[minx, miny, maxx, maxy]`.
    pub fn from_extent(extent: [f64; 4]) -> Self {
        Self::new(extent[0], extent[1], extent[2], extent[3])
    }

    /// The `[minx, miny, maxx, maxy]` extent array.
    pub fn to_extent(&self) -> [f64; 4] {
        [self.minx, self.miny, self.maxx, self.maxy]
    }

    /// All four bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.to_extent().iter().all(|v| v.is_finite())
    }
}

/// A bounding box tagged with the CRS its coordinates are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBbox {
    pub bounds: BoundingBox,
    pub crs: String,
}

impl LayerBbox {
    pub fn new(bounds: BoundingBox, crs: impl Into<String>) -> Self {
        Self {
            bounds,
            crs: crs.into(),
        }
    }

    /// Usable for a WMC `BoundingBox`: finite bounds and a non-empty CRS.
    pub fn is_valid(&self) -> bool {
        self.bounds.is_finite() && !self.crs.is_empty()
    }
}
