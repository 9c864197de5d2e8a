//! Coordinate Reference System codes understood by the WMC tools.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Projection assumed when a context does not declare one.
pub const DEFAULT_PROJECTION: &str = "EPSG:900913";

/// Well-known CRS codes the reprojector can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// Spherical (Web) Mercator in meters, including its legacy aliases
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS string as it appears in `SRS` attributes and map configs.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:4326"
    /// - "CRS:84"
    /// - "EPSG:900913" (legacy Google Mercator)
    pub fn from_wms_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "CRS:84" => Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" | "EPSG:102113" => Ok(CrsCode::Epsg3857),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
        };
        write!(f, "{}", code)
    }
}

/// Two CRS strings denote the same coordinate system.
///
/// Identical strings always match, so unknown codes compare by name.
pub fn same_crs(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    match (CrsCode::from_wms_string(a), CrsCode::from_wms_string(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}
