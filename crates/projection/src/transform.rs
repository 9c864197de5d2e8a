//! Bounding box reprojection between map CRSs.

use wmc_common::{same_crs, BoundingBox, CrsCode, WmcError, WmcResult};

use crate::mercator;

/// Reprojects bounding boxes between CRS codes.
pub trait Reprojector {
    fn reproject_bbox(&self, bbox: &BoundingBox, from: &str, to: &str) -> WmcResult<BoundingBox>;
}

/// Reprojector for geographic WGS84 and spherical Mercator.
///
/// Equivalent codes pass through unchanged, so any CRS can be "reprojected"
/// onto itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MercatorReprojector;

impl Reprojector for MercatorReprojector {
    fn reproject_bbox(&self, bbox: &BoundingBox, from: &str, to: &str) -> WmcResult<BoundingBox> {
        if same_crs(from, to) {
            return Ok(*bbox);
        }

        let error = || WmcError::Reprojection {
            from: from.to_string(),
            to: to.to_string(),
        };
        let source = CrsCode::from_wms_string(from).map_err(|_| error())?;
        let target = CrsCode::from_wms_string(to).map_err(|_| error())?;

        let project: fn(f64, f64) -> (f64, f64) = match (source, target) {
            (CrsCode::Epsg4326, CrsCode::Epsg3857) => mercator::forward,
            (CrsCode::Epsg3857, CrsCode::Epsg4326) => mercator::inverse,
            _ => return Ok(*bbox),
        };

        // Both projections are monotonic per axis, so the corners suffice.
        let (minx, miny) = project(bbox.minx, bbox.miny);
        let (maxx, maxy) = project(bbox.maxx, bbox.maxy);
        Ok(BoundingBox::new(minx, miny, maxx, maxy))
    }
}
