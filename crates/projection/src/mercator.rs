//! Spherical (Web) Mercator projection.
//!
//! The EPSG:3857 flavour used by web maps: WGS84 lon/lat projected onto a
//! sphere with the WGS84 semi-major axis as radius.

use std::f64::consts::PI;

/// Sphere radius (WGS84 semi-major axis) in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude where the square Web Mercator world ends.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Project geographic degrees to Web Mercator meters.
///
/// Latitudes beyond the Mercator limit are clamped.
pub fn forward(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Unproject Web Mercator meters to geographic degrees.
pub fn inverse(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}
