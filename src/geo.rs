//! Coordinate types and the spherical Web Mercator projection.
//!
//! Two distinct types keep the reference system in the type system:
//! - [`LonLat`] — geographic WGS84 (degrees), what geocoders speak.
//! - [`MapPoint`] — projected EPSG:3857 (metres), what the map view speaks.
//!
//! Arithmetic never mixes the two; crossing over always goes through
//! [`LonLat::to_map`] or [`MapPoint::to_lon_lat`].

use serde::{Deserialize, Serialize};

/// Mean equatorial earth radius of the spherical Mercator model, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Side length of a square map tile in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

// ─────────────────────────────────────────────────────────────────────────────
// LonLat – geographic WGS84
// ─────────────────────────────────────────────────────────────────────────────

/// A geographic coordinate: longitude and latitude in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Project into Web Mercator metres.
    pub fn to_map(self) -> MapPoint {
        let x = EARTH_RADIUS_M * self.lon.to_radians();
        let y = EARTH_RADIUS_M
            * (std::f64::consts::FRAC_PI_4 + self.lat.to_radians() / 2.0)
                .tan()
                .ln();
        MapPoint { x, y }
    }

    /// The `(lat, lon)` tuple used by maps-service query strings, which expect
    /// latitude first. Returns a new pair; the coordinate itself is untouched.
    pub fn query_pair(self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MapPoint – projected EPSG:3857
// ─────────────────────────────────────────────────────────────────────────────

/// A point in the map's display projection (Web Mercator, metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unproject back to geographic degrees.
    pub fn to_lon_lat(self) -> LonLat {
        let lon = (self.x / EARTH_RADIUS_M).to_degrees();
        let lat = (2.0 * (self.y / EARTH_RADIUS_M).exp().atan()
            - std::f64::consts::FRAC_PI_2)
            .to_degrees();
        LonLat { lon, lat }
    }
}

/// Metres per screen pixel at the given (fractional) zoom level.
///
/// Zoom 0 shows the whole world (2πR metres) across one 256 px tile; each
/// zoom level halves the span.
pub fn resolution(zoom: f64) -> f64 {
    2.0 * std::f64::consts::PI * EARTH_RADIUS_M / (TILE_SIZE_PX * 2f64.powf(zoom))
}
