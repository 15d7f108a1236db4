//! Configuration for the pinmap application.

use crate::geo::LonLat;

/// Everything the app shell needs to know up front. `Default` reproduces the
/// original deployment: a map of Bandung with Nominatim geocoding and Google
/// Maps deep links.
#[derive(Debug, Clone)]
pub struct PinMapConfig {
    /// Native window title.
    pub title: String,
    /// Initial map center (geographic).
    pub initial_center: LonLat,
    /// Initial zoom level.
    pub initial_zoom: f64,
    /// Zoom level applied when recentering on a resolved middle point.
    pub centroid_zoom: f64,
    /// Base URL of the Nominatim-compatible geocoding service.
    pub nominatim_base: String,
    /// Base URL of the external maps service search endpoint for deep links.
    pub maps_search_base: String,
    /// User agent sent with every geocoding and tile request.
    pub user_agent: String,
}

impl Default for PinMapConfig {
    fn default() -> Self {
        Self {
            title: "pinmap".into(),
            // Center of Bandung.
            initial_center: LonLat::new(107.6186, -6.9039),
            initial_zoom: 12.0,
            centroid_zoom: 14.0,
            nominatim_base: "https://nominatim.openstreetmap.org".into(),
            maps_search_base: "https://www.google.com/maps/search/".into(),
            user_agent: concat!("pinmap/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}
