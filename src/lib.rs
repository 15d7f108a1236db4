//! pinmap crate root: re-exports and module wiring.
//!
//! An interactive pin-drop map built on egui/eframe:
//! - `geo`: coordinate types and the Web Mercator projection
//! - `geocode`: the `Geocoder` trait and the Nominatim client
//! - `points`: the append-only store of placed pins
//! - `centroid`: middle-point resolution over the collected addresses
//! - `viewport` / `tiles` / `map_ui`: the slippy-map view
//! - `app`: the eframe shell tying it all together
//!
//! The core workflow (geocode → collect → resolve) is plain library code
//! with no UI dependency; see `demos/headless_midpoint.rs`.

pub mod app;
pub mod centroid;
pub mod config;
pub mod events;
pub mod geo;
pub mod geocode;
pub mod map_ui;
pub mod points;
pub mod tiles;
pub mod viewport;

// Public re-exports for a compact external API
pub use app::{run_pinmap, PinMapApp};
pub use centroid::{resolve, CentroidResult, ResolveError};
pub use config::PinMapConfig;
pub use geo::{LonLat, MapPoint};
pub use geocode::{GeocodeError, Geocoder, NominatimGeocoder};
pub use points::{PlacedPoint, PointStore};
