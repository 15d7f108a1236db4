//! Run the core workflow without any UI: collect three pins, resolve the
//! middle point, and print the resulting deep link.
//!
//! Uses a canned geocoder so it works offline; swap in
//! `NominatimGeocoder::new(...)` for live lookups.

use pinmap::centroid::resolve;
use pinmap::geo::LonLat;
use pinmap::geocode::{GeocodeError, Geocoder};
use pinmap::points::PointStore;

/// Offline geocoder with a fixed address table.
struct CannedGeocoder {
    entries: Vec<(&'static str, LonLat)>,
}

impl Geocoder for CannedGeocoder {
    async fn reverse_geocode(&self, coord: LonLat) -> Result<String, GeocodeError> {
        self.entries
            .iter()
            .min_by(|a, b| {
                let da = (a.1.lon - coord.lon).hypot(a.1.lat - coord.lat);
                let db = (b.1.lon - coord.lon).hypot(b.1.lat - coord.lat);
                da.total_cmp(&db)
            })
            .map(|(name, _)| name.to_string())
            .ok_or(GeocodeError::NotFound)
    }

    async fn forward_geocode(&self, query: &str) -> Result<LonLat, GeocodeError> {
        self.entries
            .iter()
            .find(|(name, _)| *name == query)
            .map(|(_, coord)| *coord)
            .ok_or(GeocodeError::NotFound)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let geocoder = CannedGeocoder {
        entries: vec![
            ("Alun-Alun Bandung", LonLat::new(107.6098, -6.9218)),
            ("Gedung Sate", LonLat::new(107.6186, -6.9025)),
            ("Bandung Station", LonLat::new(107.6022, -6.9144)),
        ],
    };

    let mut store = PointStore::new();
    for (name, coord) in &geocoder.entries {
        let address = geocoder.reverse_geocode(*coord).await?;
        store.append(coord.to_map(), address);
        println!("pinned: {name}");
    }

    let result = resolve(&geocoder, &store.addresses()).await?;
    println!(
        "middle point: lon {:.6}, lat {:.6}",
        result.geographic.lon, result.geographic.lat
    );
    println!(
        "deep link: {}",
        result.deep_link("https://www.google.com/maps/search/", 14)
    );
    Ok(())
}
