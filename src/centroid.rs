//! Middle-point resolution: forward-geocode every collected address and
//! average the results.
//!
//! Each address is re-resolved from scratch rather than reusing the
//! coordinate captured at click time; the centroid is computed over
//! geocoder-resolved positions, which may drift slightly from the original
//! clicks. The batch is all-or-nothing: one failed lookup aborts the whole
//! resolution with no partial average.

use futures::future::try_join_all;
use thiserror::Error;

use crate::geo::{LonLat, MapPoint};
use crate::geocode::{GeocodeError, Geocoder};

/// Why a resolution attempt produced no centroid.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Resolution was invoked with zero addresses. Callers are expected to
    /// short-circuit before calling; this is a precondition, not a no-op.
    #[error("no points have been placed")]
    NoPoints,
    /// One of the concurrent forward-geocode calls failed; `index` and
    /// `address` identify which.
    #[error("forward geocoding failed for {address:?} (point #{index}): {source}")]
    Geocode {
        index: usize,
        address: String,
        source: GeocodeError,
    },
}

/// The resolved middle point, in both reference systems.
///
/// A snapshot over the store contents at the moment of resolution; it is
/// stale as soon as another pin is placed, and is recomputed in full on every
/// request rather than cached or merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidResult {
    /// Arithmetic-mean coordinate in geographic WGS84.
    pub geographic: LonLat,
    /// The same point reprojected into the map's display projection.
    pub map_point: MapPoint,
}

impl CentroidResult {
    /// The `(lat, lon)` pair for the external maps service, which expects
    /// latitude first. A pure swap of the centroid's components.
    pub fn query_pair(&self) -> (f64, f64) {
        self.geographic.query_pair()
    }

    /// Render the deep link that opens this point in the external maps
    /// service, e.g. `https://www.google.com/maps/search/?api=1&query=-6.9,107.6&zoom=14`.
    pub fn deep_link(&self, base: &str, zoom: u8) -> String {
        let (lat, lon) = self.query_pair();
        format!("{base}?api=1&query={lat},{lon}&zoom={zoom}")
    }
}

/// Forward-geocode every address concurrently and average the results.
///
/// Fails with [`ResolveError::NoPoints`] before issuing any network call if
/// `addresses` is empty, and with [`ResolveError::Geocode`] if any single
/// lookup fails. The mean is a naive planar average of longitude and
/// latitude; points spanning the antimeridian are not handled specially.
pub async fn resolve<G: Geocoder>(
    geocoder: &G,
    addresses: &[String],
) -> Result<CentroidResult, ResolveError> {
    if addresses.is_empty() {
        return Err(ResolveError::NoPoints);
    }

    let lookups = addresses.iter().enumerate().map(|(index, address)| async move {
        geocoder
            .forward_geocode(address)
            .await
            .map_err(|source| ResolveError::Geocode {
                index,
                address: address.clone(),
                source,
            })
    });
    let coords = try_join_all(lookups).await?;

    let n = coords.len() as f64;
    let (sum_lon, sum_lat) = coords
        .iter()
        .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));
    let geographic = LonLat::new(sum_lon / n, sum_lat / n);

    log::info!(
        "resolved centroid of {} address(es) to ({:.6}, {:.6})",
        coords.len(),
        geographic.lon,
        geographic.lat
    );

    Ok(CentroidResult {
        geographic,
        map_point: geographic.to_map(),
    })
}
