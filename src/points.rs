//! The append-only store of pins the user has placed.

use crate::geo::MapPoint;

/// One placed pin: where the user clicked (map projection) and the address
/// the click reverse-geocoded to. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPoint {
    pub map_point: MapPoint,
    pub address: String,
}

/// Ordered collection of [`PlacedPoint`]s for one session.
///
/// Append-only: points are never edited or removed, and the store is reset
/// only by starting a new session. Entries are appended as reverse-geocode
/// responses *complete*, which with overlapping in-flight requests may differ
/// from click order. Duplicates are kept as independent entries.
#[derive(Debug, Default)]
pub struct PointStore {
    points: Vec<PlacedPoint>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolved pin to the end of the sequence.
    pub fn append(&mut self, map_point: MapPoint, address: String) {
        self.points.push(PlacedPoint { map_point, address });
    }

    /// Addresses of all points in insertion order, for centroid resolution.
    pub fn addresses(&self) -> Vec<String> {
        self.points.iter().map(|p| p.address.clone()).collect()
    }

    /// All placed points, for display.
    pub fn all(&self) -> &[PlacedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Zero points is a valid steady state (nothing placed yet).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
