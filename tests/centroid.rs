use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use pinmap::centroid::{resolve, ResolveError};
use pinmap::geo::LonLat;
use pinmap::geocode::{GeocodeError, Geocoder};

/// In-memory geocoder: fixed address table, optional per-address failures,
/// and a call counter.
struct StubGeocoder {
    table: HashMap<String, LonLat>,
    fail: Vec<String>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    fn new(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(a, lon, lat)| (a.to_string(), LonLat::new(*lon, *lat)))
                .collect(),
            fail: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_on(mut self, address: &str) -> Self {
        self.fail.push(address.to_string());
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for StubGeocoder {
    async fn reverse_geocode(&self, _coord: LonLat) -> Result<String, GeocodeError> {
        unimplemented!("resolution must only use forward geocoding")
    }

    async fn forward_geocode(&self, query: &str) -> Result<LonLat, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.iter().any(|f| f == query) {
            return Err(GeocodeError::Unavailable("stubbed outage".into()));
        }
        self.table.get(query).copied().ok_or(GeocodeError::NotFound)
    }
}

fn addresses(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn three_points_average_to_their_mean() {
    let geocoder = StubGeocoder::new(&[("a", 0.0, 0.0), ("b", 2.0, 0.0), ("c", 0.0, 2.0)]);
    let result = resolve(&geocoder, &addresses(&["a", "b", "c"]))
        .await
        .expect("all three lookups succeed");
    assert!(
        (result.geographic.lon - 2.0 / 3.0).abs() < 1e-12,
        "lon should be the arithmetic mean, got {}",
        result.geographic.lon
    );
    assert!(
        (result.geographic.lat - 2.0 / 3.0).abs() < 1e-12,
        "lat should be the arithmetic mean, got {}",
        result.geographic.lat
    );
    assert_eq!(geocoder.call_count(), 3, "one forward lookup per address");
}

#[tokio::test]
async fn single_point_is_its_own_centroid() {
    let geocoder = StubGeocoder::new(&[("only", 10.0, 20.0)]);
    let result = resolve(&geocoder, &addresses(&["only"])).await.unwrap();
    assert_eq!(result.geographic, LonLat::new(10.0, 20.0));
}

#[tokio::test]
async fn map_point_is_the_reprojected_centroid() {
    let geocoder = StubGeocoder::new(&[("only", 107.6186, -6.9039)]);
    let result = resolve(&geocoder, &addresses(&["only"])).await.unwrap();
    assert_eq!(result.map_point, result.geographic.to_map());
}

#[tokio::test]
async fn empty_input_fails_without_any_network_call() {
    let geocoder = StubGeocoder::new(&[]);
    let err = resolve(&geocoder, &[]).await.unwrap_err();
    assert!(matches!(err, ResolveError::NoPoints));
    assert_eq!(geocoder.call_count(), 0, "no lookups for an empty sequence");
}

#[tokio::test]
async fn one_failure_aborts_the_whole_resolution() {
    let geocoder = StubGeocoder::new(&[("a", 0.0, 0.0), ("b", 2.0, 0.0), ("c", 0.0, 2.0)])
        .failing_on("b");
    let err = resolve(&geocoder, &addresses(&["a", "b", "c"]))
        .await
        .expect_err("one failed lookup must fail the batch");
    match err {
        ResolveError::Geocode { index, address, .. } => {
            assert_eq!(index, 1);
            assert_eq!(address, "b");
        }
        other => panic!("expected Geocode error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_addresses_are_looked_up_and_averaged_independently() {
    let geocoder = StubGeocoder::new(&[("a", 6.0, 3.0), ("b", 0.0, 0.0)]);
    let result = resolve(&geocoder, &addresses(&["a", "a", "b"])).await.unwrap();
    assert_eq!(geocoder.call_count(), 3, "no deduplication of repeated queries");
    assert!((result.geographic.lon - 4.0).abs() < 1e-12);
    assert!((result.geographic.lat - 2.0).abs() < 1e-12);
}

#[test]
fn query_pair_swaps_components_exactly() {
    let centroid = LonLat::new(107.6186, -6.9039);
    assert_eq!(centroid.query_pair(), (-6.9039, 107.6186));
}

#[tokio::test]
async fn deep_link_puts_latitude_first() {
    let geocoder = StubGeocoder::new(&[("only", 107.5, -6.25)]);
    let result = resolve(&geocoder, &addresses(&["only"])).await.unwrap();
    let link = result.deep_link("https://www.google.com/maps/search/", 14);
    assert_eq!(
        link,
        "https://www.google.com/maps/search/?api=1&query=-6.25,107.5&zoom=14"
    );
}
