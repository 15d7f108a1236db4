//! Geocoding: coordinate → address (reverse) and address → coordinate
//! (forward), behind the [`Geocoder`] trait so the rest of the crate never
//! touches the wire format.
//!
//! The shipped implementation talks to a Nominatim-compatible service. Every
//! call issues exactly one outbound request; there is no caching, retrying,
//! or deduplication — callers decide what a failure means.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::geo::LonLat;

/// Failure modes of a single geocoding call.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The network request itself failed (DNS, transport, non-2xx, bad JSON).
    #[error("geocoding service unavailable: {0}")]
    Unavailable(String),
    /// The service answered, but the response is missing an expected field.
    #[error("malformed geocoding response: {0}")]
    Malformed(String),
    /// A forward lookup matched nothing.
    #[error("no geocoding result for query")]
    NotFound,
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::Unavailable(e.to_string())
    }
}

/// The two operations the rest of the crate needs from a geocoding service.
///
/// Implemented by [`NominatimGeocoder`] for production and by in-memory stubs
/// in tests and demos.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// Resolve a geographic coordinate to a human-readable address.
    async fn reverse_geocode(&self, coord: LonLat) -> Result<String, GeocodeError>;

    /// Resolve a free-text query (typically an address) to a coordinate.
    ///
    /// Only the service's first/best match is used; ambiguous queries resolve
    /// silently to the top hit.
    async fn forward_geocode(&self, query: &str) -> Result<LonLat, GeocodeError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct SearchHit {
    /// Nominatim serializes coordinates as strings, not numbers.
    lat: String,
    lon: String,
}

/// Extract `display_name` from a reverse-geocoding response body.
pub fn parse_reverse_body(body: &str) -> Result<String, GeocodeError> {
    let resp: ReverseResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;
    resp.display_name
        .ok_or_else(|| GeocodeError::Malformed("response has no display_name".into()))
}

/// Extract the first hit's coordinate from a search response body.
pub fn parse_search_body(body: &str) -> Result<LonLat, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;
    let first = hits.first().ok_or(GeocodeError::NotFound)?;
    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("unparsable lat {:?}", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("unparsable lon {:?}", first.lon)))?;
    Ok(LonLat::new(lon, lat))
}

// ─────────────────────────────────────────────────────────────────────────────
// Nominatim client
// ─────────────────────────────────────────────────────────────────────────────

/// Geocoder backed by a Nominatim-compatible HTTP service.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base: Url,
}

impl NominatimGeocoder {
    /// Create a client for the service at `base` (e.g.
    /// `https://nominatim.openstreetmap.org`). Nominatim's usage policy
    /// requires an identifying user agent.
    pub fn new(base: &str, user_agent: &str) -> Result<Self, GeocodeError> {
        let base = Url::parse(base).map_err(|e| GeocodeError::Malformed(e.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GeocodeError> {
        self.base
            .join(path)
            .map_err(|e| GeocodeError::Malformed(e.to_string()))
    }

    async fn get_body(&self, url: Url) -> Result<String, GeocodeError> {
        log::debug!("geocode request: {url}");
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.text().await?)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, coord: LonLat) -> Result<String, GeocodeError> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("lat", &coord.lat.to_string())
            .append_pair("lon", &coord.lon.to_string());
        let body = self.get_body(url).await?;
        parse_reverse_body(&body)
    }

    async fn forward_geocode(&self, query: &str) -> Result<LonLat, GeocodeError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json");
        let body = self.get_body(url).await?;
        parse_search_body(&body)
    }
}
