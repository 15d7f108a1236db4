//! Slippy-map tiles: coordinates, the OpenStreetMap source, visible-tile
//! enumeration, and the async fetch/decode path.

use crate::geo::{MapPoint, EARTH_RADIUS_M};
use crate::viewport::MapViewport;

/// Half the Web Mercator world span in metres.
const HALF_WORLD_M: f64 = std::f64::consts::PI * EARTH_RADIUS_M;

/// Address of one tile in the slippy-map pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Anything that can produce a fetch URL for a tile coordinate.
pub trait TileSource: Send + Sync {
    fn url(&self, coord: TileCoord) -> String;
}

/// The default OpenStreetMap tile server, rotating across its subdomains.
pub struct OpenStreetMapSource {
    subdomains: Vec<&'static str>,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self {
            subdomains: vec!["a", "b", "c"],
        }
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        let idx = ((coord.x + coord.y) as usize) % self.subdomains.len();
        format!(
            "https://{}.tile.openstreetmap.org/{}/{}/{}.png",
            self.subdomains[idx], coord.z, coord.x, coord.y
        )
    }
}

/// Side length of a tile at zoom `z`, in map metres.
pub fn tile_span(z: u8) -> f64 {
    2.0 * HALF_WORLD_M / 2f64.powi(z as i32)
}

/// Map-projection point of a tile's top-left (north-west) corner.
pub fn tile_origin(coord: TileCoord) -> MapPoint {
    let span = tile_span(coord.z);
    MapPoint::new(
        -HALF_WORLD_M + coord.x as f64 * span,
        HALF_WORLD_M - coord.y as f64 * span,
    )
}

/// The tiles needed to cover a viewport of `width_px` × `height_px` screen
/// pixels. The tile zoom is the viewport zoom rounded to the nearest integer
/// level; x wraps around the antimeridian, y is clamped to the pyramid.
pub fn visible_tiles(viewport: &MapViewport, width_px: f64, height_px: f64) -> Vec<TileCoord> {
    let z = viewport.zoom.round().clamp(0.0, 19.0) as u8;
    let n = 1i64 << z;
    let span = tile_span(z);

    let min = viewport.map_at((-width_px / 2.0, height_px / 2.0));
    let max = viewport.map_at((width_px / 2.0, -height_px / 2.0));

    let tx0 = ((min.x + HALF_WORLD_M) / span).floor() as i64;
    let tx1 = ((max.x + HALF_WORLD_M) / span).floor() as i64;
    let ty0 = ((HALF_WORLD_M - max.y) / span).floor() as i64;
    let ty1 = ((HALF_WORLD_M - min.y) / span).floor() as i64;

    let mut tiles = Vec::new();
    for ty in ty0..=ty1 {
        if ty < 0 || ty >= n {
            continue;
        }
        for tx in tx0..=tx1 {
            let x = tx.rem_euclid(n) as u32;
            tiles.push(TileCoord { z, x, y: ty as u32 });
        }
    }
    tiles
}

/// Fetch and decode one tile into an [`egui::ColorImage`].
///
/// Runs on the tokio runtime; the caller delivers the result back to the UI
/// thread over the session event channel.
pub async fn fetch_tile(client: &reqwest::Client, url: &str) -> Result<egui::ColorImage, String> {
    let bytes = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| e.to_string())?
        .to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &img))
}
