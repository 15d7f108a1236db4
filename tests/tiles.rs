use pinmap::geo::{LonLat, EARTH_RADIUS_M};
use pinmap::tiles::{tile_origin, tile_span, visible_tiles, OpenStreetMapSource, TileCoord, TileSource};
use pinmap::viewport::MapViewport;

#[test]
fn osm_urls_follow_the_zxy_scheme() {
    let source = OpenStreetMapSource::new();
    let url = source.url(TileCoord { z: 12, x: 3271, y: 2126 });
    assert!(url.starts_with("https://"));
    assert!(url.ends_with(".tile.openstreetmap.org/12/3271/2126.png"));
}

#[test]
fn osm_subdomain_choice_is_deterministic() {
    let source = OpenStreetMapSource::new();
    let coord = TileCoord { z: 5, x: 1, y: 2 };
    assert_eq!(source.url(coord), source.url(coord));
}

#[test]
fn zoom_zero_tile_spans_the_world() {
    let half_world = std::f64::consts::PI * EARTH_RADIUS_M;
    assert!((tile_span(0) - 2.0 * half_world).abs() < 1e-6);
    let origin = tile_origin(TileCoord { z: 0, x: 0, y: 0 });
    assert!((origin.x + half_world).abs() < 1e-6);
    assert!((origin.y - half_world).abs() < 1e-6);
}

#[test]
fn visible_tiles_cover_the_viewport_center() {
    let center = LonLat::new(107.6186, -6.9039).to_map();
    let vp = MapViewport::new(center, 12.0);
    let tiles = visible_tiles(&vp, 800.0, 600.0);
    assert!(!tiles.is_empty());

    // The tile containing the center point must be in the set.
    let span = tile_span(12);
    let half_world = std::f64::consts::PI * EARTH_RADIUS_M;
    let cx = ((center.x + half_world) / span).floor() as u32;
    let cy = ((half_world - center.y) / span).floor() as u32;
    assert!(
        tiles.iter().any(|t| t.x == cx && t.y == cy && t.z == 12),
        "center tile ({cx}, {cy}) missing from {tiles:?}"
    );
}

#[test]
fn visible_tiles_clamp_y_at_the_pole() {
    let top = LonLat::new(0.0, 85.0).to_map();
    let vp = MapViewport::new(top, 2.0);
    for tile in visible_tiles(&vp, 1000.0, 1000.0) {
        assert!(tile.y < 4, "y must stay inside the zoom-2 pyramid");
    }
}
