//! The immediate-mode map widget: tile raster, pin markers, centroid marker,
//! and pan/zoom/click input handling.

use std::collections::HashMap;

use egui::{Color32, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::geo::{resolution, MapPoint};
use crate::tiles::{tile_origin, tile_span, visible_tiles, TileCoord};
use crate::viewport::MapViewport;

/// Lifecycle of one tile in the session cache.
pub enum TileState {
    /// Fetch task spawned, nothing to draw yet.
    Loading,
    /// Fetch or decode failed; not retried this session.
    Failed,
    /// Uploaded to the GPU and ready to draw.
    Ready(egui::TextureHandle),
}

/// What one frame of the map widget produced.
#[derive(Default)]
pub struct MapResponse {
    /// A primary click on the map, in map-projection coordinates.
    pub clicked: Option<MapPoint>,
    /// Visible tiles with no cache entry yet; the app should start fetches.
    pub missing_tiles: Vec<TileCoord>,
}

/// Draw the map into the available space and apply input.
///
/// Mutates only the viewport (pan/zoom); pins, centroid, and the tile cache
/// are read-only here. Placing pins and fetching tiles stay with the app
/// shell, driven by the returned [`MapResponse`].
pub fn map_ui(
    ui: &mut Ui,
    viewport: &mut MapViewport,
    tile_cache: &HashMap<TileCoord, TileState>,
    pins: &[MapPoint],
    centroid: Option<MapPoint>,
) -> MapResponse {
    let size = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(230));

    let center = rect.center();
    let to_offset = |pos: Pos2| ((pos.x - center.x) as f64, (pos.y - center.y) as f64);

    // ── Input ────────────────────────────────────────────────────────────
    if response.dragged() {
        let d = response.drag_delta();
        viewport.pan_pixels(d.x as f64, d.y as f64);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = response
                .hover_pos()
                .map(to_offset)
                .unwrap_or((0.0, 0.0));
            viewport.zoom_about(anchor, (scroll as f64) * 0.003);
        }
    }
    let mut out = MapResponse::default();
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            out.clicked = Some(viewport.map_at(to_offset(pos)));
        }
    }

    // ── Tiles ────────────────────────────────────────────────────────────
    let res = resolution(viewport.zoom);
    for coord in visible_tiles(viewport, rect.width() as f64, rect.height() as f64) {
        match tile_cache.get(&coord) {
            Some(TileState::Ready(tex)) => {
                let origin = tile_origin(coord);
                let (ox, oy) = viewport.offset_of(origin);
                let side = (tile_span(coord.z) / res) as f32;
                let tile_rect = Rect::from_min_size(
                    Pos2::new(center.x + ox as f32, center.y + oy as f32),
                    Vec2::splat(side),
                );
                painter.image(
                    tex.id(),
                    tile_rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            Some(TileState::Loading) | Some(TileState::Failed) => {}
            None => out.missing_tiles.push(coord),
        }
    }

    // ── Markers ──────────────────────────────────────────────────────────
    let draw_pin = |point: MapPoint, fill: Color32| {
        let (ox, oy) = viewport.offset_of(point);
        let tip = Pos2::new(center.x + ox as f32, center.y + oy as f32);
        if !rect.expand(16.0).contains(tip) {
            return;
        }
        let head = tip - Vec2::new(0.0, 14.0);
        painter.line_segment([tip, head], Stroke::new(2.5, fill));
        painter.circle(head, 6.0, fill, Stroke::new(1.5, Color32::WHITE));
    };
    for pin in pins {
        draw_pin(*pin, Color32::from_rgb(200, 40, 40));
    }
    if let Some(c) = centroid {
        draw_pin(c, Color32::from_rgb(40, 90, 200));
    }

    painter.text(
        rect.right_bottom() - Vec2::new(4.0, 2.0),
        egui::Align2::RIGHT_BOTTOM,
        "© OpenStreetMap contributors",
        egui::FontId::proportional(10.0),
        Color32::from_gray(90),
    );

    out
}
