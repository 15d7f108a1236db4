//! The map view: center, zoom, screen↔map conversion, and the recenter
//! animation.
//!
//! The viewport is UI-framework-agnostic; it works in map metres and screen
//! pixel offsets relative to the widget center. The widget layer translates
//! egui positions into those offsets.

use std::time::{Duration, Instant};

use crate::geo::{resolution, MapPoint};

const DEFAULT_MIN_ZOOM: f64 = 1.0;
const DEFAULT_MAX_ZOOM: f64 = 19.0;

/// In-flight recenter animation state.
#[derive(Debug, Clone, Copy)]
struct Animation {
    from_center: MapPoint,
    to_center: MapPoint,
    from_zoom: f64,
    to_zoom: f64,
    start: Instant,
    duration: Duration,
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Current view of the map: center point, zoom level, and any animation in
/// progress. Best-effort visual state; none of these operations can fail.
#[derive(Debug, Clone)]
pub struct MapViewport {
    pub center: MapPoint,
    pub zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    animation: Option<Animation>,
}

impl MapViewport {
    pub fn new(center: MapPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            animation: None,
        }
    }

    /// The map point under a screen offset `(dx, dy)` in pixels from the
    /// widget center. Screen y grows downward, map y grows upward.
    pub fn map_at(&self, offset_px: (f64, f64)) -> MapPoint {
        let res = resolution(self.zoom);
        MapPoint::new(
            self.center.x + offset_px.0 * res,
            self.center.y - offset_px.1 * res,
        )
    }

    /// Inverse of [`map_at`](Self::map_at): the pixel offset from the widget
    /// center at which `point` appears.
    pub fn offset_of(&self, point: MapPoint) -> (f64, f64) {
        let res = resolution(self.zoom);
        (
            (point.x - self.center.x) / res,
            (self.center.y - point.y) / res,
        )
    }

    /// Shift the view by a drag delta in screen pixels.
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let res = resolution(self.zoom);
        self.center.x -= dx * res;
        self.center.y += dy * res;
        // A drag takes over from any recenter animation in progress.
        self.animation = None;
    }

    /// Change zoom by `delta` while keeping the map point under the given
    /// screen offset fixed (scroll-wheel zoom about the cursor).
    pub fn zoom_about(&mut self, offset_px: (f64, f64), delta: f64) {
        let anchor = self.map_at(offset_px);
        self.zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        let res = resolution(self.zoom);
        self.center.x = anchor.x - offset_px.0 * res;
        self.center.y = anchor.y + offset_px.1 * res;
        self.animation = None;
    }

    /// Start an eased recenter to `target` at `zoom`. Replaces any animation
    /// already in progress.
    pub fn animate_to(&mut self, target: MapPoint, zoom: f64) {
        self.animation = Some(Animation {
            from_center: self.center,
            to_center: target,
            from_zoom: self.zoom,
            to_zoom: zoom.clamp(self.min_zoom, self.max_zoom),
            start: Instant::now(),
            duration: Duration::from_millis(600),
        });
    }

    /// Advance the animation to `now`. Returns `true` while still animating
    /// (the caller should keep repainting).
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(anim) = self.animation else {
            return false;
        };
        let t = (now - anim.start).as_secs_f64() / anim.duration.as_secs_f64();
        if t >= 1.0 {
            self.center = anim.to_center;
            self.zoom = anim.to_zoom;
            self.animation = None;
            return false;
        }
        let e = ease_out_cubic(t);
        self.center = MapPoint::new(
            anim.from_center.x + (anim.to_center.x - anim.from_center.x) * e,
            anim.from_center.y + (anim.to_center.y - anim.from_center.y) * e,
        );
        self.zoom = anim.from_zoom + (anim.to_zoom - anim.from_zoom) * e;
        true
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}
