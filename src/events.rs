//! The session event channel: how background tasks report back to the UI.
//!
//! All mutation of session state (the point store, the tile cache, the
//! resolved centroid) happens on the UI thread while it drains this channel,
//! one event at a time. That serialization is what keeps appends and reads
//! atomic with respect to each other even though the network tasks themselves
//! overlap freely.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::centroid::{CentroidResult, ResolveError};
use crate::geo::MapPoint;
use crate::geocode::GeocodeError;
use crate::tiles::TileCoord;

/// An event produced by a background task for the UI thread.
pub enum SessionEvent {
    /// A click's reverse geocode completed; the pin can be placed.
    ///
    /// Events arrive in completion order, not click order: a later click may
    /// resolve first when its request is faster. That reordering is a known
    /// property of the session, inherited deliberately.
    PinResolved {
        map_point: MapPoint,
        address: String,
    },
    /// A click's reverse geocode failed; no pin is placed, later clicks are
    /// unaffected.
    PinFailed { error: GeocodeError },
    /// Middle-point resolution finished successfully.
    CentroidResolved(CentroidResult),
    /// Middle-point resolution failed as a whole; no partial result exists.
    CentroidFailed(ResolveError),
    /// A map tile finished downloading and decoding.
    TileLoaded {
        coord: TileCoord,
        image: egui::ColorImage,
    },
    /// A tile fetch failed; it will not be retried this session.
    TileFailed { coord: TileCoord },
}

/// Sender half handed to every spawned task, paired with the egui context so
/// a completion can wake the UI for a repaint.
#[derive(Clone)]
pub struct SessionSender {
    tx: Sender<SessionEvent>,
    ctx: egui::Context,
}

impl SessionSender {
    /// Deliver an event and request a repaint. A send error only means the
    /// UI is gone, so it is ignored.
    pub fn send(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
        self.ctx.request_repaint();
    }
}

/// Create the channel pair for one session.
pub fn session_channel(ctx: egui::Context) -> (SessionSender, Receiver<SessionEvent>) {
    let (tx, rx) = channel();
    (SessionSender { tx, ctx }, rx)
}
