//! The application shell: owns the session state, drains the event channel,
//! and wires the map widget to the geocoding workflow.
//!
//! All session state lives here and is touched only from the UI thread while
//! events are drained, which keeps store appends and reads serialized even
//! though the geocode and tile tasks overlap on the runtime. Tasks are never
//! cancelled once spawned; a burst of clicks simply produces that many
//! concurrent reverse-geocode requests.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::time::Instant;

use eframe::egui;

use crate::centroid::{self, CentroidResult};
use crate::config::PinMapConfig;
use crate::events::{session_channel, SessionEvent, SessionSender};
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::map_ui::{map_ui, MapResponse, TileState};
use crate::points::PointStore;
use crate::tiles::{fetch_tile, OpenStreetMapSource, TileCoord, TileSource};
use crate::viewport::MapViewport;

/// The pinmap application.
pub struct PinMapApp {
    cfg: PinMapConfig,
    runtime: tokio::runtime::Runtime,
    rx: Receiver<SessionEvent>,
    tx: SessionSender,
    geocoder: NominatimGeocoder,
    tile_client: reqwest::Client,
    tile_source: OpenStreetMapSource,
    tile_cache: HashMap<TileCoord, TileState>,
    store: PointStore,
    viewport: MapViewport,
    /// Last successful resolution; cleared when a new one starts. The
    /// deep-link button exists only while this is `Some`.
    centroid: Option<CentroidResult>,
    resolving: bool,
    status: Option<String>,
}

impl PinMapApp {
    pub fn new(
        cfg: PinMapConfig,
        ctx: egui::Context,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let geocoder = NominatimGeocoder::new(&cfg.nominatim_base, &cfg.user_agent)?;
        let tile_client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()?;
        let (tx, rx) = session_channel(ctx);
        let viewport = MapViewport::new(cfg.initial_center.to_map(), cfg.initial_zoom);
        Ok(Self {
            cfg,
            runtime,
            rx,
            tx,
            geocoder,
            tile_client,
            tile_source: OpenStreetMapSource::new(),
            tile_cache: HashMap::new(),
            store: PointStore::new(),
            viewport,
            centroid: None,
            resolving: false,
            status: None,
        })
    }

    /// Apply every event the background tasks have delivered since the last
    /// frame. This is the only place session state changes.
    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                SessionEvent::PinResolved { map_point, address } => {
                    log::info!("pin placed: {address}");
                    self.store.append(map_point, address);
                }
                SessionEvent::PinFailed { error } => {
                    log::warn!("reverse geocoding failed: {error}");
                    self.status = Some(format!("Reverse geocoding failed: {error}"));
                }
                SessionEvent::CentroidResolved(result) => {
                    self.resolving = false;
                    self.viewport
                        .animate_to(result.map_point, self.cfg.centroid_zoom);
                    self.centroid = Some(result);
                    self.status = None;
                }
                SessionEvent::CentroidFailed(error) => {
                    log::warn!("middle-point resolution failed: {error}");
                    self.resolving = false;
                    self.status = Some(format!("Middle point failed: {error}"));
                }
                SessionEvent::TileLoaded { coord, image } => {
                    let tex = ctx.load_texture(
                        format!("tile-{}-{}-{}", coord.z, coord.x, coord.y),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.tile_cache.insert(coord, TileState::Ready(tex));
                }
                SessionEvent::TileFailed { coord } => {
                    self.tile_cache.insert(coord, TileState::Failed);
                }
            }
        }
    }

    /// Spawn a reverse-geocode task for a clicked map point. The click
    /// handler returns immediately; the pin appears when the response does.
    fn spawn_reverse(&self, map_point: crate::geo::MapPoint) {
        let geocoder = self.geocoder.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match geocoder.reverse_geocode(map_point.to_lon_lat()).await {
                Ok(address) => tx.send(SessionEvent::PinResolved { map_point, address }),
                Err(error) => tx.send(SessionEvent::PinFailed { error }),
            }
        });
    }

    /// Spawn the all-or-nothing middle-point resolution over the current
    /// addresses. The previous centroid is dropped up front so a failure can
    /// never leave a stale result (or its deep link) behind.
    fn spawn_resolve(&mut self) {
        self.centroid = None;
        self.resolving = true;
        self.status = None;
        let geocoder = self.geocoder.clone();
        let tx = self.tx.clone();
        let addresses = self.store.addresses();
        self.runtime.spawn(async move {
            match centroid::resolve(&geocoder, &addresses).await {
                Ok(result) => tx.send(SessionEvent::CentroidResolved(result)),
                Err(error) => tx.send(SessionEvent::CentroidFailed(error)),
            }
        });
    }

    fn spawn_tile_fetches(&mut self, missing: Vec<TileCoord>) {
        for coord in missing {
            self.tile_cache.insert(coord, TileState::Loading);
            let url = self.tile_source.url(coord);
            let client = self.tile_client.clone();
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                match fetch_tile(&client, &url).await {
                    Ok(image) => tx.send(SessionEvent::TileLoaded { coord, image }),
                    Err(e) => {
                        log::warn!("tile {coord:?} failed: {e}");
                        tx.send(SessionEvent::TileFailed { coord });
                    }
                }
            });
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("pinmap_controls")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Placed points");
                ui.separator();
                if self.store.is_empty() {
                    ui.weak("Click the map to drop a pin.");
                }
                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - 110.0).max(60.0))
                    .show(ui, |ui| {
                        for point in self.store.all() {
                            ui.label(&point.address);
                            ui.separator();
                        }
                    });

                ui.add_space(8.0);
                let can_resolve = !self.store.is_empty() && !self.resolving;
                if ui
                    .add_enabled(can_resolve, egui::Button::new("Go to middle point"))
                    .clicked()
                {
                    self.spawn_resolve();
                }
                if self.resolving {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Resolving…");
                    });
                }
                if let Some(result) = self.centroid {
                    if ui.button("Open in Google Maps").clicked() {
                        let link = result.deep_link(
                            &self.cfg.maps_search_base,
                            self.cfg.centroid_zoom as u8,
                        );
                        ctx.open_url(egui::OpenUrl::new_tab(link));
                    }
                }
                if let Some(status) = &self.status {
                    ui.add_space(4.0);
                    ui.colored_label(egui::Color32::from_rgb(200, 80, 60), status);
                }
            });
    }
}

impl eframe::App for PinMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        if self.viewport.advance(Instant::now()) {
            ctx.request_repaint();
        }

        self.side_panel(ctx);

        let response = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let pins: Vec<_> = self.store.all().iter().map(|p| p.map_point).collect();
                map_ui(
                    ui,
                    &mut self.viewport,
                    &self.tile_cache,
                    &pins,
                    self.centroid.map(|c| c.map_point),
                )
            })
            .inner;

        self.handle_map_response(response);
    }
}

impl PinMapApp {
    fn handle_map_response(&mut self, response: MapResponse) {
        if let Some(map_point) = response.clicked {
            self.spawn_reverse(map_point);
        }
        self.spawn_tile_fetches(response.missing_tiles);
    }
}

/// Launch pinmap in a native window. Blocks until the window closes.
pub fn run_pinmap(cfg: PinMapConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1100.0, 780.0)),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            let app = PinMapApp::new(cfg, cc.egui_ctx.clone())?;
            Ok(Box::new(app))
        }),
    )
}
