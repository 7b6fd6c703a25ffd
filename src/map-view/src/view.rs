use geo::Point;
use parkwatch_core::VesselRecord;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    CloseReason, CursorStyle, HitTester, HoverState, LayerId, PopupController, PopupState,
    PopupSurface, RenderBinding, RenderLayers, ScreenPoint, Settings, SyncOutcome, VesselStore,
    Viewport,
};

pub type VesselClickCallback = Box<dyn FnMut(&VesselRecord) + Send>;
pub type MapReadyCallback = Box<dyn FnOnce(&mut MapHandle<'_>) + Send>;

/// Input of a map instance, in canvas pixels where a position is involved.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    PointerMove(ScreenPoint),
    PointerLeave,
    Click(ScreenPoint),
    /// Close affordance of the popup with the given session id.
    PopupCloseButton(u64),
    ClosePopup,
    SetLayerVisibility(LayerId, bool),
    SetViewport(Viewport),
}

/// What the UI shell gets to drive the camera once the map is ready.
pub struct MapHandle<'a> {
    viewport: &'a mut Viewport,
    layers: &'a RenderLayers,
}

impl MapHandle<'_> {
    pub fn viewport(&self) -> &Viewport {
        self.viewport
    }

    pub fn fly_to(&mut self, center: Point<f64>, zoom: Option<f64>) {
        self.viewport.set_center(center);
        if let Some(zoom) = zoom {
            self.viewport.set_zoom(zoom);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn layers(&self) -> &RenderLayers {
        self.layers
    }
}

/// One map instance: render layers, camera, hover affordance and the vessel popup.
///
/// All map state is owned here and only touched from the task driving [`MapView::run`] (or the
/// caller of the synchronous methods). The store is only read through the [`RenderBinding`].
pub struct MapView {
    layers: RenderLayers,
    viewport: Viewport,
    binding: RenderBinding,
    hit_tester: HitTester,
    popup: PopupController,
    pointer: Option<ScreenPoint>,
    on_vessel_click: Option<VesselClickCallback>,
    on_ready: Option<MapReadyCallback>,
    ready: bool,
}

impl MapView {
    pub fn new(store: &VesselStore, settings: &Settings, surface: Box<dyn PopupSurface>) -> Self {
        Self {
            layers: RenderLayers::new(),
            viewport: settings.viewport(),
            binding: RenderBinding::new(store),
            hit_tester: settings.hit_tester(),
            popup: PopupController::new(surface),
            pointer: None,
            on_vessel_click: None,
            on_ready: None,
            ready: false,
        }
    }

    pub fn on_vessel_click(&mut self, callback: impl FnMut(&VesselRecord) + Send + 'static) {
        self.on_vessel_click = Some(Box::new(callback));
    }

    /// Registers the map-ready callback, it runs right away if the map is already ready.
    pub fn on_map_ready(&mut self, callback: impl FnOnce(&mut MapHandle<'_>) + Send + 'static) {
        if self.ready {
            callback(&mut self.map_handle());
        } else {
            self.on_ready = Some(Box::new(callback));
        }
    }

    /// Marks the map as loaded, binds whatever the store holds and fires the map-ready callback.
    pub fn ready(&mut self) {
        if self.ready {
            return;
        }

        self.ready = true;
        self.sync();
        info!("map ready");

        if let Some(callback) = self.on_ready.take() {
            callback(&mut self.map_handle());
        }
    }

    pub fn map_handle(&mut self) -> MapHandle<'_> {
        MapHandle {
            viewport: &mut self.viewport,
            layers: &self.layers,
        }
    }

    /// Pulls the latest store state into the layers.
    pub fn sync(&mut self) -> SyncOutcome {
        let outcome = self.binding.sync(&mut self.layers);
        if outcome.vessels {
            self.refresh_hover();
        }
        outcome
    }

    pub fn set_layer_visibility(&mut self, layer: LayerId, visible: bool) -> bool {
        let changed = self.layers.set_visibility(layer, visible);
        if changed {
            debug!(layer = %layer, visible, "layer visibility changed");
            if layer == LayerId::Vessels {
                self.refresh_hover();
            }
        }
        changed
    }

    /// Returns the cursor to show when the hover state changed.
    pub fn pointer_move(&mut self, pointer: ScreenPoint) -> Option<CursorStyle> {
        self.pointer = Some(pointer);
        self.refresh_hover()
    }

    pub fn pointer_leave(&mut self) -> Option<CursorStyle> {
        self.pointer = None;
        self.refresh_hover()
    }

    /// Opens the popup for the vessel under `point`, or closes it when nothing is hit.
    /// Returns the id of the opened popup session.
    pub fn click(&mut self, point: ScreenPoint) -> Option<u64> {
        let hit = self
            .hit_tester
            .hit_test(&self.layers, &self.viewport, point);
        let anchor = self.viewport.unproject(point);

        match hit.and_then(|h| self.layers.feature(&h)) {
            Some(feature) => {
                let id = self.popup.open(feature, anchor);
                if let Some(callback) = self.on_vessel_click.as_mut() {
                    callback(feature.record.as_ref());
                }
                Some(id)
            }
            None => {
                self.popup.close(CloseReason::BackgroundClick);
                None
            }
        }
    }

    pub fn close_popup(&mut self) -> bool {
        self.popup.close(CloseReason::External)
    }

    pub fn dispatch(&mut self, event: MapEvent) -> Option<CursorStyle> {
        match event {
            MapEvent::PointerMove(p) => return self.pointer_move(p),
            MapEvent::PointerLeave => return self.pointer_leave(),
            MapEvent::Click(p) => {
                self.click(p);
            }
            MapEvent::PopupCloseButton(id) => {
                self.popup.close_button(id);
            }
            MapEvent::ClosePopup => {
                self.close_popup();
            }
            MapEvent::SetLayerVisibility(layer, visible) => {
                self.set_layer_visibility(layer, visible);
            }
            MapEvent::SetViewport(viewport) => {
                self.viewport = viewport;
                return self.refresh_hover();
            }
        }
        None
    }

    /// Drives the map until `cancel` fires or the event sender is dropped, then tears it down.
    pub async fn run(mut self, mut events: mpsc::Receiver<MapEvent>, cancel: CancellationToken) {
        self.ready();

        let mut store_open = true;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                changed = self.binding.changed(), if store_open => {
                    if changed {
                        self.sync();
                    } else {
                        store_open = false;
                    }
                }
                event = events.recv() => match event {
                    Some(event) => {
                        if let Some(cursor) = self.dispatch(event) {
                            debug!(cursor = cursor.as_ref(), "cursor changed");
                        }
                    }
                    None => break,
                },
            }
        }

        self.teardown();
    }

    /// Closes any open popup, nothing from the previous session stays on the surface.
    pub fn teardown(&mut self) {
        self.popup.close(CloseReason::Teardown);
        self.on_vessel_click = None;
        self.on_ready = None;
        info!("map torn down");
    }

    pub fn layers(&self) -> &RenderLayers {
        &self.layers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn popup_state(&self) -> PopupState {
        self.popup.state()
    }

    pub fn subscribe_popup(&self) -> watch::Receiver<PopupState> {
        self.popup.subscribe()
    }

    pub fn hover(&self) -> HoverState {
        self.hit_tester.hover()
    }

    fn refresh_hover(&mut self) -> Option<CursorStyle> {
        let hit = self.pointer.is_some_and(|p| {
            self.hit_tester
                .hit_test(&self.layers, &self.viewport, p)
                .is_some()
        });

        self.hit_tester.update_hover(hit).map(|s| s.cursor())
    }
}
