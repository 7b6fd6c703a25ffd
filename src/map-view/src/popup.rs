use chrono::{DateTime, Utc};
use geo::Point;
use parkwatch_core::{Mmsi, ParkStatus};
use strum::{AsRefStr, Display};
use tokio::sync::watch;
use tracing::debug;

use crate::{FeatureAttributes, PopupContent, RenderFeature, popup_content};

/// The vessel detail popup as it was opened.
///
/// Attributes are copied at click time and do not follow later updates of the vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSession {
    pub id: u64,
    pub anchor: Point<f64>,
    pub status: ParkStatus,
    pub attributes: FeatureAttributes,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PopupState {
    #[default]
    Closed,
    Open(PopupSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CloseReason {
    Replaced,
    BackgroundClick,
    CloseButton,
    External,
    Teardown,
}

/// Where popups are actually drawn.
pub trait PopupSurface: Send {
    fn show(&mut self, session: &PopupSession);
    fn remove(&mut self, session_id: u64);
}

impl PopupSession {
    pub fn mmsi(&self) -> &Mmsi {
        &self.attributes.mmsi
    }

    pub fn content(&self) -> PopupContent {
        popup_content(&self.attributes)
    }
}

impl PopupState {
    pub fn session(&self) -> Option<&PopupSession> {
        match self {
            PopupState::Closed => None,
            PopupState::Open(s) => Some(s),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PopupState::Open(_))
    }
}

/// Owns the single vessel popup of one map instance.
///
/// An open popup is always removed from the surface before its replacement is shown.
pub struct PopupController {
    state: watch::Sender<PopupState>,
    surface: Box<dyn PopupSurface>,
    next_id: u64,
}

impl PopupController {
    pub fn new(surface: Box<dyn PopupSurface>) -> Self {
        let (state, _) = watch::channel(PopupState::Closed);

        Self {
            state,
            surface,
            next_id: 0,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state.borrow().clone()
    }

    pub fn current_id(&self) -> Option<u64> {
        self.state.borrow().session().map(|s| s.id)
    }

    pub fn subscribe(&self) -> watch::Receiver<PopupState> {
        self.state.subscribe()
    }

    /// Applies a click, a hit opens (or replaces) the popup and a miss closes it.
    pub fn click(&mut self, hit: Option<&RenderFeature>, anchor: Point<f64>) {
        match hit {
            Some(feature) => {
                self.open(feature, anchor);
            }
            None => {
                self.close(CloseReason::BackgroundClick);
            }
        }
    }

    pub fn open(&mut self, feature: &RenderFeature, anchor: Point<f64>) -> u64 {
        if let Some(previous) = self.current_id() {
            self.surface.remove(previous);
            debug!(session = previous, reason = %CloseReason::Replaced, "popup closed");
        }

        self.next_id += 1;
        let session = PopupSession {
            id: self.next_id,
            anchor,
            status: feature.status,
            attributes: feature.attributes.clone(),
            opened_at: Utc::now(),
        };

        self.surface.show(&session);
        debug!(session = session.id, mmsi = %session.mmsi(), "popup opened");

        let id = session.id;
        self.state.send_replace(PopupState::Open(session));
        id
    }

    /// Closing an already closed popup is a no-op, returns whether a popup was closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        let Some(id) = self.current_id() else {
            return false;
        };

        self.surface.remove(id);
        self.state.send_replace(PopupState::Closed);
        debug!(session = id, reason = %reason, "popup closed");

        true
    }

    /// Close affordance of a specific popup, ignored if that popup is no longer the open one.
    pub fn close_button(&mut self, session_id: u64) -> bool {
        if self.current_id() == Some(session_id) {
            self.close(CloseReason::CloseButton)
        } else {
            false
        }
    }
}
