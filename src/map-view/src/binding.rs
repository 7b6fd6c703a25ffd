use std::sync::Arc;

use parkwatch_core::{BoundaryGeometry, VesselSnapshot};
use tokio::sync::watch;
use tracing::debug;

use crate::{RenderLayers, StoreState, VesselStore, project};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub vessels: bool,
    pub boundaries: bool,
}

impl SyncOutcome {
    pub fn changed(&self) -> bool {
        self.vessels || self.boundaries
    }
}

/// Pushes store snapshots into the map layers.
///
/// The vessel layer is only replaced when the store holds a new snapshot, and stays unbound
/// until the first refresh has succeeded.
pub struct RenderBinding {
    store: watch::Receiver<StoreState>,
    snapshot: Option<Arc<VesselSnapshot>>,
    boundaries: Option<Arc<BoundaryGeometry>>,
}

impl RenderBinding {
    pub fn new(store: &VesselStore) -> Self {
        Self::from_receiver(store.subscribe())
    }

    pub fn from_receiver(mut store: watch::Receiver<StoreState>) -> Self {
        store.mark_changed();

        Self {
            store,
            snapshot: None,
            boundaries: None,
        }
    }

    pub fn sync(&mut self, layers: &mut RenderLayers) -> SyncOutcome {
        let state = self.store.borrow_and_update();
        let mut outcome = SyncOutcome::default();

        if !state.is_loaded() {
            return outcome;
        }

        if !self
            .snapshot
            .as_ref()
            .is_some_and(|s| Arc::ptr_eq(s, &state.snapshot))
        {
            layers.replace_vessel_features(project(&state.snapshot));
            self.snapshot = Some(state.snapshot.clone());
            outcome.vessels = true;
        }

        let boundaries_changed = match (&self.boundaries, &state.boundaries) {
            (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        };
        if boundaries_changed {
            layers.replace_boundaries(state.boundaries.clone());
            self.boundaries = state.boundaries.clone();
            outcome.boundaries = true;
        }

        if outcome.changed() {
            debug!(
                vessels = outcome.vessels,
                boundaries = outcome.boundaries,
                revision = layers.revision(),
                "render layers updated"
            );
        }

        outcome
    }

    /// Resolves once the store has published something new.
    /// Returns `false` when the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.store.changed().await.is_ok()
    }
}
