use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::Utc;
use parkwatch_core::{
    BoundaryGeometry, SourceError, SourceErrorKind, SourceResult, VesselQuery, VesselRecord,
    VesselSnapshot, VesselSource,
};
use tokio::{sync::watch, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

/// Everything subscribers of the store can observe.
#[derive(Debug, Clone)]
pub struct StoreState {
    pub snapshot: Arc<VesselSnapshot>,
    pub boundaries: Option<Arc<BoundaryGeometry>>,
    pub last_error: Option<SourceError>,
    boundaries_fetched_at: Option<Instant>,
    applied_sequence: u64,
    boundaries_sequence: u64,
    error_sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { vessels: usize },
    /// A refresh issued later already completed, the response was discarded.
    Stale,
    Failed(SourceErrorKind),
    TornDown,
}

/// Latest vessel snapshot and park boundaries, refreshed from a [`VesselSource`].
///
/// Readers always see a complete snapshot, a new one is swapped in only after it has been
/// fully received. Responses are applied in the order their requests were issued, a response
/// that arrives after a newer one has been applied is dropped.
pub struct VesselStore {
    source: Arc<dyn VesselSource>,
    state: watch::Sender<StoreState>,
    sequence: AtomicU64,
    boundary_max_age: Duration,
    teardown: CancellationToken,
}

impl StoreState {
    /// Whether any refresh has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.applied_sequence > 0
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(VesselSnapshot::empty()),
            boundaries: None,
            last_error: None,
            boundaries_fetched_at: None,
            applied_sequence: 0,
            boundaries_sequence: 0,
            error_sequence: 0,
        }
    }
}

impl VesselStore {
    pub fn new(source: Arc<dyn VesselSource>, boundary_max_age: Duration) -> Self {
        let (state, _) = watch::channel(StoreState::default());

        Self {
            source,
            state,
            sequence: AtomicU64::new(0),
            boundary_max_age,
            teardown: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<VesselSnapshot> {
        self.state.borrow().snapshot.clone()
    }

    pub fn boundaries(&self) -> Option<Arc<BoundaryGeometry>> {
        self.state.borrow().boundaries.clone()
    }

    pub fn last_error(&self) -> Option<SourceError> {
        self.state.borrow().last_error.clone()
    }

    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Fetches vessels, and boundaries when they are stale, and applies the result.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> RefreshOutcome {
        if self.teardown.is_cancelled() {
            return RefreshOutcome::TornDown;
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let fetch_boundaries = self.boundaries_stale();

        let (vessels, boundaries) = tokio::join!(self.source.vessels_in_park(), async {
            if fetch_boundaries {
                Some(self.source.park_boundaries().await)
            } else {
                None
            }
        });

        if self.teardown.is_cancelled() {
            debug!("discarding response received after teardown");
            return RefreshOutcome::TornDown;
        }

        if let Err(e) = &vessels {
            error!("failed to refresh vessels: {e:?}");
        }
        if let Some(Err(e)) = &boundaries {
            error!("failed to refresh park boundaries: {e:?}");
        }

        let outcome = self.apply(sequence, vessels, boundaries);

        match outcome {
            RefreshOutcome::Applied { vessels } => {
                debug!(sequence, vessels, "applied vessel snapshot")
            }
            RefreshOutcome::Stale => warn!(sequence, "discarding stale vessel response"),
            RefreshOutcome::Failed(_) | RefreshOutcome::TornDown => {}
        }

        outcome
    }

    fn apply(
        &self,
        sequence: u64,
        vessels: SourceResult<Vec<VesselRecord>>,
        boundaries: Option<SourceResult<BoundaryGeometry>>,
    ) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::Stale;

        self.state.send_if_modified(|state| {
            if sequence <= state.applied_sequence {
                return false;
            }

            // Boundaries are applied even when the vessel fetch failed, so they are not
            // fetched again on every cycle while the vessel feed is down.
            let boundaries = match boundaries {
                Some(Ok(b)) if sequence > state.boundaries_sequence => {
                    state.boundaries = Some(Arc::new(b));
                    state.boundaries_fetched_at = Some(Instant::now());
                    state.boundaries_sequence = sequence;
                    None
                }
                Some(Ok(_)) | None => None,
                Some(Err(e)) => Some(e),
            };
            let boundaries_applied = state.boundaries_sequence == sequence;

            match vessels {
                Ok(records) => {
                    let snapshot = VesselSnapshot::new(records, Utc::now());
                    outcome = RefreshOutcome::Applied {
                        vessels: snapshot.len(),
                    };

                    state.snapshot = Arc::new(snapshot);
                    state.applied_sequence = sequence;
                    if sequence > state.error_sequence {
                        state.last_error = None;
                    }
                    if let Some(e) = boundaries {
                        state.last_error = Some(e);
                        state.error_sequence = sequence;
                    }

                    true
                }
                Err(e) => {
                    if sequence <= state.error_sequence {
                        return boundaries_applied;
                    }

                    outcome = RefreshOutcome::Failed(e.kind());
                    state.last_error = Some(e);
                    state.error_sequence = sequence;

                    true
                }
            }
        });

        outcome
    }

    fn boundaries_stale(&self) -> bool {
        match self.state.borrow().boundaries_fetched_at {
            None => true,
            Some(at) => at.elapsed() >= self.boundary_max_age,
        }
    }

    /// Vessel search, the result is returned to the caller and does not touch the snapshot.
    pub async fn search(&self, query: &VesselQuery) -> SourceResult<Vec<VesselRecord>> {
        self.source.search_vessels(query).await
    }

    pub async fn health(&self) -> bool {
        match self.source.health().await {
            Ok(()) => true,
            Err(e) => {
                warn!("backend health check failed: {e:?}");
                false
            }
        }
    }

    /// Stops polling and makes sure no in-flight response is applied afterwards.
    pub fn teardown(&self) {
        self.teardown.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }
}
