use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use parkwatch_core::{
    BoundaryGeometry, SourceResult, VesselQuery, VesselRecord, VesselSource,
};
use tokio::sync::oneshot;

use crate::{PopupSession, PopupSurface};

type VesselResponse = SourceResult<Vec<VesselRecord>>;

/// A [`VesselSource`] whose vessel responses are queued up front by the test.
///
/// Responses are handed out in call order, gated ones only resolve once the test sends on the
/// returned sender. Calls beyond the queue get an empty vessel list.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<oneshot::Receiver<VesselResponse>>>,
    boundaries: Mutex<SourceResult<BoundaryGeometry>>,
    search_results: Mutex<Vec<VesselRecord>>,
    vessel_calls: AtomicUsize,
    boundary_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            boundaries: Mutex::new(Ok(BoundaryGeometry::test_default())),
            search_results: Mutex::new(vec![]),
            vessel_calls: AtomicUsize::new(0),
            boundary_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_ready(&self, response: VesselResponse) {
        let (tx, rx) = oneshot::channel();
        tx.send(response).ok();
        self.responses.lock().unwrap().push_back(rx);
    }

    pub fn push_gated(&self) -> oneshot::Sender<VesselResponse> {
        let (tx, rx) = oneshot::channel();
        self.responses.lock().unwrap().push_back(rx);
        tx
    }

    pub fn set_boundaries(&self, boundaries: SourceResult<BoundaryGeometry>) {
        *self.boundaries.lock().unwrap() = boundaries;
    }

    pub fn set_search_results(&self, records: Vec<VesselRecord>) {
        *self.search_results.lock().unwrap() = records;
    }

    pub fn vessel_calls(&self) -> usize {
        self.vessel_calls.load(Ordering::SeqCst)
    }

    pub fn boundary_calls(&self) -> usize {
        self.boundary_calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VesselSource for ScriptedSource {
    async fn vessels_in_park(&self) -> SourceResult<Vec<VesselRecord>> {
        self.vessel_calls.fetch_add(1, Ordering::SeqCst);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| Ok(vec![])),
            None => Ok(vec![]),
        }
    }

    async fn search_vessels(&self, _query: &VesselQuery) -> SourceResult<Vec<VesselRecord>> {
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn park_boundaries(&self) -> SourceResult<BoundaryGeometry> {
        self.boundary_calls.fetch_add(1, Ordering::SeqCst);
        self.boundaries.lock().unwrap().clone()
    }

    async fn health(&self) -> SourceResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SurfaceLog {
    live: Vec<u64>,
    removed: Vec<u64>,
    max_live: usize,
}

/// A [`PopupSurface`] that records what would be on screen, clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl RecordingSurface {
    /// Ids of the popups currently displayed.
    pub fn live(&self) -> Vec<u64> {
        self.log.lock().unwrap().live.clone()
    }

    /// Highest number of popups that were ever displayed at the same time.
    pub fn max_live(&self) -> usize {
        self.log.lock().unwrap().max_live
    }

    pub fn removed(&self) -> Vec<u64> {
        self.log.lock().unwrap().removed.clone()
    }
}

impl PopupSurface for RecordingSurface {
    fn show(&mut self, session: &PopupSession) {
        let mut log = self.log.lock().unwrap();
        log.live.push(session.id);
        log.max_live = log.max_live.max(log.live.len());
    }

    fn remove(&mut self, session_id: u64) {
        let mut log = self.log.lock().unwrap();
        log.live.retain(|id| *id != session_id);
        log.removed.push(session_id);
    }
}
