use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument, warn};

use crate::{RefreshOutcome, VesselStore};

/// Refreshes the store on a fixed interval until the store is torn down.
///
/// The first refresh is issued immediately. A slow cycle delays the following ticks instead of
/// bursting to catch up.
pub struct Poller {
    store: Arc<VesselStore>,
    interval: Duration,
}

impl Poller {
    pub fn new(store: Arc<VesselStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run_continuous(self) {
        let teardown = self.store.teardown_token();
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = teardown.cancelled() => {
                    info!("vessel store torn down, stopping poller");
                    return;
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    #[instrument(skip_all)]
    async fn run_cycle(&self) {
        match self.store.refresh().await {
            RefreshOutcome::Failed(kind) => error!("vessel refresh failed: {kind}"),
            RefreshOutcome::Stale => warn!("vessel refresh was superseded"),
            RefreshOutcome::Applied { .. } | RefreshOutcome::TornDown => {}
        }
    }
}
