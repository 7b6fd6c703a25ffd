use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use tracing::warn;

use super::{Mmsi, VesselRecord};

/// Immutable set of vessels valid for one poll cycle, keyed by mmsi.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselSnapshot {
    vessels: BTreeMap<Mmsi, Arc<VesselRecord>>,
    timestamp: DateTime<Utc>,
}

impl VesselSnapshot {
    /// Builds a snapshot from the given records.
    /// If the same mmsi occurs more than once the last occurrence is kept.
    pub fn new(records: impl IntoIterator<Item = VesselRecord>, timestamp: DateTime<Utc>) -> Self {
        let mut vessels = BTreeMap::new();

        for record in records {
            let mmsi = record.mmsi.clone();
            if vessels.insert(mmsi, Arc::new(record)).is_some() {
                warn!("duplicate mmsi in vessel feed, keeping last occurrence");
            }
        }

        Self { vessels, timestamp }
    }

    pub fn empty() -> Self {
        Self {
            vessels: BTreeMap::new(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    pub fn get(&self, mmsi: &Mmsi) -> Option<&Arc<VesselRecord>> {
        self.vessels.get(mmsi)
    }

    /// Iterates the vessels ordered by mmsi.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<VesselRecord>> {
        self.vessels.values()
    }
}

impl Default for VesselSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
