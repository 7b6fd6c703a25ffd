use std::sync::Arc;

use geo::Point;
use itertools::Itertools;
use parkwatch_core::{Mmsi, ParkStatus, VesselRecord, VesselSnapshot};
use tracing::debug;

pub static TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Display attributes of a vessel flattened onto its map feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAttributes {
    pub mmsi: Mmsi,
    pub name: Option<String>,
    pub imo: Option<String>,
    pub vessel_type: Option<String>,
    pub type_specific: Option<String>,
    pub country: Option<String>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub heading: Option<f64>,
    pub destination: Option<String>,
    pub distance: Option<f64>,
    pub is_in_park: bool,
    pub is_in_buffer_zone: bool,
    pub timestamp: Option<String>,
}

/// Point feature for one vessel of one snapshot, discarded on the next projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFeature {
    pub point: Point<f64>,
    pub status: ParkStatus,
    pub attributes: FeatureAttributes,
    pub record: Arc<VesselRecord>,
}

impl RenderFeature {
    pub fn mmsi(&self) -> &Mmsi {
        &self.attributes.mmsi
    }
}

/// Projects a snapshot into vessel features in render order.
///
/// Vessels without a valid position are left out. Features are ordered by status so that
/// vessels inside the park are drawn last, and by mmsi within the same status.
pub fn project(snapshot: &VesselSnapshot) -> Vec<RenderFeature> {
    snapshot
        .iter()
        .filter_map(project_record)
        .sorted_by_key(|f| f.status)
        .collect()
}

fn project_record(record: &Arc<VesselRecord>) -> Option<RenderFeature> {
    let Some(point) = record.position() else {
        debug!(mmsi = %record.mmsi, "skipping vessel without valid position");
        return None;
    };

    Some(RenderFeature {
        point,
        status: record.status(),
        attributes: FeatureAttributes::from(record.as_ref()),
        record: record.clone(),
    })
}

impl From<&VesselRecord> for FeatureAttributes {
    fn from(value: &VesselRecord) -> Self {
        Self {
            mmsi: value.mmsi.clone(),
            name: value.name.clone(),
            imo: value.imo.clone(),
            vessel_type: value.vessel_type.clone(),
            type_specific: value.type_specific.clone(),
            country: value.country.clone(),
            speed: value.speed,
            course: value.course,
            heading: value.heading,
            destination: value.destination.clone(),
            distance: value.distance,
            is_in_park: value.is_in_park,
            is_in_buffer_zone: value.is_in_buffer_zone,
            timestamp: value
                .timestamp
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}
