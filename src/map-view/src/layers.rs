use std::{collections::HashSet, sync::Arc};

use parkwatch_core::{BoundaryGeometry, Mmsi};
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::RenderFeature;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerId {
    Vessels,
    ParkBoundary,
    BufferZone,
}

/// Reference to a rendered vessel feature, only valid for the layer revision it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRef {
    pub index: usize,
    pub mmsi: Mmsi,
    pub revision: u64,
}

/// Data and visibility of the map layers.
///
/// Layer data is only written by the [`crate::RenderBinding`], everything else reads it.
#[derive(Debug, Default)]
pub struct RenderLayers {
    vessels: Option<Arc<[RenderFeature]>>,
    boundaries: Option<Arc<BoundaryGeometry>>,
    hidden: HashSet<LayerId>,
    revision: u64,
}

impl RenderLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Features in render order, `None` until the first snapshot has been bound.
    pub fn vessel_features(&self) -> Option<&[RenderFeature]> {
        self.vessels.as_deref()
    }

    pub fn feature(&self, feature: &FeatureRef) -> Option<&RenderFeature> {
        if feature.revision != self.revision {
            return None;
        }

        self.vessel_features()?
            .get(feature.index)
            .filter(|f| f.mmsi() == &feature.mmsi)
    }

    pub fn boundaries(&self) -> Option<&BoundaryGeometry> {
        self.boundaries.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_visible(&self, layer: LayerId) -> bool {
        !self.hidden.contains(&layer)
    }

    /// Returns whether the visibility changed.
    pub fn set_visibility(&mut self, layer: LayerId, visible: bool) -> bool {
        if visible {
            self.hidden.remove(&layer)
        } else {
            self.hidden.insert(layer)
        }
    }

    pub(crate) fn replace_vessel_features(&mut self, features: Vec<RenderFeature>) {
        self.vessels = Some(features.into());
        self.revision += 1;
    }

    pub(crate) fn replace_boundaries(&mut self, boundaries: Option<Arc<BoundaryGeometry>>) {
        self.boundaries = boundaries;
    }
}
