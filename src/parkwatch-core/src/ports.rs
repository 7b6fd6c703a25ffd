use async_trait::async_trait;

use crate::{BoundaryGeometry, SourceResult, VesselQuery, VesselRecord};

/// The external backend that computes vessel positions and park membership.
///
/// An empty vessel list is a valid answer, not an error.
#[async_trait]
pub trait VesselSource: Send + Sync {
    async fn vessels_in_park(&self) -> SourceResult<Vec<VesselRecord>>;
    async fn search_vessels(&self, query: &VesselQuery) -> SourceResult<Vec<VesselRecord>>;
    async fn park_boundaries(&self) -> SourceResult<BoundaryGeometry>;
    async fn health(&self) -> SourceResult<()>;
}
