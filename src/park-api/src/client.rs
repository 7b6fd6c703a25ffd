use async_trait::async_trait;
use http_client::{HttpClient, Url};
use parkwatch_core::{BoundaryGeometry, SourceResult, VesselQuery, VesselRecord, VesselSource};
use tracing::{debug, instrument};

use crate::{
    Result, Settings,
    error::error::{InvalidAddressSnafu, InvalidGeometrySnafu},
    geojson::FeatureCollection,
    models::{VesselsInParkResponse, VesselsResponse},
};

static VESSELS_IN_PARK_PATH: &str = "api/vessels/in-park";
static VESSELS_PATH: &str = "api/vessels";
static PARK_BOUNDARIES_PATH: &str = "api/park-boundaries";
static HEALTH_PATH: &str = "api/health";

#[derive(Debug, Clone)]
pub struct ParkApiClient {
    client: HttpClient,
}

impl ParkApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        // Paths are joined relative to the base so it must end with a slash to keep any prefix.
        let address = if settings.address.ends_with('/') {
            settings.address.clone()
        } else {
            format!("{}/", settings.address)
        };

        let base = Url::parse(&address).map_err(|e| {
            InvalidAddressSnafu {
                address: address.clone(),
                error_stringified: e.to_string(),
            }
            .build()
        })?;

        let client = HttpClient::builder(base)
            .timeout(settings.timeout)
            .max_retries(settings.max_retries)
            .build()?;

        Ok(Self { client })
    }

    #[instrument(skip(self))]
    pub async fn fetch_vessels_in_park(&self) -> Result<Vec<VesselRecord>> {
        let response: VesselsInParkResponse = self
            .client
            .get_json(VESSELS_IN_PARK_PATH, None::<&()>)
            .await?;

        debug!(count = response.vessels_in_park.len(), "received vessels in park");

        Ok(response
            .vessels_in_park
            .into_iter()
            .map(VesselRecord::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn fetch_vessels(&self, query: &VesselQuery) -> Result<Vec<VesselRecord>> {
        let response: VesselsResponse = self.client.get_json(VESSELS_PATH, Some(query)).await?;

        Ok(response.vessels.into_iter().map(VesselRecord::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn fetch_park_boundaries(&self) -> Result<BoundaryGeometry> {
        let collection: FeatureCollection = self
            .client
            .get_json(PARK_BOUNDARIES_PATH, None::<&()>)
            .await?;

        BoundaryGeometry::try_from(collection).map_err(|reason| {
            InvalidGeometrySnafu {
                url: self
                    .client
                    .url(PARK_BOUNDARIES_PATH)
                    .map(String::from)
                    .unwrap_or_default(),
                reason,
            }
            .build()
        })
    }

    pub async fn check_health(&self) -> Result<()> {
        self.client.get(HEALTH_PATH)?.send().await?;
        Ok(())
    }
}

#[async_trait]
impl VesselSource for ParkApiClient {
    async fn vessels_in_park(&self) -> SourceResult<Vec<VesselRecord>> {
        Ok(self.fetch_vessels_in_park().await?)
    }

    async fn search_vessels(&self, query: &VesselQuery) -> SourceResult<Vec<VesselRecord>> {
        Ok(self.fetch_vessels(query).await?)
    }

    async fn park_boundaries(&self) -> SourceResult<BoundaryGeometry> {
        Ok(self.fetch_park_boundaries().await?)
    }

    async fn health(&self) -> SourceResult<()> {
        Ok(self.check_health().await?)
    }
}
