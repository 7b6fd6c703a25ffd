use std::fmt::Display;

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ParkStatus;

/// Maritime Mobile Service Identity.
///
/// The backend is not consistent about sending it as a number or a string, both are accepted
/// and normalized to the textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "MmsiRepr", into = "String")]
pub struct Mmsi(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum MmsiRepr {
    Text(String),
    Number(u64),
}

/// A single vessel as reported by the backend for one poll cycle.
///
/// Records are never patched, a new poll replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub mmsi: Mmsi,
    pub imo: Option<String>,
    pub uuid: Option<Uuid>,
    pub name: Option<String>,
    pub vessel_type: Option<String>,
    pub type_specific: Option<String>,
    pub country: Option<String>,
    /// Speed over ground in knots.
    pub speed: Option<f64>,
    /// Course over ground in degrees.
    pub course: Option<f64>,
    /// True heading in degrees.
    pub heading: Option<f64>,
    pub destination: Option<String>,
    /// Distance to the park boundary in kilometers, computed by the backend.
    pub distance: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_in_park: bool,
    pub is_in_buffer_zone: bool,
}

impl Mmsi {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl VesselRecord {
    pub fn new(mmsi: Mmsi) -> Self {
        Self {
            mmsi,
            imo: None,
            uuid: None,
            name: None,
            vessel_type: None,
            type_specific: None,
            country: None,
            speed: None,
            course: None,
            heading: None,
            destination: None,
            distance: None,
            latitude: None,
            longitude: None,
            timestamp: None,
            is_in_park: false,
            is_in_buffer_zone: false,
        }
    }

    /// Returns the position as `(longitude, latitude)` if both coordinates are present and
    /// within WGS84 bounds.
    pub fn position(&self) -> Option<Point<f64>> {
        let (lat, lon) = (self.latitude?, self.longitude?);

        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        valid.then(|| Point::new(lon, lat))
    }

    pub fn status(&self) -> ParkStatus {
        ParkStatus::from_flags(self.is_in_park, self.is_in_buffer_zone)
    }
}

impl From<MmsiRepr> for Mmsi {
    fn from(value: MmsiRepr) -> Self {
        match value {
            MmsiRepr::Text(v) => Self(v.trim().to_string()),
            MmsiRepr::Number(v) => Self(v.to_string()),
        }
    }
}

impl From<Mmsi> for String {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl From<&str> for Mmsi {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Mmsi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
