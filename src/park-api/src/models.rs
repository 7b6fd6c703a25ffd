use chrono::{DateTime, Utc};
use parkwatch_core::{Mmsi, VesselRecord};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct VesselsInParkResponse {
    pub vessels_in_park: Vec<VesselInPark>,
}

#[derive(Debug, Deserialize)]
pub struct VesselInPark {
    pub vessel: Vessel,
    pub position: Option<Position>,
    pub is_in_park: Option<bool>,
    pub is_in_buffer_zone: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct VesselsResponse {
    pub vessels: Vec<Vessel>,
}

#[derive(Debug, Deserialize)]
pub struct Vessel {
    pub mmsi: Mmsi,
    pub imo: Option<TextOrNumber>,
    pub uuid: Option<Uuid>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub vessel_type: Option<String>,
    pub type_specific: Option<String>,
    #[serde(alias = "country_iso")]
    pub country: Option<String>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub heading: Option<f64>,
    pub destination: Option<String>,
    pub distance: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(alias = "last_position_time")]
    pub timestamp: Option<DateTime<Utc>>,
    pub is_in_park: Option<bool>,
    pub is_in_buffer_zone: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(u64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(v) => v,
            TextOrNumber::Number(v) => v.to_string(),
        }
    }
}

impl From<Vessel> for VesselRecord {
    fn from(value: Vessel) -> Self {
        let Vessel {
            mmsi,
            imo,
            uuid,
            name,
            vessel_type,
            type_specific,
            country,
            speed,
            course,
            heading,
            destination,
            distance,
            latitude,
            longitude,
            timestamp,
            is_in_park,
            is_in_buffer_zone,
        } = value;

        Self {
            mmsi,
            imo: imo.map(String::from),
            uuid,
            name: non_blank(name),
            vessel_type: non_blank(vessel_type),
            type_specific: non_blank(type_specific),
            country: non_blank(country),
            speed,
            course,
            heading,
            destination: non_blank(destination),
            distance,
            latitude,
            longitude,
            timestamp,
            is_in_park: is_in_park.unwrap_or(false),
            is_in_buffer_zone: is_in_buffer_zone.unwrap_or(false),
        }
    }
}

impl From<VesselInPark> for VesselRecord {
    fn from(value: VesselInPark) -> Self {
        let VesselInPark {
            vessel,
            position,
            is_in_park,
            is_in_buffer_zone,
        } = value;

        let mut record = VesselRecord::from(vessel);

        if let Some(position) = position {
            record.latitude = position.latitude.or(record.latitude);
            record.longitude = position.longitude.or(record.longitude);
        }
        if let Some(v) = is_in_park {
            record.is_in_park = v;
        }
        if let Some(v) = is_in_buffer_zone {
            record.is_in_buffer_zone = v;
        }

        record
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
