use chrono::{TimeZone, Utc};
use geo::{MultiPolygon, polygon};

use crate::{BoundaryGeometry, Mmsi, VesselRecord, VesselSnapshot};

impl VesselRecord {
    /// A fully populated record at the given position.
    pub fn test_default(mmsi: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            mmsi: Mmsi::new(mmsi),
            imo: Some(format!("9{mmsi:0>6}")),
            uuid: None,
            name: Some(format!("VESSEL {mmsi}")),
            vessel_type: Some("Cargo".into()),
            type_specific: Some("General Cargo".into()),
            country: Some("IT".into()),
            speed: Some(11.5),
            course: Some(215.0),
            heading: Some(213.0),
            destination: Some("OLBIA".into()),
            distance: Some(3.2),
            latitude: Some(latitude),
            longitude: Some(longitude),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap()),
            is_in_park: false,
            is_in_buffer_zone: false,
        }
    }

    pub fn in_park(mut self) -> Self {
        self.is_in_park = true;
        self
    }

    pub fn in_buffer_zone(mut self) -> Self {
        self.is_in_buffer_zone = true;
        self
    }

    /// Strips every optional attribute except the position.
    pub fn bare(self) -> Self {
        let mut bare = Self::new(self.mmsi);
        bare.latitude = self.latitude;
        bare.longitude = self.longitude;
        bare.is_in_park = self.is_in_park;
        bare.is_in_buffer_zone = self.is_in_buffer_zone;
        bare
    }
}

impl VesselSnapshot {
    pub fn test_new(records: impl IntoIterator<Item = VesselRecord>) -> Self {
        Self::new(records, Utc.with_ymd_and_hms(2024, 5, 17, 10, 31, 0).unwrap())
    }
}

impl BoundaryGeometry {
    /// Square park around the Strait of Bonifacio with a slightly larger buffer.
    pub fn test_default() -> Self {
        let park = polygon![
            (x: 9.0, y: 41.0),
            (x: 10.0, y: 41.0),
            (x: 10.0, y: 41.5),
            (x: 9.0, y: 41.5),
            (x: 9.0, y: 41.0),
        ];
        let buffer = polygon![
            (x: 8.8, y: 40.8),
            (x: 10.2, y: 40.8),
            (x: 10.2, y: 41.7),
            (x: 8.8, y: 41.7),
            (x: 8.8, y: 40.8),
        ];

        Self::new(
            MultiPolygon::new(vec![park]),
            Some(MultiPolygon::new(vec![buffer])),
        )
    }
}
