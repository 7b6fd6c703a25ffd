use geo::Point;
use serde::Deserialize;

use crate::{DEFAULT_HIT_RADIUS_PX, HitTester, Viewport};

/// Initial camera and interaction settings of a map instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
    pub hit_radius_px: Option<f64>,
}

impl Settings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            Point::new(self.center_longitude, self.center_latitude),
            self.zoom,
            self.width,
            self.height,
        )
    }

    pub fn hit_tester(&self) -> HitTester {
        HitTester::new(self.hit_radius_px.unwrap_or(DEFAULT_HIT_RADIUS_PX))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            center_latitude: 41.25,
            center_longitude: 9.45,
            zoom: 10.0,
            width: 1024.0,
            height: 768.0,
            hit_radius_px: None,
        }
    }
}
