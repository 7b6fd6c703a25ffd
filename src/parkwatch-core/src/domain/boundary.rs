use geo::MultiPolygon;

/// Outline of the protected area and its surrounding buffer zone.
///
/// Produced by the backend, the dashboard treats it as opaque geometry and never
/// classifies vessels against it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryGeometry {
    pub park: MultiPolygon<f64>,
    pub buffer_zone: Option<MultiPolygon<f64>>,
}

impl BoundaryGeometry {
    pub fn new(park: MultiPolygon<f64>, buffer_zone: Option<MultiPolygon<f64>>) -> Self {
        Self { park, buffer_zone }
    }

    pub fn is_empty(&self) -> bool {
        self.park.0.is_empty() && self.buffer_zone.as_ref().is_none_or(|b| b.0.is_empty())
    }
}
