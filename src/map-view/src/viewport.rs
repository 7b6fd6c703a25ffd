use std::f64::consts::PI;

use geo::Point;

/// Side length in pixels of the world at zoom level 0.
pub const TILE_SIZE: f64 = 512.0;
pub const MAX_ZOOM: f64 = 22.0;
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Web Mercator view of the map canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: Point<f64>,
    zoom: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(center: Point<f64>, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_center(&mut self, center: Point<f64>) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(0.0, MAX_ZOOM);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Geographic point to canvas pixels, origin in the top left corner.
    pub fn project(&self, point: Point<f64>) -> ScreenPoint {
        let (cx, cy) = self.point_to_world(self.center);
        let (x, y) = self.point_to_world(point);

        ScreenPoint {
            x: x - cx + self.width / 2.0,
            y: y - cy + self.height / 2.0,
        }
    }

    /// Canvas pixels to geographic point.
    pub fn unproject(&self, screen: ScreenPoint) -> Point<f64> {
        let (cx, cy) = self.point_to_world(self.center);
        self.world_to_point(
            screen.x - self.width / 2.0 + cx,
            screen.y - self.height / 2.0 + cy,
        )
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    fn point_to_world(&self, point: Point<f64>) -> (f64, f64) {
        let size = self.world_size();
        let lat = point.y().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = (point.x() + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;

        (x, y)
    }

    fn world_to_point(&self, x: f64, y: f64) -> Point<f64> {
        let size = self.world_size();

        let lon = x / size * 360.0 - 180.0;
        let lat = (PI - 2.0 * PI * y / size).sinh().atan().to_degrees();

        Point::new(lon, lat)
    }
}
