use geo::{Coord, LineString, MultiPolygon, Polygon};
use parkwatch_core::BoundaryGeometry;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Property values that mark a feature as part of the buffer zone.
static BUFFER_ZONE_MARKERS: &[&str] = &["buffer", "buffer_zone", "buffer-zone"];

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Feature {
    fn is_buffer_zone(&self) -> bool {
        let Some(properties) = &self.properties else {
            return false;
        };

        ["zone", "type"].iter().any(|key| {
            properties
                .get(*key)
                .and_then(Value::as_str)
                .is_some_and(|v| BUFFER_ZONE_MARKERS.contains(&v.to_lowercase().as_str()))
        })
    }
}

impl TryFrom<FeatureCollection> for BoundaryGeometry {
    type Error = String;

    fn try_from(value: FeatureCollection) -> Result<Self, Self::Error> {
        let mut park = Vec::new();
        let mut buffer = Vec::new();

        for feature in value.features {
            let target = if feature.is_buffer_zone() {
                &mut buffer
            } else {
                &mut park
            };

            match feature.geometry {
                Some(Geometry::Polygon { coordinates }) => target.push(polygon(coordinates)?),
                Some(Geometry::MultiPolygon { coordinates }) => {
                    for p in coordinates {
                        target.push(polygon(p)?);
                    }
                }
                Some(Geometry::Unsupported) | None => {}
            }
        }

        let buffer_zone = (!buffer.is_empty()).then(|| MultiPolygon::new(buffer));

        Ok(BoundaryGeometry::new(MultiPolygon::new(park), buffer_zone))
    }
}

fn polygon(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>, String> {
    let mut rings = rings.into_iter().map(ring);

    let exterior = rings
        .next()
        .ok_or_else(|| "polygon without exterior ring".to_string())??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>, String> {
    positions
        .into_iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(format!("position with {} element(s)", p.len())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}
