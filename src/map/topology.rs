//! TopoJSON topology decoding.
//!
//! Arcs are shared between neighbouring shapes; a geometry lists arc indices
//! and the decoder stitches them back into standalone rings.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use std::collections::HashMap;

use super::error::MapError;

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct GeometryObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    arcs: serde_json::Value,
    #[serde(default)]
    geometries: Vec<GeometryObject>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    objects: HashMap<String, GeometryObject>,
}

/// A land mass in geographic coordinates (x = longitude, y = latitude).
#[derive(Debug, Clone, PartialEq)]
pub struct LandFeature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub shape: MultiPolygon<f64>,
}

#[derive(Debug)]
pub struct Topology {
    arcs: Vec<Vec<Coord<f64>>>,
    objects: HashMap<String, GeometryObject>,
}

impl Topology {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let raw: RawTopology = serde_json::from_str(json)?;
        let arcs = raw
            .arcs
            .iter()
            .map(|arc| decode_arc(arc, raw.transform))
            .collect();
        Ok(Self {
            arcs,
            objects: raw.objects,
        })
    }

    /// Expands the named object into land features. Members that are not
    /// polygonal (points, lines, null geometries) are skipped.
    pub fn features(&self, object: &str) -> Result<Vec<LandFeature>, MapError> {
        let root = self
            .objects
            .get(object)
            .ok_or_else(|| MapError::MissingObject(object.to_string()))?;

        let members: Vec<&GeometryObject> = match root.kind.as_deref() {
            Some("GeometryCollection") => root.geometries.iter().collect(),
            _ => vec![root],
        };

        let mut features = Vec::new();
        for geometry in members {
            if let Some(shape) = self.shape(geometry)? {
                features.push(LandFeature {
                    id: geometry.id.as_ref().map(id_to_string),
                    name: geometry
                        .properties
                        .as_ref()
                        .and_then(|p| p.get("name"))
                        .and_then(|n| n.as_str())
                        .map(String::from),
                    shape,
                });
            }
        }
        Ok(features)
    }

    fn shape(&self, geometry: &GeometryObject) -> Result<Option<MultiPolygon<f64>>, MapError> {
        match geometry.kind.as_deref() {
            Some("Polygon") => {
                let rings: Vec<Vec<i64>> = serde_json::from_value(geometry.arcs.clone())?;
                Ok(Some(MultiPolygon::new(vec![self.polygon(&rings)?])))
            }
            Some("MultiPolygon") => {
                let polygons: Vec<Vec<Vec<i64>>> = serde_json::from_value(geometry.arcs.clone())?;
                let polygons = polygons
                    .iter()
                    .map(|rings| self.polygon(rings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(MultiPolygon::new(polygons)))
            }
            _ => Ok(None),
        }
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Polygon<f64>, MapError> {
        let mut rings = rings
            .iter()
            .map(|arcs| self.ring(arcs))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
        Ok(Polygon::new(exterior, rings.collect()))
    }

    fn ring(&self, arcs: &[i64]) -> Result<LineString<f64>, MapError> {
        let mut points = self.line(arcs)?;
        if let Some(first) = points.first().copied() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(LineString::new(points))
    }

    /// Concatenates arcs, dropping the junction point each pair shares.
    fn line(&self, arcs: &[i64]) -> Result<Vec<Coord<f64>>, MapError> {
        let mut points: Vec<Coord<f64>> = Vec::new();
        for &index in arcs {
            let arc = if index < 0 {
                self.arcs.get(!index as usize)
            } else {
                self.arcs.get(index as usize)
            }
            .ok_or(MapError::ArcIndex(index))?;

            points.pop();
            if index < 0 {
                points.extend(arc.iter().rev());
            } else {
                points.extend(arc.iter());
            }
        }
        Ok(points)
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<Transform>) -> Vec<Coord<f64>> {
    let (mut x, mut y) = (0.0, 0.0);
    arc.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| match transform {
            Some(t) => {
                x += p[0];
                y += p[1];
                Coord {
                    x: x * t.scale[0] + t.translate[0],
                    y: y * t.scale[1] + t.translate[1],
                }
            }
            None => Coord { x: p[0], y: p[1] },
        })
        .collect()
}

fn id_to_string(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
