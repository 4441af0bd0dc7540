use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A GeoJSON coordinate position: `[longitude, latitude, ...]` with an
/// optional third element (depth in kilometers in the earthquake feed).
///
/// Accessors are named so that consumers never index positionally; the
/// lon/lat order of the wire format stays confined to this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub Vec<f64>);

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self(vec![lng, lat])
    }

    pub fn lng(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn lat(&self) -> Option<f64> {
        self.0.get(1).copied()
    }

    pub fn depth(&self) -> Option<f64> {
        self.0.get(2).copied()
    }

    /// The position as a map coordinate, if both components are present
    pub fn lat_lng(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat()?, self.lng()?))
    }
}

/// GeoJSON geometry variants the two feeds can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

/// One GeoJSON feature: geometry plus free-form properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl Feature {
    /// Numeric property lookup; the USGS feed stores magnitude under "mag".
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.properties.as_ref()?.get(key)?.as_f64()
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}

/// A GeoJSON FeatureCollection. Feed-level metadata (`type`, `metadata`,
/// `bbox`) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_earthquake_point() {
        let json = r#"
        {
            "type": "FeatureCollection",
            "metadata": {"title": "USGS All Earthquakes, Past Week"},
            "features": [
                {
                    "type": "Feature",
                    "properties": {"mag": 6.1, "place": "off the coast of Honshu"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [140.0, 35.0, 95.0]
                    }
                }
            ]
        }
        "#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(feature.property_f64("mag"), Some(6.1));
        assert_eq!(feature.property_str("place"), Some("off the coast of Honshu"));

        match feature.geometry.as_ref().unwrap() {
            Geometry::Point { coordinates } => {
                assert_eq!(coordinates.lng(), Some(140.0));
                assert_eq!(coordinates.lat(), Some(35.0));
                assert_eq!(coordinates.depth(), Some(95.0));
            }
            other => panic!("expected point geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_plate_boundary_line() {
        let json = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"Name": "AF-AN"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[0.0, -54.0], [1.5, -54.3], [3.0, -54.9]]
                    }
                }
            ]
        }
        "#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        match collection.features[0].geometry.as_ref().unwrap() {
            Geometry::LineString { coordinates } => {
                assert_eq!(coordinates.len(), 3);
                // Two-component positions have no depth
                assert_eq!(coordinates[0].depth(), None);
                assert_eq!(
                    coordinates[0].lat_lng(),
                    Some(LatLng::new(-54.0, 0.0))
                );
            }
            other => panic!("expected line geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_feature_without_properties() {
        let json = r#"{"type": "Feature", "geometry": null}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert!(feature.geometry.is_none());
        assert_eq!(feature.property_f64("mag"), None);
        assert_eq!(feature.property_str("place"), None);
    }

    #[test]
    fn test_incomplete_position() {
        let position = Position(vec![12.5]);
        assert_eq!(position.lng(), Some(12.5));
        assert_eq!(position.lat(), None);
        assert_eq!(position.lat_lng(), None);
    }
}
