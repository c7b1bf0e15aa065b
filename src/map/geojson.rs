//! GeoJSON payload pushed into the clustering source

use serde::{Deserialize, Serialize};

use crate::models::MapMarker;

/// GeoJSON `type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoJsonType {
    FeatureCollection,
    Feature,
    Point,
}

/// Longitude/latitude pair in map order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: GeoJsonType,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: GeoJsonType,
    pub geometry: Point,
    pub properties: MarkerProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "type")]
    pub kind: GeoJsonType,
    /// `[lng, lat]`
    pub coordinates: [f64; 2],
}

/// Properties the popup reads back when a point is clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerProperties {
    pub id: u64,
    pub name: String,
    /// Markers carry no subject; kept for popup layout
    pub subject: String,
    pub rating: f64,
    pub reviews: u32,
    pub price: f64,
    pub is_featured: bool,
    pub distance_km: f64,
}

impl FeatureCollection {
    pub fn from_markers(markers: &[MapMarker]) -> Self {
        Self {
            kind: GeoJsonType::FeatureCollection,
            features: markers.iter().map(Feature::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Feature {
    pub fn position(&self) -> LngLat {
        let [lng, lat] = self.geometry.coordinates;
        LngLat { lng, lat }
    }
}

impl From<&MapMarker> for Feature {
    fn from(marker: &MapMarker) -> Self {
        Self {
            kind: GeoJsonType::Feature,
            geometry: Point {
                kind: GeoJsonType::Point,
                coordinates: [marker.longitude, marker.latitude],
            },
            properties: MarkerProperties {
                id: marker.id,
                name: marker.full_name(),
                subject: String::new(),
                rating: marker.avg_rating,
                reviews: 0,
                price: marker.hourly_rate,
                is_featured: marker.is_featured,
                distance_km: marker.distance_km,
            },
        }
    }
}
