//! Boundary to the map rendering library

use async_trait::async_trait;
use thiserror::Error;

use super::geojson::{FeatureCollection, LngLat};
use crate::error::{ErrorCategory, UstazErrorTrait};

/// Clustering parameters of the teacher source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSettings {
    /// Zoom above which points are no longer clustered
    pub max_zoom: u8,
    /// Pixels
    pub radius: u16,
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("teacher source is not configured")]
    NoSource,

    #[error("map surface error: {0}")]
    Surface(String),
}

impl UstazErrorTrait for MapError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoSource)
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::NoSource => crate::i18n::t!("errors.map.no_source").to_string(),
            Self::Surface(msg) => format!("{}: {msg}", crate::i18n::t!("errors.map.surface")),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Map
    }
}

/// Operations the map widget needs from a rendering library
///
/// Implementations own their interior state; every method takes `&self`.
#[async_trait]
pub trait MapSurface: Send + Sync {
    /// Create the clustered teacher source with an empty collection
    fn configure_cluster_source(&self, settings: &ClusterSettings) -> Result<(), MapError>;

    /// Replace the whole content of the teacher source
    fn set_cluster_data(&self, data: FeatureCollection) -> Result<(), MapError>;

    /// Zoom at which a cluster splits; `None` when the library has no answer
    async fn cluster_expansion_zoom(&self, cluster_id: u64) -> Result<Option<f64>, MapError>;

    fn ease_to(&self, center: LngLat, zoom: f64);

    /// Open a popup, replacing any open one
    fn show_popup(&self, at: LngLat, html: String);

    fn close_popup(&self);
}
