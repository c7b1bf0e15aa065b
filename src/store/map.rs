//! Map viewport and user position state

use tokio::sync::RwLock;

use super::search::{UserLocation, DEFAULT_RADIUS};
use crate::config::MapConfig;
use crate::geo::{GeoPosition, GeolocationCoordinator, PermissionStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub current_position: Option<GeoPosition>,
    pub permission_status: PermissionStatus,
    pub is_locating: bool,
    pub error: Option<String>,
    pub map_center: UserLocation,
    pub map_zoom: f64,
    /// Meters
    pub radius: u32,
}

impl MapState {
    fn initial(config: &MapConfig) -> Self {
        Self {
            current_position: None,
            permission_status: PermissionStatus::Prompt,
            is_locating: false,
            error: None,
            map_center: UserLocation {
                lat: config.default_center_lat,
                lng: config.default_center_lng,
            },
            map_zoom: config.default_zoom,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::initial(&MapConfig::default())
    }
}

pub struct MapStore {
    state: RwLock<MapState>,
}

impl MapStore {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            state: RwLock::new(MapState::initial(config)),
        }
    }

    /// Locate the user and center the map on the result
    ///
    /// Always yields a position; on failure it is the fallback and `error`
    /// explains why.
    pub async fn request_location(&self, coordinator: &GeolocationCoordinator) -> GeoPosition {
        {
            let mut state = self.state.write().await;
            state.is_locating = true;
            state.error = None;
        }

        let result = coordinator.request_location().await;

        let mut state = self.state.write().await;
        state.current_position = Some(result.position);
        state.permission_status = result.permission_status;
        state.is_locating = false;
        state.error = result.error;
        state.map_center = UserLocation {
            lat: result.position.lat,
            lng: result.position.lng,
        };
        result.position
    }

    pub async fn set_map_center(&self, lat: f64, lng: f64) {
        self.state.write().await.map_center = UserLocation { lat, lng };
    }

    pub async fn set_map_zoom(&self, zoom: f64) {
        self.state.write().await.map_zoom = zoom;
    }

    pub async fn set_radius(&self, radius: u32) {
        self.state.write().await.radius = radius;
    }

    pub async fn snapshot(&self) -> MapState {
        self.state.read().await.clone()
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}
