//! Clustered teacher map controller
//!
//! [`TeacherMap`] drives a [`MapSurface`] from the search store's markers:
//!
//! 1. the host creates the surface and calls [`TeacherMap::on_load`] once the
//!    library is ready;
//! 2. the clustered source is configured and markers are fetched;
//! 3. every marker update replaces the source data wholesale;
//! 4. clicks and viewport moves are forwarded back through the `on_*` hooks.
//!
//! Markers are independent of list pagination: they use twice the list
//! radius and only the subject filter.

pub mod geojson;
pub mod popup;
pub mod surface;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use geojson::{Feature, FeatureCollection, LngLat, MarkerProperties};
pub use popup::{wrap_longitude, TeacherPopup};
pub use surface::{ClusterSettings, MapError, MapSurface};

use crate::config::MapConfig;
use crate::store::{MapStore, SearchOutcome, SearchStore};

/// Zoom used when the surface cannot tell how far to expand a cluster
pub const DEFAULT_EXPANSION_ZOOM: f64 = 14.0;

type SelectHandler = Arc<dyn Fn(u64) + Send + Sync>;

/// Result of mounting the map widget
pub enum MapMount {
    Ready(TeacherMap),
    /// No access token configured; show `message` instead of a map
    Placeholder { message: String },
}

pub struct TeacherMap {
    surface: Arc<dyn MapSurface>,
    search: Arc<SearchStore>,
    viewport: Arc<MapStore>,
    cluster: ClusterSettings,
    ready: AtomicBool,
    on_select: Option<SelectHandler>,
}

impl TeacherMap {
    /// Mount the widget, or a placeholder when no access token is configured
    pub fn mount(
        config: &MapConfig,
        surface: Arc<dyn MapSurface>,
        search: Arc<SearchStore>,
        viewport: Arc<MapStore>,
    ) -> MapMount {
        let has_token = config
            .access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());

        if !has_token {
            tracing::info!("No map access token configured, mounting placeholder");
            return MapMount::Placeholder {
                message: crate::i18n::t!("map.placeholder").to_string(),
            };
        }

        MapMount::Ready(Self {
            surface,
            search,
            viewport,
            cluster: ClusterSettings {
                max_zoom: config.cluster_max_zoom,
                radius: config.cluster_radius,
            },
            ready: AtomicBool::new(false),
            on_select: None,
        })
    }

    /// Callback invoked with the teacher id when "view profile" is chosen
    pub fn with_select_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(handler));
        self
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Center and zoom the surface should open at
    pub async fn initial_view(&self) -> (LngLat, f64) {
        let state = self.viewport.snapshot().await;
        (
            LngLat::new(state.map_center.lng, state.map_center.lat),
            state.map_zoom,
        )
    }

    /// Surface finished loading: configure the source and fetch markers
    pub async fn on_load(&self) -> Result<(), MapError> {
        self.surface.configure_cluster_source(&self.cluster)?;
        self.ready.store(true, Ordering::SeqCst);
        tracing::debug!(
            max_zoom = self.cluster.max_zoom,
            radius = self.cluster.radius,
            "Map ready"
        );
        self.refresh_markers().await?;
        Ok(())
    }

    /// Fetch markers for the current anchor and push them to the surface
    pub async fn refresh_markers(&self) -> Result<SearchOutcome, MapError> {
        let outcome = self.search.load_map_markers().await;
        if outcome == SearchOutcome::Applied {
            self.sync_markers().await?;
        }
        Ok(outcome)
    }

    /// Replace the surface data with the store's current markers
    ///
    /// Returns the number of features pushed; nothing is pushed before the
    /// surface is ready.
    pub async fn sync_markers(&self) -> Result<usize, MapError> {
        if !self.is_ready() {
            return Ok(0);
        }
        let markers = self.search.map_markers().await;
        let collection = FeatureCollection::from_markers(&markers);
        let count = collection.len();
        self.surface.set_cluster_data(collection)?;
        tracing::debug!(count, "Markers pushed to map");
        Ok(count)
    }

    /// Zoom into a clicked cluster
    pub async fn on_cluster_click(&self, cluster_id: u64, center: LngLat) {
        match self.surface.cluster_expansion_zoom(cluster_id).await {
            Ok(zoom) => self
                .surface
                .ease_to(center, zoom.unwrap_or(DEFAULT_EXPANSION_ZOOM)),
            Err(e) => tracing::debug!(cluster_id, error = %e, "Cluster expansion failed"),
        }
    }

    /// Open the popup for a clicked teacher point
    pub fn on_marker_click(&self, feature: &Feature, click: LngLat) {
        let position = feature.position();
        let anchor = LngLat::new(wrap_longitude(position.lng, click.lng), position.lat);
        let html = TeacherPopup::new(&feature.properties).render_html();

        self.surface.close_popup();
        self.surface.show_popup(anchor, html);
    }

    /// "View profile" chosen in a popup
    pub fn on_view_profile(&self, teacher_id: u64) {
        match &self.on_select {
            Some(handler) => handler(teacher_id),
            None => tracing::debug!(teacher_id, "No select handler registered"),
        }
    }

    /// Viewport settled; remember it for the next mount
    pub async fn on_move_end(&self, center: LngLat, zoom: f64) {
        self.viewport.set_map_center(center.lat, center.lng).await;
        self.viewport.set_map_zoom(zoom).await;
    }
}
