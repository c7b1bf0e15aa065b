//! Teacher search, filter and pagination state
//!
//! The list and the map markers are two independent views of the same search
//! anchor:
//!
//! - the list follows the filters and pagination exactly;
//! - markers cover twice the list radius and honour only the subject filter.
//!
//! Both requests carry a sequence number taken when they are issued. A
//! response is applied only if no newer request of the same kind was issued
//! after it; older responses are dropped as stale.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::failure_message;
use crate::api::ApiError;
use crate::models::{MapMarker, SearchMeta, Teacher};
use crate::services::{MarkerQuery, NearbyQuery, TeacherSearchService};

/// Default list radius in meters
pub const DEFAULT_RADIUS: u32 = 10_000;

/// Default page size of the list
pub const DEFAULT_PER_PAGE: u32 = 20;

// ============================================================================
// Filters
// ============================================================================

/// Active search filters; `None` means "not filtered"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Meters
    pub radius: u32,
    pub subject_id: Option<u64>,
    pub grade_level_id: Option<u64>,
    pub min_rating: Option<f64>,
    pub max_price: Option<u32>,
    pub accepts_online: Option<bool>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            subject_id: None,
            grade_level_id: None,
            min_rating: None,
            max_price: None,
            accepts_online: None,
        }
    }
}

impl SearchFilters {
    /// Merge a partial update; fields the update leaves out are kept
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(radius) = update.radius {
            self.radius = radius;
        }
        if let Some(subject_id) = update.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(grade_level_id) = update.grade_level_id {
            self.grade_level_id = grade_level_id;
        }
        if let Some(min_rating) = update.min_rating {
            self.min_rating = min_rating;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(accepts_online) = update.accepts_online {
            self.accepts_online = accepts_online;
        }
    }

    /// List query for `anchor` at `page`
    pub fn nearby_query(&self, anchor: UserLocation, page: u32, per_page: u32) -> NearbyQuery {
        NearbyQuery {
            lat: anchor.lat,
            lng: anchor.lng,
            radius: self.radius,
            subject_id: self.subject_id,
            grade_level_id: self.grade_level_id,
            min_rating: self.min_rating,
            max_price: self.max_price,
            accepts_online: self.accepts_online,
            page,
            per_page,
        }
    }

    /// Marker query for `anchor`: double radius, subject filter only
    pub fn marker_query(&self, anchor: UserLocation) -> MarkerQuery {
        MarkerQuery {
            lat: anchor.lat,
            lng: anchor.lng,
            radius: u64::from(self.radius) * 2,
            subject_id: self.subject_id,
        }
    }
}

/// Partial filter change
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears it.
///
/// ```rust,ignore
/// let update = FilterUpdate::new().max_price(Some(200)).subject_id(None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub radius: Option<u32>,
    pub subject_id: Option<Option<u64>>,
    pub grade_level_id: Option<Option<u64>>,
    pub min_rating: Option<Option<f64>>,
    pub max_price: Option<Option<u32>>,
    pub accepts_online: Option<Option<bool>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, meters: u32) -> Self {
        self.radius = Some(meters);
        self
    }

    pub fn subject_id(mut self, subject_id: Option<u64>) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn grade_level_id(mut self, grade_level_id: Option<u64>) -> Self {
        self.grade_level_id = Some(grade_level_id);
        self
    }

    pub fn min_rating(mut self, min_rating: Option<f64>) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn max_price(mut self, max_price: Option<u32>) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn accepts_online(mut self, accepts_online: Option<bool>) -> Self {
        self.accepts_online = Some(accepts_online);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// State
// ============================================================================

/// Search anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub search_radius_km: f64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total: 0,
            total_pages: 0,
            search_radius_km: 10.0,
        }
    }
}

impl From<SearchMeta> for Pagination {
    fn from(meta: SearchMeta) -> Self {
        Self {
            page: meta.page,
            per_page: meta.per_page,
            total: meta.total,
            total_pages: meta.total_pages,
            search_radius_km: meta.search_radius_km,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub teachers: Vec<Teacher>,
    pub map_markers: Vec<MapMarker>,
    pub selected_teacher: Option<Teacher>,
    pub filters: SearchFilters,
    pub user_location: Option<UserLocation>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
}

/// What happened to a search or marker request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Response stored
    Applied,
    /// Request failed; previous results kept
    Failed,
    /// A newer request was issued meanwhile; response dropped
    Stale,
    /// No anchor set; nothing was sent
    NoAnchor,
}

// ============================================================================
// Store
// ============================================================================

pub struct SearchStore {
    service: TeacherSearchService,
    state: RwLock<SearchState>,
    search_seq: AtomicU64,
    marker_seq: AtomicU64,
}

impl SearchStore {
    pub fn new(service: TeacherSearchService) -> Self {
        Self {
            service,
            state: RwLock::new(SearchState::default()),
            search_seq: AtomicU64::new(0),
            marker_seq: AtomicU64::new(0),
        }
    }

    /// Set the anchor, go back to page 1 and search
    pub async fn set_user_location(&self, lat: f64, lng: f64) -> SearchOutcome {
        self.set_anchor(lat, lng).await;
        self.search_nearby(None).await
    }

    /// Set the anchor and go back to page 1 without searching
    pub async fn set_anchor(&self, lat: f64, lng: f64) {
        let mut state = self.state.write().await;
        state.user_location = Some(UserLocation { lat, lng });
        state.pagination.page = 1;
        tracing::debug!(lat, lng, "Search anchor updated");
    }

    /// Merge filters, go back to page 1 and search
    pub async fn update_filters(&self, update: FilterUpdate) -> SearchOutcome {
        {
            let mut state = self.state.write().await;
            state.filters.apply(update);
            state.pagination.page = 1;
            tracing::debug!(filters = ?state.filters, "Filters updated");
        }
        self.search_nearby(None).await
    }

    /// Restore default filters without searching
    pub async fn reset_filters(&self) {
        self.state.write().await.filters = SearchFilters::default();
    }

    pub async fn select_teacher(&self, teacher: Option<Teacher>) {
        self.state.write().await.selected_teacher = teacher;
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Query the list for `page` (current page when `None`)
    pub async fn search_nearby(&self, page: Option<u32>) -> SearchOutcome {
        let (seq, query) = {
            let mut state = self.state.write().await;
            let Some(anchor) = state.user_location else {
                tracing::debug!("Search skipped: no anchor");
                return SearchOutcome::NoAnchor;
            };
            let page = page.unwrap_or(state.pagination.page);
            let query = state
                .filters
                .nearby_query(anchor, page, state.pagination.per_page);
            state.is_loading = true;
            state.error = None;
            (self.search_seq.fetch_add(1, Ordering::SeqCst) + 1, query)
        };

        let result = self.service.search_nearby(&query).await;

        let mut state = self.state.write().await;
        if self.search_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, page = query.page, "Discarding stale search response");
            return SearchOutcome::Stale;
        }
        state.is_loading = false;

        match result {
            Ok(response) => {
                tracing::debug!(
                    count = response.data.len(),
                    total = response.meta.total,
                    page = response.meta.page,
                    "Search results applied"
                );
                state.teachers = response.data;
                state.pagination = Pagination::from(response.meta);
                SearchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Teacher search failed");
                state.error = Some(failure_message(&e, || {
                    crate::i18n::t!("search.failed").to_string()
                }));
                SearchOutcome::Failed
            }
        }
    }

    /// Refresh the map markers around the anchor
    ///
    /// Failures are logged only; the previous markers stay in place.
    pub async fn load_map_markers(&self) -> SearchOutcome {
        let (seq, query) = {
            let state = self.state.read().await;
            let Some(anchor) = state.user_location else {
                return SearchOutcome::NoAnchor;
            };
            (
                self.marker_seq.fetch_add(1, Ordering::SeqCst) + 1,
                state.filters.marker_query(anchor),
            )
        };

        let result = self.service.map_markers(&query).await;

        let mut state = self.state.write().await;
        if self.marker_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding stale marker response");
            return SearchOutcome::Stale;
        }

        match result {
            Ok(markers) => {
                tracing::debug!(count = markers.len(), radius = query.radius, "Markers loaded");
                state.map_markers = markers;
                SearchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load map markers");
                SearchOutcome::Failed
            }
        }
    }

    /// Fetch a full profile and make it the selected teacher
    pub async fn load_teacher_profile(&self, id: u64) -> Result<Teacher, ApiError> {
        let teacher = self.service.teacher_profile(id).await?;
        self.state.write().await.selected_teacher = Some(teacher.clone());
        Ok(teacher)
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    pub async fn teachers(&self) -> Vec<Teacher> {
        self.state.read().await.teachers.clone()
    }

    pub async fn map_markers(&self) -> Vec<MapMarker> {
        self.state.read().await.map_markers.clone()
    }

    pub async fn selected_teacher(&self) -> Option<Teacher> {
        self.state.read().await.selected_teacher.clone()
    }

    pub async fn filters(&self) -> SearchFilters {
        self.state.read().await.filters.clone()
    }

    pub async fn pagination(&self) -> Pagination {
        self.state.read().await.pagination
    }

    pub async fn user_location(&self) -> Option<UserLocation> {
        self.state.read().await.user_location
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}
