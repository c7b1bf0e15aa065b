//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

use ustaz::config::Config;
use ustaz::context::AppContext;
use ustaz::geo::{GeoError, GeoPosition, LocationProvider, PositionOptions};
use ustaz::map::{ClusterSettings, FeatureCollection, LngLat, MapError, MapSurface};

// ============================================================================
// Fixtures
// ============================================================================

/// Configuration pointing at the mock server, with a map token set
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_secs = 5;
    config.map.access_token = Some("test-token".to_string());
    config
}

/// In-memory context against the mock server
pub fn test_context(server: &MockServer) -> AppContext {
    context_with_provider(server, Arc::new(ScriptedProvider::fixed(30.1, 31.3)))
}

pub fn context_with_provider(server: &MockServer, provider: Arc<dyn LocationProvider>) -> AppContext {
    AppContext::new(test_config(server), None, provider).unwrap()
}

pub fn teacher_json(id: u64, first_name: &str) -> Value {
    json!({
        "id": id,
        "teacher_profile_id": id + 100,
        "user_id": id + 200,
        "first_name": first_name,
        "last_name": "Hassan",
        "avatar_url": null,
        "bio": null,
        "hourly_rate": 150.0,
        "currency": "EGP",
        "avg_rating": 4.6,
        "total_reviews": 12,
        "is_featured": false,
        "accepts_online": true,
        "accepts_in_person": true,
        "city": "Cairo",
        "governorate": "Cairo",
        "distance_km": 2.4
    })
}

/// `/v1/teachers/nearby` body
pub fn nearby_body(teachers: Vec<Value>, page: u32, total: u64, total_pages: u32) -> Value {
    json!({
        "success": true,
        "data": teachers,
        "meta": {
            "total": total,
            "page": page,
            "per_page": 20,
            "total_pages": total_pages,
            "search_radius_km": 10
        }
    })
}

pub fn marker_json(id: u64, lat: f64, lng: f64) -> Value {
    json!({
        "id": id,
        "first_name": "Mona",
        "last_name": "Adel",
        "hourly_rate": 120.0,
        "avg_rating": 4.8,
        "is_featured": true,
        "latitude": lat,
        "longitude": lng,
        "distance_km": 1.1
    })
}

pub fn user_json(id: u64, role: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Sara",
        "last_name": "Nabil",
        "email": "sara@example.com",
        "phone": null,
        "role": role,
        "avatar_url": null,
        "is_active": true,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

pub fn booking_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "reference": format!("BK-{id}"),
        "parent_id": 3,
        "teacher_id": 9,
        "subject_id": 2,
        "teacher_name": "Omar Hassan",
        "booking_date": "2026-11-02",
        "start_time": "16:00",
        "end_time": "17:00",
        "status": status,
        "location_type": "online",
        "total_price": 150.0
    })
}

// ============================================================================
// Location provider
// ============================================================================

/// Provider answering every one-shot request with a scripted result
pub struct ScriptedProvider {
    result: Result<GeoPosition, GeoError>,
    delay: Option<Duration>,
    watch_feed: Mutex<Option<UnboundedReceiver<GeoPosition>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn fixed(lat: f64, lng: f64) -> Self {
        Self::new(Ok(GeoPosition::new(lat, lng, 15.0)))
    }

    pub fn failing(error: GeoError) -> Self {
        Self::new(Err(error))
    }

    fn new(result: Result<GeoPosition, GeoError>) -> Self {
        Self {
            result,
            delay: None,
            watch_feed: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer only after `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Watch updates pushed by the test through the returned sender
    pub fn with_watch_feed(self) -> (Self, UnboundedSender<GeoPosition>) {
        let (tx, rx) = mpsc::unbounded();
        *self.watch_feed.lock().unwrap() = Some(rx);
        (self, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedProvider {
    async fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result
    }

    fn watch(&self, _options: &PositionOptions) -> BoxStream<'static, Result<GeoPosition, GeoError>> {
        match self.watch_feed.lock().unwrap().take() {
            Some(feed) => feed.map(Ok).boxed(),
            None => stream::pending().boxed(),
        }
    }
}

// ============================================================================
// Map surface
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Configure(ClusterSettings),
    SetData(FeatureCollection),
    EaseTo(LngLat, f64),
    ShowPopup(LngLat, String),
    ClosePopup,
}

/// Surface recording every call it receives
#[derive(Default)]
pub struct FakeSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    expansion_zoom: Option<f64>,
}

impl FakeSurface {
    pub fn with_expansion_zoom(zoom: f64) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            expansion_zoom: Some(zoom),
        }
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Last collection pushed to the source
    pub fn last_data(&self) -> Option<FeatureCollection> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::SetData(data) => Some(data),
            _ => None,
        })
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MapSurface for FakeSurface {
    fn configure_cluster_source(&self, settings: &ClusterSettings) -> Result<(), MapError> {
        self.record(SurfaceCall::Configure(*settings));
        Ok(())
    }

    fn set_cluster_data(&self, data: FeatureCollection) -> Result<(), MapError> {
        self.record(SurfaceCall::SetData(data));
        Ok(())
    }

    async fn cluster_expansion_zoom(&self, _cluster_id: u64) -> Result<Option<f64>, MapError> {
        Ok(self.expansion_zoom)
    }

    fn ease_to(&self, center: LngLat, zoom: f64) {
        self.record(SurfaceCall::EaseTo(center, zoom));
    }

    fn show_popup(&self, at: LngLat, html: String) {
        self.record(SurfaceCall::ShowPopup(at, html));
    }

    fn close_popup(&self) {
        self.record(SurfaceCall::ClosePopup);
    }
}
