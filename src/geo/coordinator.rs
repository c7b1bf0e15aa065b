//! One-shot and continuous location acquisition

use futures::StreamExt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{
    GeoError, GeoPosition, LocationProvider, LocationResult, PermissionStatus, PositionOptions,
};
use crate::config::GeolocationConfig;
use crate::error::UstazErrorTrait;

type LastFix = Arc<Mutex<Option<(GeoPosition, Instant)>>>;

/// Requests and watches the user's position through a [`LocationProvider`]
pub struct GeolocationCoordinator {
    provider: Arc<dyn LocationProvider>,
    fallback: GeoPosition,
    one_shot: PositionOptions,
    continuous: PositionOptions,
    last_fix: LastFix,
}

impl GeolocationCoordinator {
    pub fn new(provider: Arc<dyn LocationProvider>, config: &GeolocationConfig) -> Self {
        Self {
            provider,
            fallback: GeoPosition::new(config.fallback_lat, config.fallback_lng, 0.0),
            one_shot: PositionOptions {
                high_accuracy: true,
                timeout: Some(config.timeout()),
                maximum_age: Duration::from_secs(config.max_age_secs),
            },
            continuous: PositionOptions {
                high_accuracy: false,
                timeout: None,
                maximum_age: Duration::from_secs(config.watch_max_age_secs),
            },
            last_fix: Arc::new(Mutex::new(None)),
        }
    }

    /// Override the one-shot timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.one_shot.timeout = Some(timeout);
        self
    }

    pub fn fallback(&self) -> GeoPosition {
        self.fallback
    }

    /// Read the position once
    ///
    /// Never fails: a denied, timed out or unavailable request reports the
    /// fallback position together with a readable error.
    pub async fn request_location(&self) -> LocationResult {
        if !self.provider.is_supported() {
            tracing::info!("Geolocation unsupported, using fallback position");
            return self.degraded(GeoError::Unsupported);
        }

        if let Some(position) = self.cached(self.one_shot.maximum_age) {
            tracing::debug!(lat = position.lat, lng = position.lng, "Reusing cached position");
            return LocationResult {
                position,
                permission_status: PermissionStatus::Granted,
                error: None,
            };
        }

        let request = self.provider.current_position(&self.one_shot);
        let outcome = match self.one_shot.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(GeoError::Timeout)),
            None => request.await,
        };

        match outcome {
            Ok(position) => {
                record_fix(&self.last_fix, position);
                tracing::debug!(
                    lat = position.lat,
                    lng = position.lng,
                    accuracy = position.accuracy,
                    "Position acquired"
                );
                LocationResult {
                    position,
                    permission_status: PermissionStatus::Granted,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location request failed, using fallback position");
                self.degraded(e)
            }
        }
    }

    /// Start continuous low-accuracy updates
    ///
    /// Errors from the provider are skipped. Updates stop when the returned
    /// handle is cleared or dropped.
    pub fn watch_position<F>(&self, on_update: F) -> WatchHandle
    where
        F: Fn(GeoPosition) + Send + 'static,
    {
        let mut updates = self.provider.watch(&self.continuous);
        let last_fix = Arc::clone(&self.last_fix);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = updates.next() => match update {
                        Some(Ok(position)) => {
                            record_fix(&last_fix, position);
                            on_update(position);
                        }
                        Some(Err(e)) => tracing::debug!(error = %e, "Ignoring watch error"),
                        None => break,
                    },
                    _ = shutdown_rx.changed() => break,
                }
            }
            tracing::debug!("Position watch stopped");
        });

        WatchHandle {
            task: Some(task),
            shutdown,
        }
    }

    /// Stop a watch started with [`watch_position`](Self::watch_position)
    pub fn clear_watch(&self, handle: WatchHandle) {
        handle.clear();
    }

    fn cached(&self, maximum_age: Duration) -> Option<GeoPosition> {
        let guard = self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        (*guard)
            .filter(|(_, at)| at.elapsed() <= maximum_age)
            .map(|(position, _)| position)
    }

    fn degraded(&self, error: GeoError) -> LocationResult {
        LocationResult {
            position: self.fallback,
            permission_status: error.permission_status(),
            error: Some(error.localized_desc()),
        }
    }
}

fn record_fix(last_fix: &LastFix, position: GeoPosition) {
    let mut guard = last_fix.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = Some((position, Instant::now()));
}

// ============================================================================
// Watch Handle
// ============================================================================

/// Handle to a running position watch
pub struct WatchHandle {
    task: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl WatchHandle {
    /// Stop receiving updates
    pub fn clear(mut self) {
        self.stop();
    }

    /// Check if the watch is still delivering updates
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn stop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{FixedLocationProvider, UnsupportedLocationProvider};

    #[tokio::test]
    async fn test_unsupported_degrades_to_fallback() {
        let coordinator = GeolocationCoordinator::new(
            Arc::new(UnsupportedLocationProvider),
            &GeolocationConfig::default(),
        );

        let result = coordinator.request_location().await;
        assert_eq!(result.position, GeoPosition::new(30.0444, 31.2357, 0.0));
        assert_eq!(result.permission_status, PermissionStatus::Denied);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_fixed_provider_grants() {
        let coordinator = GeolocationCoordinator::new(
            Arc::new(FixedLocationProvider::new(29.97, 31.13)),
            &GeolocationConfig::default(),
        );

        let result = coordinator.request_location().await;
        assert_eq!(result.permission_status, PermissionStatus::Granted);
        assert_eq!(result.position.lat, 29.97);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_watch_handle_clear() {
        let coordinator = GeolocationCoordinator::new(
            Arc::new(FixedLocationProvider::new(29.97, 31.13)),
            &GeolocationConfig::default(),
        );

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = coordinator.watch_position(move |position| {
            let _ = tx.send(position);
        });

        let first = rx.recv().await.unwrap();
        assert_eq!(first.lng, 31.13);
        coordinator.clear_watch(handle);
    }
}
