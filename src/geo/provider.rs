//! Location providers

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use super::{GeoError, GeoPosition, PositionOptions};

/// Source of position fixes
///
/// Implement this trait to plug in a platform positioning API.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the host can produce positions at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Read the current position once
    async fn current_position(&self, options: &PositionOptions) -> Result<GeoPosition, GeoError>;

    /// Stream of position updates; ends when the platform stops watching
    fn watch(&self, options: &PositionOptions) -> BoxStream<'static, Result<GeoPosition, GeoError>>;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: GeoPosition,
}

impl FixedLocationProvider {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            position: GeoPosition::new(lat, lng, 0.0),
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, GeoError> {
        Ok(self.position)
    }

    fn watch(&self, _options: &PositionOptions) -> BoxStream<'static, Result<GeoPosition, GeoError>> {
        stream::once(futures::future::ready(Ok(self.position))).boxed()
    }
}

/// Host without any positioning capability
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocationProvider;

#[async_trait]
impl LocationProvider for UnsupportedLocationProvider {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<GeoPosition, GeoError> {
        Err(GeoError::Unsupported)
    }

    fn watch(&self, _options: &PositionOptions) -> BoxStream<'static, Result<GeoPosition, GeoError>> {
        stream::empty().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options() -> PositionOptions {
        PositionOptions {
            high_accuracy: true,
            timeout: Some(Duration::from_secs(1)),
            maximum_age: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_fixed_provider() {
        let provider = FixedLocationProvider::new(30.0, 31.2);
        let position = provider.current_position(&options()).await.unwrap();
        assert_eq!(position, GeoPosition::new(30.0, 31.2, 0.0));

        let updates: Vec<_> = provider.watch(&options()).collect().await;
        assert_eq!(updates, vec![Ok(position)]);
    }

    #[tokio::test]
    async fn test_unsupported_provider() {
        let provider = UnsupportedLocationProvider;
        assert!(!provider.is_supported());
        assert_eq!(
            provider.current_position(&options()).await,
            Err(GeoError::Unsupported)
        );
        assert_eq!(provider.watch(&options()).count().await, 0);
    }
}
