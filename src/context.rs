//! Application wiring
//!
//! [`AppContext`] builds every service and state container once and hands
//! them out as `Arc`s. There are no global instances; hosts (the CLI, tests,
//! an embedding UI) create a context and pass it where it is needed.

use std::sync::Arc;

use crate::api::{ApiClient, SessionStore};
use crate::config::Config;
use crate::error::Result;
use crate::geo::{
    FixedLocationProvider, GeolocationCoordinator, LocationProvider, UnsupportedLocationProvider,
};
use crate::map::{MapMount, MapSurface, TeacherMap};
use crate::services::{
    AdminService, AuthService, BookingService, PaymentService, ReviewService, SubscriptionService,
    TeacherProfileService, TeacherSearchService,
};
use crate::storage::{FileStore, KeyValueStore};
use crate::store::{AuthStore, BookingStore, MapStore, ResolvedTheme, SearchStore, ThemeStore};

/// Domain services sharing one [`ApiClient`]
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub teachers: TeacherSearchService,
    pub teacher_profile: TeacherProfileService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub reviews: ReviewService,
    pub subscriptions: SubscriptionService,
    pub admin: AdminService,
}

impl Services {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&api)),
            teachers: TeacherSearchService::new(Arc::clone(&api)),
            teacher_profile: TeacherProfileService::new(Arc::clone(&api)),
            bookings: BookingService::new(Arc::clone(&api)),
            payments: PaymentService::new(Arc::clone(&api)),
            reviews: ReviewService::new(Arc::clone(&api)),
            subscriptions: SubscriptionService::new(Arc::clone(&api)),
            admin: AdminService::new(api),
        }
    }
}

pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub services: Services,
    pub auth: Arc<AuthStore>,
    pub search: Arc<SearchStore>,
    pub bookings: Arc<BookingStore>,
    pub map: Arc<MapStore>,
    pub theme: Arc<ThemeStore>,
    pub geolocation: Arc<GeolocationCoordinator>,
}

impl AppContext {
    /// Wire everything from explicit parts
    ///
    /// Without `storage` the session and theme live only in memory.
    pub fn new(
        config: Config,
        storage: Option<Arc<dyn KeyValueStore>>,
        provider: Arc<dyn LocationProvider>,
    ) -> Result<Self> {
        let session = Arc::new(match &storage {
            Some(storage) => SessionStore::persistent(Arc::clone(storage)),
            None => SessionStore::in_memory(),
        });

        let api = Arc::new(ApiClient::new(&config.api, Arc::clone(&session))?);
        let services = Services::new(Arc::clone(&api));

        let probe = Arc::new(|| ResolvedTheme::Light);
        let theme = match storage {
            Some(storage) => ThemeStore::persistent(probe, storage),
            None => ThemeStore::new(probe),
        };

        Ok(Self {
            auth: Arc::new(AuthStore::new(services.auth.clone(), Arc::clone(&session))),
            search: Arc::new(SearchStore::new(services.teachers.clone())),
            bookings: Arc::new(BookingStore::new(services.bookings.clone())),
            map: Arc::new(MapStore::new(&config.map)),
            theme: Arc::new(theme),
            geolocation: Arc::new(GeolocationCoordinator::new(provider, &config.geolocation)),
            config,
            api,
            session,
            services,
        })
    }

    /// Wire everything with file storage and the configured position source
    pub fn from_config(config: Config) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.dir)?);

        let provider: Arc<dyn LocationProvider> = match config.geolocation.fixed_position() {
            Some((lat, lng)) => Arc::new(FixedLocationProvider::new(lat, lng)),
            None => Arc::new(UnsupportedLocationProvider),
        };

        Self::new(config, Some(storage), provider)
    }

    /// Mount the teacher map on `surface`
    pub fn mount_map(&self, surface: Arc<dyn MapSurface>) -> MapMount {
        TeacherMap::mount(
            &self.config.map,
            surface,
            Arc::clone(&self.search),
            Arc::clone(&self.map),
        )
    }
}
