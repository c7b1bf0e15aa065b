//! Domain services, one per REST resource
//!
//! Services are thin: they build the request, call [`ApiClient`](crate::api::ApiClient), unwrap the
//! response envelope and propagate every error unchanged. Catching and
//! converting errors is the state containers' job.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod payment;
pub mod subscription;
pub mod teacher_profile;
pub mod teacher_search;

pub use admin::{AdminService, UserQuery};
pub use auth::{AuthData, AuthService, LoginPayload, RegisterPayload, SignupRole};
pub use booking::{BookingQuery, BookingService};
pub use payment::{PaymentService, ReviewService};
pub use subscription::SubscriptionService;
pub use teacher_profile::{
    AvailabilitySlot, Certification, LocationPayload, LocationUpdate, SubjectOffer,
    TeacherProfileService, TeacherProfileUpdate, VerificationRequest,
};
pub use teacher_search::{MarkerQuery, NearbyQuery, SearchResponse, TeacherSearchService};
