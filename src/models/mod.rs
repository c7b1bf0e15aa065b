//! Wire types shared by the services and state containers
//!
//! Field names follow the API's snake_case JSON. Optional fields are `Option`
//! so a missing key decodes as `None`.

pub mod admin;
pub mod api_response;
pub mod booking;
pub mod payment;
pub mod subscription;
pub mod teacher;
pub mod user;

pub use admin::{ChartData, ChartPoint, DashboardStats, FinancialReport, ReportPeriod};
pub use api_response::{ApiResponse, DataResponse, PaginatedResponse, PaginationMeta, SearchMeta};
pub use booking::{Booking, BookingStatus, CancelledBy, CreateBookingPayload, LocationType};
pub use payment::{
    CreateReviewPayload, Payment, PaymentGateway, PaymentInitiation, PaymentStatus, PaymentType,
    Review,
};
pub use subscription::{
    FeaturedListing, FeaturedPlanType, SubscribeResult, SubscriptionPlan, SubscriptionStatus,
    TeacherSubscription,
};
pub use teacher::{
    GradeLevel, MapMarker, SchoolStage, Subject, Teacher, TeacherAvailability, TeacherLocation,
    TeacherSubject,
};
pub use user::{User, UserRole};
