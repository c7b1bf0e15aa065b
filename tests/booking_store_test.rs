//! Integration tests for the booking store using wiremock

mod common;

use common::{booking_json, test_context};
use serde_json::json;
use ustaz::models::{BookingStatus, CreateBookingPayload};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(bookings: Vec<serde_json::Value>, total: u64) -> serde_json::Value {
    json!({
        "success": true,
        "data": bookings,
        "meta": { "total": total, "page": 1, "per_page": 20, "total_pages": 1 }
    })
}

/// Status filter is sent as a query parameter
#[tokio::test]
async fn test_load_bookings_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings"))
        .and(query_param("status", "confirmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            vec![booking_json(1, "confirmed"), booking_json(2, "confirmed")],
            2,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.bookings
        .load_bookings(Some(BookingStatus::Confirmed), None)
        .await;

    let state = ctx.bookings.snapshot().await;
    assert_eq!(state.bookings.len(), 2);
    assert_eq!(state.bookings[0].status, BookingStatus::Confirmed);
    assert_eq!(state.pagination.total, 2);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

/// A transition replaces the matching list entry
#[tokio::test]
async fn test_confirm_replaces_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            vec![booking_json(1, "pending"), booking_json(2, "pending")],
            2,
        )))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/2/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": booking_json(2, "confirmed")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.bookings.load_bookings(None, None).await;
    ctx.bookings.confirm_booking(2).await;

    let state = ctx.bookings.snapshot().await;
    assert_eq!(state.bookings[0].status, BookingStatus::Pending);
    assert_eq!(state.bookings[1].status, BookingStatus::Confirmed);
    assert_eq!(state.current_booking.map(|b| b.id), Some(2));
}

/// Cancellation sends the reason
#[tokio::test]
async fn test_cancel_sends_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings/4/cancel"))
        .and(body_partial_json(json!({ "cancellation_reason": "Schedule conflict" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": booking_json(4, "cancelled")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.bookings.cancel_booking(4, "Schedule conflict").await;

    let current = ctx.bookings.snapshot().await.current_booking.unwrap();
    assert_eq!(current.status, BookingStatus::Cancelled);
    assert!(current.status.is_terminal());
}

/// Creation failures are stored and returned
#[tokio::test]
async fn test_create_booking_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/bookings"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The selected slot is no longer available."
        })))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    let payload = CreateBookingPayload {
        teacher_id: 9,
        subject_id: Some(2),
        ..CreateBookingPayload::default()
    };

    let result = ctx.bookings.create_booking(&payload).await;
    assert!(result.is_err());

    let state = ctx.bookings.snapshot().await;
    assert_eq!(
        state.error.as_deref(),
        Some("The selected slot is no longer available.")
    );
    assert!(!state.is_loading);

    ctx.bookings.clear_error().await;
    assert!(ctx.bookings.snapshot().await.error.is_none());
}

/// Upcoming bookings failures are silent
#[tokio::test]
async fn test_upcoming_failure_is_silent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [booking_json(5, "confirmed")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/bookings/upcoming"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.bookings.load_upcoming_bookings().await;
    ctx.bookings.load_upcoming_bookings().await;

    let state = ctx.bookings.snapshot().await;
    assert_eq!(state.upcoming_bookings.len(), 1);
    assert!(state.error.is_none());
}
