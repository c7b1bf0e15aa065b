//! Integration tests for the teacher search store using wiremock

mod common;

use common::{marker_json, nearby_body, teacher_json, test_context};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use ustaz::store::{FilterUpdate, SearchOutcome};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Anchoring issues exactly one search with the default filters
#[tokio::test]
async fn test_anchor_triggers_default_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("radius", "10000"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .and(query_param_is_missing("subject_id"))
        .and(query_param_is_missing("max_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(1, "Omar"), teacher_json(2, "Laila")],
            1,
            42,
            3,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    let outcome = ctx.search.set_user_location(30.0, 31.2).await;
    assert_eq!(outcome, SearchOutcome::Applied);

    let state = ctx.search.snapshot().await;
    assert_eq!(state.teachers.len(), 2);
    assert_eq!(state.teachers[0].first_name, "Omar");
    assert_eq!(state.pagination.total, 42);
    assert_eq!(state.pagination.total_pages, 3);
    assert_eq!(state.pagination.page, 1);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

/// Changing a filter while on a later page restarts at page 1
#[tokio::test]
async fn test_filter_change_resets_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("max_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(1, "Omar")],
            1,
            60,
            3,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(41, "Hany")],
            3,
            60,
            3,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "1"))
        .and(query_param("max_price", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(7, "Dina")],
            1,
            5,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search.set_user_location(30.0, 31.2).await;
    assert_eq!(ctx.search.search_nearby(Some(3)).await, SearchOutcome::Applied);
    assert_eq!(ctx.search.pagination().await.page, 3);

    let outcome = ctx
        .search
        .update_filters(FilterUpdate::new().max_price(Some(200)))
        .await;
    assert_eq!(outcome, SearchOutcome::Applied);

    let state = ctx.search.snapshot().await;
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.filters.max_price, Some(200));
    assert_eq!(state.teachers[0].first_name, "Dina");
}

/// Without an anchor nothing is sent
#[tokio::test]
async fn test_no_anchor_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    assert_eq!(ctx.search.search_nearby(None).await, SearchOutcome::NoAnchor);
    assert_eq!(
        ctx.search
            .update_filters(FilterUpdate::new().subject_id(Some(3)))
            .await,
        SearchOutcome::NoAnchor
    );
    assert_eq!(ctx.search.load_map_markers().await, SearchOutcome::NoAnchor);
    assert!(!ctx.search.is_loading().await);
}

/// A failed search keeps the previous results and reports the server message
#[tokio::test]
async fn test_failure_keeps_previous_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(1, "Omar")],
            1,
            30,
            2,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Search backend offline" })),
        )
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search.set_user_location(30.0, 31.2).await;

    let outcome = ctx.search.search_nearby(Some(2)).await;
    assert_eq!(outcome, SearchOutcome::Failed);

    let state = ctx.search.snapshot().await;
    assert_eq!(state.teachers.len(), 1);
    assert_eq!(state.teachers[0].first_name, "Omar");
    assert_eq!(state.error.as_deref(), Some("Search backend offline"));
    assert!(!state.is_loading);

    ctx.search.clear_error().await;
    assert!(ctx.search.error().await.is_none());
}

/// Without a server message the generic text is used
#[tokio::test]
#[serial_test::serial(locale)]
async fn test_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    assert_eq!(
        ctx.search.set_user_location(30.0, 31.2).await,
        SearchOutcome::Failed
    );
    assert_eq!(ctx.search.error().await.as_deref(), Some("Search failed"));
}

/// Resetting filters restores defaults without a request
#[tokio::test]
async fn test_reset_filters_does_not_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![], 1, 0, 0)))
        .expect(2)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search.set_user_location(30.0, 31.2).await;
    ctx.search
        .update_filters(FilterUpdate::new().radius(25_000).min_rating(Some(4.0)))
        .await;
    assert_eq!(ctx.search.filters().await.radius, 25_000);

    ctx.search.reset_filters().await;
    let filters = ctx.search.filters().await;
    assert_eq!(filters.radius, 10_000);
    assert!(filters.min_rating.is_none());
}

/// An older response arriving after a newer one is dropped
#[tokio::test]
async fn test_stale_response_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(1, "Omar")],
            1,
            60,
            3,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nearby_body(vec![teacher_json(21, "Slow")], 2, 60, 3))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(
            vec![teacher_json(41, "Fast")],
            3,
            60,
            3,
        )))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search.set_user_location(30.0, 31.2).await;

    let search = Arc::clone(&ctx.search);
    let slow = tokio::spawn(async move { search.search_nearby(Some(2)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = ctx.search.search_nearby(Some(3)).await;
    let slow = slow.await.unwrap();

    assert_eq!(fast, SearchOutcome::Applied);
    assert_eq!(slow, SearchOutcome::Stale);

    let state = ctx.search.snapshot().await;
    assert_eq!(state.teachers[0].first_name, "Fast");
    assert_eq!(state.pagination.page, 3);
    assert!(!state.is_loading);
}

/// Markers use twice the list radius and only the subject filter
#[tokio::test]
async fn test_markers_use_double_radius() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![], 1, 0, 0)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/map-markers"))
        .and(query_param("radius", "20000"))
        .and(query_param("subject_id", "4"))
        .and(query_param_is_missing("min_rating"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [marker_json(1, 30.05, 31.24), marker_json(2, 30.06, 31.25)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search
        .update_filters(FilterUpdate::new().subject_id(Some(4)).min_rating(Some(4.5)))
        .await;
    ctx.search.set_user_location(30.0, 31.2).await;

    assert_eq!(ctx.search.load_map_markers().await, SearchOutcome::Applied);
    assert_eq!(ctx.search.map_markers().await.len(), 2);
}

/// Setting the anchor alone issues no list search
#[tokio::test]
async fn test_set_anchor_skips_list_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![], 1, 0, 0)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/map-markers"))
        .and(query_param("radius", "20000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [marker_json(1, 30.05, 31.24)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search
        .update_filters(FilterUpdate::new().subject_id(Some(4)))
        .await;
    ctx.search.set_anchor(30.0, 31.2).await;

    assert_eq!(ctx.search.load_map_markers().await, SearchOutcome::Applied);
    let state = ctx.search.snapshot().await;
    assert_eq!(state.map_markers.len(), 1);
    assert!(state.teachers.is_empty());
    assert_eq!(state.filters.subject_id, Some(4));
}

/// A failed marker refresh leaves the previous markers in place
#[tokio::test]
async fn test_marker_failure_keeps_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![], 1, 0, 0)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/map-markers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [marker_json(1, 30.05, 31.24)]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/map-markers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    ctx.search.set_user_location(30.0, 31.2).await;

    assert_eq!(ctx.search.load_map_markers().await, SearchOutcome::Applied);
    assert_eq!(ctx.search.load_map_markers().await, SearchOutcome::Failed);
    assert_eq!(ctx.search.map_markers().await.len(), 1);
    assert!(ctx.search.error().await.is_none());
}

/// Loading a profile selects the teacher
#[tokio::test]
async fn test_load_teacher_profile_selects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teachers/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": teacher_json(9, "Karim")
        })))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    let teacher = ctx.search.load_teacher_profile(9).await.unwrap();
    assert_eq!(teacher.full_name(), "Karim Hassan");
    assert_eq!(ctx.search.selected_teacher().await, Some(teacher));

    ctx.search.select_teacher(None).await;
    assert!(ctx.search.selected_teacher().await.is_none());
}
