use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use umurage::api::{ApiError, ContentService, Fetcher, HttpFetcher, QueryCache};
use umurage::core::content::{ContentKind, ContentStatus};
use umurage::core::icons::CategoryIcon;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Service pointed at `<mock>/api`, the same shape as the real origin.
fn service_for(server: &MockServer) -> ContentService {
    let fetcher = HttpFetcher::new(&format!("{}/api", server.uri()), Duration::from_secs(5))
        .expect("mock URI is valid");
    ContentService::new(Arc::new(fetcher), Arc::new(QueryCache::new()))
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Endpoint Decoding
// ============================================================================

#[tokio::test]
async fn test_categories_resolve_icons() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/categories",
        json!([
            { "id": 1, "name": "Stories", "description": "Imigani" },
            { "id": 2, "name": "  music " },
            { "id": 3, "name": "Language" },
            { "id": 4, "name": "Dance" }
        ]),
    )
    .await;
    mount_json(&server, "/api/categories/3", json!({ "id": 3, "name": "Language" })).await;

    let svc = service_for(&server);
    let categories = assert_ok!(svc.list_categories().await);
    let icons: Vec<CategoryIcon> = categories.iter().map(|c| c.icon).collect();
    assert_eq!(
        icons,
        [
            CategoryIcon::Stories,
            CategoryIcon::Music,
            CategoryIcon::Language,
            CategoryIcon::Default
        ]
    );

    let language = assert_ok!(svc.get_category(3).await);
    assert_eq!(language.icon, CategoryIcon::Language);
}

#[tokio::test]
async fn test_content_lists_and_items() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/content/story",
        json!([
            {
                "id": 1,
                "title": "Ryangombe",
                "description": "The spirit king",
                "region": "Northern",
                "featured": true,
                "status": "approved",
                "createdAt": "2024-03-01T10:00:00Z"
            },
            { "id": 2, "title": "Sebitwa", "status": "pending" }
        ]),
    )
    .await;
    mount_json(
        &server,
        "/api/content/story/1",
        json!({
            "id": 1,
            "title": "Ryangombe",
            "content": "Long ago in the volcanoes",
            "status": "approved",
            "contributor": { "id": 7, "name": "Mukamana" }
        }),
    )
    .await;
    mount_json(&server, "/api/content/music", json!([{ "id": 5, "title": "Inanga" }])).await;

    let svc = service_for(&server);

    let stories = assert_ok!(svc.list_stories().await);
    assert_eq!(stories.len(), 2);
    assert!(stories[0].featured);
    assert_eq!(stories[0].region.as_deref(), Some("Northern"));
    assert!(stories[0].created_at.is_some());
    assert_eq!(stories[1].status, Some(ContentStatus::Pending));
    assert_eq!(stories[1].description, "");

    let story = assert_ok!(svc.get_story(1).await);
    assert_eq!(story.kind, ContentKind::Story);
    assert_eq!(story.content, "Long ago in the volcanoes");
    assert_eq!(story.credit(), Some("Mukamana"));

    let music = assert_ok!(svc.list_content(ContentKind::Music).await);
    assert_eq!(music[0].kind, ContentKind::Music);
}

#[tokio::test]
async fn test_events_endpoints() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/events",
        json!([{
            "id": 1,
            "title": "Umuganura",
            "location": "Nyanza",
            "date": "2024-08-02T09:00:00Z"
        }]),
    )
    .await;
    mount_json(&server, "/api/events/1", json!({ "id": 1, "title": "Umuganura" })).await;

    let svc = service_for(&server);
    let events = assert_ok!(svc.list_events().await);
    assert_eq!(events[0].location.as_deref(), Some("Nyanza"));
    assert!(events[0].date.is_some());

    let event = assert_ok!(svc.get_event(1).await);
    assert_eq!(event.title, "Umuganura");
}

#[tokio::test]
async fn test_submissions_endpoints() {
    let server = MockServer::start().await;
    let pending = json!({
        "id": 9,
        "title": "Igisakuzo",
        "categoryId": 2,
        "status": "pending",
        "submitterName": "Uwase"
    });
    mount_json(&server, "/api/submissions", json!([pending.clone()])).await;
    mount_json(&server, "/api/submissions/9", pending.clone()).await;
    mount_json(&server, "/api/submissions/category/2", json!([pending])).await;

    let svc = service_for(&server);
    let all = assert_ok!(svc.list_submissions().await);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].submitter_name.as_deref(), Some("Uwase"));

    let one = assert_ok!(svc.get_submission(9).await);
    assert_eq!(one.category_id, Some(2));

    let scoped = assert_ok!(svc.list_submissions_by_category(2).await);
    assert_eq!(scoped[0].status, ContentStatus::Pending);
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let svc = service_for(&server);
    let err = assert_err!(svc.list_events().await);
    assert_eq!(
        err,
        ApiError::Api {
            status: 500,
            message: "database down".to_string()
        }
    );
    assert_eq!(
        err.user_message(),
        "Could not load content. Check your connection and try again."
    );
}

#[tokio::test]
async fn test_not_found_has_its_own_message() {
    let server = MockServer::start().await;
    let svc = service_for(&server);

    let err = assert_err!(svc.get_story(404).await);
    assert!(matches!(err, ApiError::Api { status: 404, .. }));
    assert_eq!(err.user_message(), "That item could not be found.");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/content/art"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let svc = service_for(&server);
    let err = assert_err!(svc.list_content(ContentKind::Art).await);
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let fetcher = assert_ok!(HttpFetcher::new("http://127.0.0.1:1/api", Duration::from_secs(2)));
    let err = assert_err!(fetcher.get_json("/categories").await);
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn test_rejects_non_http_base_url() {
    let err = assert_err!(HttpFetcher::new("localhost:5000/api", Duration::from_secs(1)));
    assert!(matches!(err, ApiError::Config(_)));
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn test_concurrent_requests_share_one_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/content/proverb"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "title": "Akabando" }]))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = service_for(&server);
    let (a, b) = tokio::join!(
        svc.list_content(ContentKind::Proverb),
        svc.list_content(ContentKind::Proverb)
    );
    assert_eq!(assert_ok!(a), assert_ok!(b));

    // Served from cache afterwards
    assert_ok!(svc.list_content(ContentKind::Proverb).await);
}

#[tokio::test]
async fn test_invalidation_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/content/story"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let svc = service_for(&server);
    assert_ok!(svc.list_stories().await);
    assert_ok!(svc.list_stories().await);
    svc.invalidate_content(ContentKind::Story);
    assert_ok!(svc.list_stories().await);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/api/categories", json!([{ "id": 1, "name": "Art" }])).await;

    let svc = service_for(&server);
    assert_err!(svc.list_categories().await);
    let categories = assert_ok!(svc.list_categories().await);
    assert_eq!(categories[0].icon, CategoryIcon::Art);
}
