//! Integration tests using mock HTTP server
//!
//! Tests the full flow: descriptor → HTTP request → classification → notifications

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wprest_fetch::{
    CollectingSink, FetcherConfig, Notification, NotificationKind, PagedFetcher,
    RequestDescriptor,
};

fn fetcher_for(server: &MockServer) -> PagedFetcher {
    let config = FetcherConfig::new(format!("{}/wp-json/wp/v2/", server.uri()));
    PagedFetcher::new(config).unwrap()
}

fn category_items(count: usize) -> serde_json::Value {
    let items: Vec<_> = (1..=count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Cat \\u0026 {i}"),
                "slug": format!("caf%C3%A9-{i}"),
            })
        })
        .collect();
    json!(items)
}

fn scenario_a_descriptor() -> RequestDescriptor {
    RequestDescriptor::new("categories")
        .class("astra-portfolio-categories")
        .page(10, 1)
        .trigger("loaded")
}

async fn mount_categories(server: &MockServer, total: &str) {
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-wp-total", total)
                .set_body_json(category_items(5)),
        )
        .mount(server)
        .await;
}

// ============================================================================
// Success Scenarios
// ============================================================================

#[tokio::test]
async fn test_single_page_collection() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "5").await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    let notifications = sink.take();
    assert_eq!(notifications.len(), 2);

    match &notifications[0] {
        Notification::Success { trigger, envelope } => {
            assert_eq!(trigger, "loaded");
            assert_eq!(envelope.items_count, 5);
            assert!(!envelope.next_page);
            assert_eq!(envelope.items.len(), 5);
            assert_eq!(envelope.args, scenario_a_descriptor());
        }
        other => panic!("Expected success, got {other:?}"),
    }

    assert_eq!(
        notifications[1],
        Notification::Always {
            descriptor: scenario_a_descriptor()
        }
    );
}

#[tokio::test]
async fn test_more_pages_available() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "25").await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    let notifications = sink.take();
    let envelope = match &notifications[0] {
        Notification::Success { envelope, .. } => envelope,
        other => panic!("Expected success, got {other:?}"),
    };
    assert_eq!(envelope.items_count, 25);
    assert!(envelope.next_page);
    assert_eq!(notifications[1].kind(), NotificationKind::Always);
}

#[tokio::test]
async fn test_category_items_are_decoded_in_order() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "5").await;

    let fetcher = fetcher_for(&mock_server);
    let outcome = fetcher.fetch_page(&scenario_a_descriptor()).await;
    let envelope = outcome.envelope().expect("page");

    let names: Vec<_> = envelope
        .items
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Cat & 1", "Cat & 2", "Cat & 3", "Cat & 4", "Cat & 5"]
    );
    assert_eq!(envelope.items[0]["slug"], "café-1");
    assert_eq!(envelope.items[4]["id"], 5);
}

#[tokio::test]
async fn test_unrecognized_class_passes_items_through() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "5").await;

    let fetcher = fetcher_for(&mock_server);
    let descriptor = RequestDescriptor::new("categories")
        .class("tags")
        .trigger("loaded");
    let outcome = fetcher.fetch_page(&descriptor).await;
    let envelope = outcome.envelope().expect("page");

    assert_eq!(envelope.items, category_items(5).as_array().unwrap().clone());
    assert!(!envelope.next_page);
}

#[tokio::test]
async fn test_page_params_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/tags"))
        .and(query_param("per_page", "2"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-wp-total", "7")
                .insert_header("x-wp-totalpages", "4")
                .set_body_json(json!([{"id": 5}, {"id": 6}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let outcome = fetcher
        .fetch_page(&RequestDescriptor::new("tags").page(2, 3))
        .await;

    let envelope = outcome.envelope().expect("page");
    assert_eq!(envelope.items_count, 7);
    assert!(envelope.next_page);
}

#[tokio::test]
async fn test_no_trigger_raises_only_always() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "5").await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher
        .fetch(RequestDescriptor::new("categories").trigger(""), &sink)
        .await;

    assert_eq!(sink.kinds(), vec![NotificationKind::Always]);
}

// ============================================================================
// Soft Errors
// ============================================================================

#[tokio::test]
async fn test_missing_total_header_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_items(2)))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    assert_eq!(
        sink.take(),
        vec![
            Notification::RequestError,
            Notification::Always {
                descriptor: scenario_a_descriptor()
            }
        ]
    );
}

#[tokio::test]
async fn test_unparsable_total_header_is_request_error() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "lots").await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    assert_eq!(
        sink.kinds(),
        vec![NotificationKind::RequestError, NotificationKind::Always]
    );
}

#[tokio::test]
async fn test_non_array_body_is_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-wp-total", "1")
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    assert_eq!(
        sink.kinds(),
        vec![NotificationKind::RequestError, NotificationKind::Always]
    );
}

// ============================================================================
// Transport Failures
// ============================================================================

#[tokio::test]
async fn test_network_error_is_request_failed() {
    let config = FetcherConfig::new("http://127.0.0.1:1/wp-json/wp/v2/");
    let fetcher = PagedFetcher::new(config).unwrap();
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    let notifications = sink.take();
    assert_eq!(notifications.len(), 2);

    match &notifications[0] {
        Notification::RequestFailed {
            descriptor,
            failure,
        } => {
            assert_eq!(descriptor, &scenario_a_descriptor());
            assert_eq!(failure.status, None);
            assert!(!failure.error.is_empty());
        }
        other => panic!("Expected request failed, got {other:?}"),
    }
    assert_eq!(notifications[1].kind(), NotificationKind::Always);
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"code": "oops"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let sink = CollectingSink::new();
    fetcher.fetch(scenario_a_descriptor(), &sink).await;

    let notifications = sink.take();
    match &notifications[0] {
        Notification::RequestFailed { failure, .. } => {
            assert_eq!(failure.status, Some(500));
            assert_eq!(failure.status_text, "Internal Server Error");
        }
        other => panic!("Expected request failed, got {other:?}"),
    }
    assert_eq!(notifications[1].kind(), NotificationKind::Always);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_spawned_fetches_are_independent() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "5").await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/tags"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let sink = Arc::new(CollectingSink::new());

    let first = fetcher.spawn(scenario_a_descriptor(), Arc::clone(&sink));
    let second = fetcher.spawn(
        RequestDescriptor::new("tags").trigger("tags-loaded"),
        Arc::clone(&sink),
    );
    first.await.unwrap();
    second.await.unwrap();

    let notifications = sink.take();
    assert_eq!(notifications.len(), 4);

    let for_slug = |slug: &str| -> Vec<NotificationKind> {
        notifications
            .iter()
            .filter(|n| match n {
                Notification::Success { envelope, .. } => envelope.args.slug == slug,
                Notification::RequestFailed { descriptor, .. }
                | Notification::Always { descriptor } => descriptor.slug == slug,
                Notification::RequestError => false,
            })
            .map(Notification::kind)
            .collect()
    };

    assert_eq!(
        for_slug("categories"),
        vec![NotificationKind::Success, NotificationKind::Always]
    );
    assert_eq!(
        for_slug("tags"),
        vec![NotificationKind::RequestFailed, NotificationKind::Always]
    );
}

#[tokio::test]
async fn test_channel_sink_receives_in_order() {
    let mock_server = MockServer::start().await;
    mount_categories(&mock_server, "25").await;

    let fetcher = fetcher_for(&mock_server);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    fetcher.spawn(scenario_a_descriptor(), tx).await.unwrap();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.name(), "loaded");
    assert_eq!(second.kind(), NotificationKind::Always);
    assert!(rx.recv().await.is_none());
}
