//! Integration tests for the listing module.
//!
//! These tests drive the paging loop against a mock listing endpoint.

mod support;

use std::time::Duration;

use serde_json::{Value, json};
use support::socket_guard::start_mock_server_or_skip;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};
use workbook_dl::{ClientConfig, ListErrorKind, PAGE_SIZE, WorkbookLister};

const ALICE_PATH: &str = "/profile/api/alice/workbooks";

/// Builds a JSON page of `count` workbooks named `{prefix}{n}`.
fn page(prefix: &str, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|n| {
                json!({
                    "workbookRepoUrl": format!("{prefix}{n}"),
                    "size": 1000 + n,
                    "title": format!("Workbook {prefix}{n}"),
                    "description": "",
                    "showInProfile": true,
                    "allowDataAccess": n % 2 == 0
                })
            })
            .collect(),
    )
}

fn lister_for(server: &MockServer) -> WorkbookLister {
    WorkbookLister::with_config(&ClientConfig::default().with_base_url(server.uri()))
        .expect("lister should build")
}

async fn mount_page(server: &MockServer, index: usize, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(ALICE_PATH))
        .and(query_param("index", index.to_string()))
        .and(query_param("count", PAGE_SIZE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_all_workbooks_requests_offsets_by_running_total() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&server, 0, page("a", 20), 1).await;
    mount_page(&server, 20, page("b", 20), 1).await;
    mount_page(&server, 40, page("c", 5), 1).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 45);
    assert_eq!(workbooks[0].repository_id(), "a0");
    assert_eq!(workbooks[19].repository_id(), "a19");
    assert_eq!(workbooks[20].repository_id(), "b0");
    assert_eq!(workbooks[44].repository_id(), "c4");
}

#[tokio::test]
async fn test_list_stops_after_first_short_page() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&server, 0, page("a", 7), 1).await;
    mount_page(&server, 7, page("never", 3), 0).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 7);
}

#[tokio::test]
async fn test_list_empty_profile_makes_single_request() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&server, 0, json!([]), 1).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert!(workbooks.is_empty());
}

#[tokio::test]
async fn test_list_offset_follows_oversized_pages() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    // The server may hand back more than requested; the next offset must
    // still be the count actually received.
    mount_page(&server, 0, page("a", 25), 1).await;
    mount_page(&server, 25, page("b", 20), 1).await;
    mount_page(&server, 45, json!([]), 1).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 45);
    assert_eq!(workbooks[25].repository_id(), "b0");
}

#[tokio::test]
async fn test_list_decode_failure_on_middle_page_returns_prior_pages() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&server, 0, page("a", 20), 1).await;
    mount_page(&server, 20, page("b", 20), 1).await;
    Mock::given(method("GET"))
        .and(path(ALICE_PATH))
        .and(query_param("index", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 60, page("never", 1), 0).await;

    let error = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect_err("decode failure should abort the listing");

    assert!(
        matches!(error.kind(), ListErrorKind::Decode { .. }),
        "expected Decode, got: {:?}",
        error.kind()
    );
    let ids: Vec<&str> = error.partial().iter().map(|w| w.repository_id()).collect();
    assert_eq!(ids.len(), 40);
    assert_eq!(ids[0], "a0");
    assert_eq!(ids[20], "b0");
    assert_eq!(ids[39], "b19");
}

#[tokio::test]
async fn test_list_http_error_on_middle_page_returns_prior_pages() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&server, 0, page("a", 20), 1).await;
    Mock::given(method("GET"))
        .and(path(ALICE_PATH))
        .and(query_param("index", "20"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let error = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect_err("server error should abort the listing");

    match error.kind() {
        ListErrorKind::HttpStatus { status, url } => {
            assert_eq!(*status, 503);
            assert!(url.contains("index=20"), "url: {url}");
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
    assert!(error.kind().is_transport());
    assert_eq!(error.into_partial().len(), 20);
}

/// Matches requests whose `no_cache` query value is a plausible unix timestamp.
struct NoCacheTimestamp;

impl Match for NoCacheTimestamp {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .find(|(key, _)| key == "no_cache")
            .and_then(|(_, value)| value.parse::<u64>().ok())
            .is_some_and(|ts| ts > 1_577_836_800)
    }
}

#[tokio::test]
async fn test_list_sends_accept_json_and_cache_buster() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ALICE_PATH))
        .and(header("accept", "application/json"))
        .and(NoCacheTimestamp)
        .and(query_param("index", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("a", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 2);
}

#[tokio::test]
async fn test_list_drops_blank_identifiers_without_shifting_offsets() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let mut first = page("a", 20);
    first[3]["workbookRepoUrl"] = json!("");
    mount_page(&server, 0, first, 1).await;
    mount_page(&server, 20, page("b", 1), 1).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 20);
    assert!(workbooks.iter().all(|w| !w.repository_id().is_empty()));
    assert_eq!(workbooks[3].repository_id(), "a4");
}

#[tokio::test]
async fn test_list_record_without_identifier_key_does_not_abort_paging() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let mut first = page("a", 20);
    first[5]
        .as_object_mut()
        .expect("page entries are objects")
        .remove("workbookRepoUrl");
    mount_page(&server, 0, first, 1).await;
    mount_page(&server, 20, page("b", 3), 1).await;

    let workbooks = lister_for(&server)
        .list_all_workbooks("alice")
        .await
        .expect("listing should succeed");

    assert_eq!(workbooks.len(), 22);
    assert_eq!(workbooks[5].repository_id(), "a6");
    assert_eq!(workbooks[19].repository_id(), "b0");
}

#[tokio::test]
async fn test_list_read_timeout_is_reported_as_timeout() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(ALICE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page("a", 1))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let lister = WorkbookLister::with_config(
        &ClientConfig::default()
            .with_base_url(server.uri())
            .with_timeouts(1, 1),
    )
    .expect("lister should build");

    let error = lister
        .list_all_workbooks("alice")
        .await
        .expect_err("slow server should time out");

    assert!(
        matches!(error.kind(), ListErrorKind::Timeout { .. }),
        "expected Timeout, got: {:?}",
        error.kind()
    );
    assert!(error.partial().is_empty());
}

#[tokio::test]
async fn test_list_unreachable_server_is_transport_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let base_url = server.uri();
    drop(server);

    let lister = WorkbookLister::with_config(
        &ClientConfig::default()
            .with_base_url(base_url)
            .with_timeouts(2, 2),
    )
    .expect("lister should build");

    let error = lister
        .list_all_workbooks("alice")
        .await
        .expect_err("closed port should fail");

    assert!(error.kind().is_transport(), "got: {:?}", error.kind());
    assert!(error.partial().is_empty());
}
