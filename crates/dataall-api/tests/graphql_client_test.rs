#![allow(clippy::unwrap_used)]
// Integration tests for `GraphQlClient` using wiremock.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dataall_api::operations::{
    GetMaintenanceWindowStatus, ListDatasets, MaintenanceMode, MaintenanceStatus, RawOperation,
    StartMaintenanceWindow,
};
use dataall_api::{Error, Filter, GraphQlClient, PagedOperation, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GraphQlClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/graphql/api", server.uri())).unwrap();
    let client = GraphQlClient::with_token(
        endpoint,
        &SecretString::from("id-token-123"),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn dataset_nodes(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({ "datasetUri": format!("ds-{i}"), "label": format!("Dataset {i}") }))
        .collect()
}

// ── Request shape ───────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_session_headers() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql/api"))
        .and(header("authorization", "id-token-123"))
        .and(header("access-control-allow-origin", "*"))
        .and(header("access-control-allow-headers", "*"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "getMaintenanceWindowStatus": { "status": "INACTIVE", "mode": "" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.execute(&GetMaintenanceWindowStatus::new()).await.unwrap();
    let window = outcome.into_data().unwrap().get_maintenance_window_status.unwrap();
    assert_eq!(window.status, MaintenanceStatus::Inactive);
    assert_eq!(window.mode, None);
}

#[tokio::test]
async fn test_mutation_sends_typed_variables() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "startMaintenanceWindow",
            "variables": { "mode": "READ-ONLY" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "startMaintenanceWindow": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client
        .execute(&StartMaintenanceWindow::new(MaintenanceMode::ReadOnly))
        .await
        .unwrap();
    assert_eq!(outcome.into_data().unwrap().start_maintenance_window, Some(true));
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_query_decodes_page_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ListDatasets",
            "variables": { "filter": { "page": 1, "pageSize": 10, "term": "" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "listDatasets": {
                "count": 25, "page": 1, "pages": 3,
                "hasNext": true, "hasPrevious": false,
                "nodes": dataset_nodes(10)
            }}
        })))
        .mount(&server)
        .await;

    let op = ListDatasets::new(Filter::default());
    let page = ListDatasets::into_page(client.execute(&op).await.unwrap().into_data().unwrap());

    assert_eq!(page.count, 25);
    assert_eq!(page.pages, 3);
    assert_eq!(page.nodes.len(), 10);
    assert!(page.has_next);
    assert!(!page.has_previous);
    assert!(page.accepts_page(2));
    assert!(!page.accepts_page(4));
}

// ── GraphQL errors ──────────────────────────────────────────────────

#[tokio::test]
async fn test_graphql_errors_are_passed_through() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Unauthorized", "path": ["listDatasets"] }]
        })))
        .mount(&server)
        .await;

    let outcome = client.execute(&ListDatasets::new(Filter::default())).await.unwrap();
    assert!(!outcome.is_data());
    assert_eq!(outcome.first_message(), Some("Unauthorized"));
    assert!(!outcome.already_surfaced());
}

#[tokio::test]
async fn test_error_status_with_envelope_is_an_outcome() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "message": "Cannot query field \"nope\"" }]
        })))
        .mount(&server)
        .await;

    let op = RawOperation::query("Nope", "query Nope { nope }");
    let outcome = client.execute(&op).await.unwrap();
    assert_eq!(outcome.first_message(), Some("Cannot query field \"nope\""));
}

// ── Failures without an envelope ────────────────────────────────────

#[tokio::test]
async fn test_error_status_without_envelope_is_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let result = client.execute(&GetMaintenanceWindowStatus::new()).await;
    match result {
        Err(ref e @ Error::Http { status, .. }) => {
            assert_eq!(status, 502);
            assert!(e.is_transient());
            assert!(!e.is_network());
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.execute(&GetMaintenanceWindowStatus::new()).await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "not json"),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_schema_drift_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "listDatasets": { "nodes": [{ "label": "missing uri" }] } }
        })))
        .mount(&server)
        .await;

    let result = client.execute(&ListDatasets::new(Filter::default())).await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&server.uri()).unwrap();
    drop(server);

    let client = GraphQlClient::with_token(
        endpoint,
        &SecretString::from("t"),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client
        .execute(&GetMaintenanceWindowStatus::new())
        .await
        .unwrap_err();
    assert!(err.is_network(), "expected network error, got: {err:?}");
}
