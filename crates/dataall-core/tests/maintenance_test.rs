#![allow(clippy::unwrap_used)]
// Integration tests for `MaintenanceGuard` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use dataall_api::operations::{MaintenanceMode, MaintenanceStatus};
use dataall_api::{EndpointMap, OperationKind, TransportConfig};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dataall_core::{Access, ErrorAction, ErrorBus, ErrorKind, MaintenanceGuard, Session};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<Session>, ErrorBus) {
    let server = MockServer::start().await;
    let bus = ErrorBus::new();
    let endpoints = EndpointMap::new().with("core", &server.uri()).unwrap();
    let session = Session::create(
        "core",
        Some(&SecretString::from("token")),
        &endpoints,
        bus.clone(),
        &TransportConfig::default(),
    )
    .unwrap()
    .unwrap();
    (server, Arc::new(session), bus)
}

async fn mount_status(server: &MockServer, status: &str, mode: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "getMaintenanceWindowStatus" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "getMaintenanceWindowStatus": { "status": status, "mode": mode } }
        })))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ── Status checks ───────────────────────────────────────────────────

#[tokio::test]
async fn test_no_access_window_blocks_non_admins() {
    let (server, session, _bus) = setup().await;
    mount_status(&server, "ACTIVE", "NO-ACCESS").await;

    let guard = MaintenanceGuard::new(Arc::clone(&session), false);
    let state = guard.check_now().await.into_data().unwrap();

    assert_eq!(state.window.status, MaintenanceStatus::Active);
    assert_eq!(state.access, Access::Blocked);
    assert!(state.checked_at.is_some());
    assert!(!guard.access().permits(OperationKind::Query, "ListDatasets"));

    let admin = MaintenanceGuard::new(session, true);
    assert_eq!(admin.check_now().await.into_data().unwrap().access, Access::Full);
}

#[tokio::test]
async fn test_failed_check_keeps_last_state() {
    let (server, session, _bus) = setup().await;
    mount_status(&server, "PENDING", "READ-ONLY").await;
    let guard = MaintenanceGuard::new(session, false);
    assert!(guard.check_now().await.is_data());

    server.reset().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "boom" }]
        })))
        .mount(&server)
        .await;

    let outcome = guard.check_now().await;
    assert_eq!(outcome.first_message(), Some("boom"));
    assert!(!outcome.already_surfaced());
    assert_eq!(guard.access(), Access::ReadOnly);
}

#[tokio::test]
async fn test_unusable_status_response_is_flagged_as_surfaced() {
    let (server, session, bus) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;
    let mut rx = bus.subscribe();

    let guard = MaintenanceGuard::new(session, false);
    let outcome = guard.check_now().await;

    assert!(!outcome.is_data());
    assert!(outcome.already_surfaced());
    assert!(matches!(rx.try_recv().unwrap(), ErrorAction::SetError(_)));
    assert_eq!(guard.access(), Access::Full);
}

#[tokio::test]
async fn test_poller_publishes_state_changes() {
    let (server, session, _bus) = setup().await;
    mount_status(&server, "ACTIVE", "READ-ONLY").await;

    let guard = MaintenanceGuard::spawn(session, Duration::from_millis(50), false);
    let mut rx = guard.subscribe();

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.checked_at.is_some()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(guard.access(), Access::ReadOnly);
    assert_eq!(guard.state().window.mode, Some(MaintenanceMode::ReadOnly));

    guard.shutdown();
}

#[tokio::test]
async fn test_poller_stops_when_last_handle_is_dropped() {
    let (server, session, _bus) = setup().await;
    mount_status(&server, "ACTIVE", "READ-ONLY").await;

    let guard = MaintenanceGuard::spawn(session, Duration::from_millis(20), false);
    let mut rx = guard.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.checked_at.is_some()))
        .await
        .unwrap()
        .unwrap();

    // A surviving clone keeps polling.
    let clone = guard.clone();
    drop(guard);
    let before = request_count(&server).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(request_count(&server).await > before);

    drop(clone);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let at_drop = request_count(&server).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(request_count(&server).await, at_drop);
    assert!(rx.has_changed().is_err());
}

// ── Admin actions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_start_refreshes_state_on_success() {
    let (server, session, bus) = setup().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "startMaintenanceWindow",
            "variables": { "mode": "NO-ACCESS" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "startMaintenanceWindow": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_status(&server, "PENDING", "NO-ACCESS").await;
    let mut rx = bus.subscribe();

    let guard = MaintenanceGuard::new(session, true);
    assert!(guard.start(MaintenanceMode::NoAccess).await);
    assert_eq!(guard.state().window.status, MaintenanceStatus::Pending);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_refused_action_is_reported() {
    let (server, session, bus) = setup().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "stopMaintenanceWindow" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "stopMaintenanceWindow": false } })),
        )
        .mount(&server)
        .await;
    let mut rx = bus.subscribe();

    let guard = MaintenanceGuard::new(session, true);
    assert!(!guard.stop().await);

    match rx.try_recv().unwrap() {
        ErrorAction::SetError(event) => {
            assert_eq!(event.kind, ErrorKind::Maintenance);
            assert_eq!(event.message, "Could not stop maintenance window");
        }
        ErrorAction::ClearError => panic!("expected SetError"),
    }
}

#[tokio::test]
async fn test_reindex_sends_handle_deletes() {
    let (server, session, _bus) = setup().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "startReindexCatalog",
            "variables": { "handleDeletes": true }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "startReindexCatalog": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_status(&server, "INACTIVE", "").await;

    let guard = MaintenanceGuard::new(session, true);
    assert!(guard.reindex(true).await);
}
