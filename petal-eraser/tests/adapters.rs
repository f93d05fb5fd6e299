//! Adapter behavior against a mock control plane.

use std::sync::Arc;
use std::time::Duration;

use petal_client::{ClientConfig, ControlPlaneClient, RetryPolicy};
use petal_core::{LifecycleState, ResourceLifecycle};
use petal_eraser::{BackupAdapter, Eraser, EraserConfig, IndexAdapter};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<ControlPlaneClient> {
    let config = ClientConfig::new("test-key")
        .with_base_url(server.uri())
        .with_retry(RetryPolicy {
            max_attempts: 1,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
            jitter_fraction: 0.0,
        });
    Arc::new(ControlPlaneClient::new(config).unwrap())
}

fn fast_eraser() -> (Eraser, EraserConfig) {
    let config = EraserConfig {
        pause: Duration::ZERO,
        ..EraserConfig::default()
    };
    (Eraser::new(config.clone()), config)
}

#[tokio::test]
async fn test_protection_disable_failure_never_reaches_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indexes": [{
                "name": "locked",
                "deletion_protection": "enabled",
                "status": {"ready": true, "state": "Ready"}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let (eraser, config) = fast_eraser();
    let adapter = IndexAdapter::new(client_for(&server), config.pause, true);
    let failures = eraser.delete_all(&adapter).await.unwrap();

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "locked");
    assert!(
        failures[0]
            .reason
            .contains("Failed to disable deletion protection")
    );
}

#[tokio::test]
async fn test_protection_is_disabled_before_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indexes": [{
                "name": "locked",
                "deletion_protection": "enabled",
                "status": {"ready": true, "state": "Ready"}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "locked",
            "deletion_protection": "disabled",
            "status": {"ready": true, "state": "Ready"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "locked",
            "deletion_protection": "disabled",
            "status": {"ready": true, "state": "Ready"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (eraser, config) = fast_eraser();
    let adapter = IndexAdapter::new(client_for(&server), config.pause, true);
    let failures = eraser.delete_all(&adapter).await.unwrap();

    assert!(failures.is_empty());
}

#[tokio::test]
async fn test_unforced_protected_index_fails_up_front() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indexes": [{
                "name": "locked",
                "deletion_protection": "enabled",
                "status": {"ready": true, "state": "Ready"}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/locked"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (eraser, config) = fast_eraser();
    let adapter = IndexAdapter::new(client_for(&server), config.pause, false);
    let err = eraser.delete_all(&adapter).await.unwrap_err();

    assert!(err.to_string().contains("locked"));
}

#[tokio::test]
async fn test_backup_describe_scans_the_list_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"backup_id": "b-1", "name": "nightly", "status": "Ready"},
                {"backup_id": "b-2", "name": "weekly", "status": "Pending"}
            ]
        })))
        .mount(&server)
        .await;

    let adapter = BackupAdapter::new(client_for(&server));

    let state = adapter.describe_state("weekly").await.unwrap();
    assert_eq!(state, LifecycleState::parse("Pending"));

    let err = adapter.describe_state("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_backup_delete_resolves_the_id_by_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"backup_id": "b-1", "name": "nightly", "status": "Ready"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/backups/b-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = BackupAdapter::new(client_for(&server));
    adapter.delete("nightly").await.unwrap();
}
