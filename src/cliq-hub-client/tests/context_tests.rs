mod common;

use std::sync::Arc;

use cliq_hub_client::{ClientConfig, ClientContext, FileStore, KeyValueStore};
use common::FakeHub;
use pretty_assertions::assert_eq;
use serde_json::json;

fn context_at(hub: &Arc<FakeHub>, dir: &tempfile::TempDir) -> ClientContext {
    let config = ClientConfig::default()
        .with_api_base_url("https://hub.example.com")
        .unwrap()
        .with_storage_path(dir.path().join("storage.json"));
    let storage = Arc::new(FileStore::new(config.storage_path.clone()));
    ClientContext::new(config, hub.clone(), storage).unwrap()
}

#[tokio::test]
async fn session_survives_restart_through_file_storage() {
    let hub = FakeHub::new();
    let dir = tempfile::tempdir().unwrap();

    let context = context_at(&hub, &dir);
    assert!(!context.session.is_authenticated());

    hub.reply_ok(json!({"token": "T", "username": "a", "id": 1}));
    assert!(context.session.login("a@b.com", "pw").await);
    assert_eq!(hub.last_request().url, "https://hub.example.com/v1/auth/login");
    drop(context);

    let restarted = context_at(&hub, &dir);
    assert!(restarted.session.is_authenticated());
    assert_eq!(restarted.session.token(), "T");

    let stored = FileStore::new(dir.path().join("storage.json"));
    assert_eq!(
        stored.get("user").unwrap().as_deref(),
        Some(r#"{"username":"a","id":1}"#)
    );

    restarted.session.logout();
    assert_eq!(stored.get("token").unwrap(), None);
    assert_eq!(stored.get("user").unwrap(), None);
}

#[tokio::test]
async fn context_stores_share_the_session() {
    let hub = FakeHub::new();
    let dir = tempfile::tempdir().unwrap();
    let context = context_at(&hub, &dir);

    hub.reply_ok(json!({"token": "abc", "username": "a", "id": 1}));
    assert!(context.session.login("a@b.com", "pw").await);

    hub.reply_ok(json!({"ID": 1}));
    assert!(
        context
            .templates
            .create_template(&json!({"title": "t", "content": "c"}))
            .await
    );

    let request = hub.last_request();
    assert_eq!(request.url, "https://hub.example.com/v1/templates");
    assert_eq!(request.bearer.as_deref(), Some("abc"));
}

#[test]
fn corrupt_storage_file_still_builds_a_context() {
    let hub = FakeHub::new();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage.json"), "not json at all").unwrap();

    let context = context_at(&hub, &dir);
    assert!(!context.session.is_authenticated());
    assert_eq!(context.session.user(), None);
}
