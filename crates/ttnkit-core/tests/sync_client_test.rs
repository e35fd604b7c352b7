#![allow(clippy::unwrap_used)]
// Integration tests for `SyncClient`: every operation against a wiremock
// console API, with a recording store to observe resynchronization.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ttnkit_core::{
    AccessKeyOptions, Application, ApplicationDraft, ApplicationStore, Collaborator,
    ConsoleConfig, CoreError, DataStore, Device, Operation, SyncClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum StoreEvent {
    Collection(Vec<String>),
    Item(String),
}

#[derive(Default)]
struct RecordingStore {
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingStore {
    fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ApplicationStore for RecordingStore {
    fn replace_collection(&self, applications: Vec<Application>) {
        let ids = applications.into_iter().map(|a| a.id).collect();
        self.events.lock().unwrap().push(StoreEvent::Collection(ids));
    }

    fn replace_item(&self, application: Application) {
        self.events.lock().unwrap().push(StoreEvent::Item(application.id));
    }
}

async fn setup() -> (MockServer, SyncClient, Arc<RecordingStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(RecordingStore::default());
    let config = ConsoleConfig {
        api_url: Url::parse(&format!("{}/applications/", server.uri())).unwrap(),
        ..ConsoleConfig::default()
    };
    let client = SyncClient::from_config(&config, store.clone()).unwrap();
    (server, client, store)
}

async fn mount_app(server: &MockServer, id: &str, expected_fetches: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/applications/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "name": "Sensor Net",
            "handler": "ttn-handler-eu"
        })))
        .expect(expected_fetches)
        .mount(server)
        .await;
}

fn app_with_handler() -> Application {
    Application::new("app1", "Sensor Net").with_handler("ttn-handler-eu")
}

/// Run every error-absorbing operation once and report which resolved
/// to `None`. Each one issues exactly one request when that request fails.
async fn absorbing_outcomes(client: &SyncClient) -> Vec<(Operation, bool)> {
    let app = app_with_handler();
    let draft = ApplicationDraft::new("app1", "Sensor Net");
    let device = Device::new("node-1");
    let options = AccessKeyOptions {
        name: "dashboard".into(),
        rights: vec!["messages:up:r".into()],
    };

    vec![
        (Operation::CreateApplication, client.create_application(&draft).await.is_none()),
        (Operation::UpdateApplication, client.update_application(&draft).await.is_none()),
        (Operation::DeleteApplication, client.delete_application(&app).await.is_none()),
        (Operation::ListDevices, client.list_devices(&app).await.is_none()),
        (Operation::GetDevice, client.get_device(&app, "node-1").await.is_none()),
        (Operation::AddDevice, client.add_device(&app, &device).await.is_none()),
        (
            Operation::UpdateDevice,
            client.update_device(&app, "node-1", &device).await.is_none(),
        ),
        (Operation::DeleteDevice, client.delete_device(&app, &device).await.is_none()),
        (
            Operation::SetHandler,
            client.set_handler("app1", "ttn-handler-eu").await.is_none(),
        ),
        (Operation::CreateEui, client.create_eui(&app).await.is_none()),
        (
            Operation::DeleteEui,
            client.delete_eui(&app, "70B3D57EF0000001").await.is_none(),
        ),
        (Operation::SetAccessKey, client.set_access_key(&app, &options).await.is_none()),
        (
            Operation::DeleteAccessKey,
            client.delete_access_key(&app, "dashboard").await.is_none(),
        ),
        (
            Operation::DeleteCollaborator,
            client.delete_collaborator(&app, "alice").await.is_none(),
        ),
    ]
}

fn assert_all_absorbed(outcomes: &[(Operation, bool)]) {
    assert_eq!(outcomes.len(), 14);
    for (op, absorbed) in outcomes {
        assert!(!op.propagates_error(), "{op} should not be in the absorbing set");
        assert!(*absorbed, "{op} should resolve to None on failure");
    }
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_applications_replaces_collection() {
    let (server, client, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "app1", "name": "Sensor Net" },
            { "id": "app2", "name": "Parking" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let apps = client.list_applications().await.unwrap();

    assert_eq!(apps.len(), 2);
    assert_eq!(
        store.events(),
        vec![StoreEvent::Collection(vec!["app1".into(), "app2".into()])]
    );
}

#[tokio::test]
async fn test_get_application_propagates_not_found() {
    let (server, client, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/applications/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "not found", "code": "404" })),
        )
        .mount(&server)
        .await;

    let err = client.get_application("ghost").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_reads_feed_the_default_store() {
    let server = MockServer::start().await;
    let store = Arc::new(DataStore::new());
    let config = ConsoleConfig {
        api_url: Url::parse(&format!("{}/applications/", server.uri())).unwrap(),
        ..ConsoleConfig::default()
    };
    let client = SyncClient::from_config(&config, store.clone()).unwrap();

    Mock::given(method("GET"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "app1", "name": "Sensor Net" }
        ])))
        .mount(&server)
        .await;

    client.list_applications().await.unwrap();

    assert_eq!(store.application_count(), 1);
    assert_eq!(store.application("app1").unwrap().name, "Sensor Net");
}

// ── Application mutations ───────────────────────────────────────────

#[tokio::test]
async fn test_create_application_registers_handler_then_refetches() {
    let (server, client, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/applications/"))
        .and(body_json(json!({ "id": "app1", "name": "Sensor Net" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/applications/app1/registration"))
        .and(body_json(json!({ "handler": "ttn-handler-eu" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let draft = ApplicationDraft::new("app1", "Sensor Net").with_handler("ttn-handler-eu");
    assert_eq!(client.create_application(&draft).await, Some(()));

    assert_eq!(store.events(), vec![StoreEvent::Item("app1".into())]);
}

#[tokio::test]
async fn test_create_application_without_handler_skips_registration() {
    let (server, client, _store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let draft = ApplicationDraft::new("app1", "Sensor Net").with_handler("");
    assert_eq!(client.create_application(&draft).await, Some(()));
}

#[tokio::test]
async fn test_update_application_with_none_handler_unregisters() {
    let (server, client, _store) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/applications/app1"))
        .and(body_json(json!({ "description": "Renamed" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/applications/app1/registration"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let draft = ApplicationDraft::new("app1", "Renamed").with_handler("none");
    assert_eq!(client.update_application(&draft).await, Some(()));
}

#[tokio::test]
async fn test_create_application_failure_is_absorbed() {
    let (server, client, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "id taken" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = ApplicationDraft::new("app1", "Sensor Net");
    assert_eq!(client.create_application(&draft).await, None);
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_create_application_refetches_after_failed_registration() {
    let (server, client, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/applications/app1/registration"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let draft = ApplicationDraft::new("app1", "Sensor Net").with_handler("ttn-handler-eu");
    assert_eq!(client.create_application(&draft).await, Some(()));

    assert_eq!(store.events(), vec![StoreEvent::Item("app1".into())]);
}

#[tokio::test]
async fn test_delete_application_refetches_collection() {
    let (server, client, store) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/applications/app1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/applications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "app2", "name": "Parking" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.delete_application(&app_with_handler()).await, Some(()));
    assert_eq!(store.events(), vec![StoreEvent::Collection(vec!["app2".into()])]);
}

#[tokio::test]
async fn test_set_handler_puts_registration() {
    let (server, client, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/applications/app1/registration"))
        .and(body_json(json!({ "handler": "ttn-handler-us-west" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.set_handler("app1", "ttn-handler-us-west").await, Some(()));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_set_handler_none_deletes_registration() {
    let (server, client, _store) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/applications/app1/registration"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.set_handler("app1", "none").await, Some(()));
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_without_handler_sends_nothing() {
    let (server, client, _store) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let devices = client
        .list_devices(&Application::new("app1", "Sensor Net"))
        .await
        .unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_list_devices_with_handler() {
    let (server, client, _store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/applications/app1/devices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "dev_id": "node-1", "dev_eui": "0004A30B001C0530" },
            { "dev_id": "node-2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_devices(&app_with_handler()).await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].dev_id.as_deref(), Some("node-1"));
    assert_eq!(devices[0].attribute_str("dev_eui"), Some("0004A30B001C0530"));
}

#[tokio::test]
async fn test_list_devices_failure_is_absorbed() {
    let (server, client, _store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/applications/app1/devices/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(client.list_devices(&app_with_handler()).await, None);
}

#[tokio::test]
async fn test_update_device_returns_server_record() {
    let (server, client, store) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/applications/app1/devices/node-1"))
        .and(body_json(json!({ "dev_id": "node-1", "description": "roof" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dev_id": "node-1",
            "description": "roof",
            "fcnt_up": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut device = Device::new("node-1");
    device.attributes.insert("description".into(), json!("roof"));

    let updated = client
        .update_device(&app_with_handler(), "node-1", &device)
        .await
        .unwrap();

    assert_eq!(updated.attributes.get("fcnt_up"), Some(&json!(12)));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_delete_device_without_id_targets_collection_path() {
    let (server, client, _store) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/applications/app1/devices/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .delete_device(&app_with_handler(), &Device::default())
        .await;
    assert_eq!(result, Some(()));
}

// ── Child entities ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_eui_refetches_parent() {
    let (server, client, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/applications/app1/euis"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "eui": "70B3D57EF0000001" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let eui = client.create_eui(&app_with_handler()).await.unwrap();

    assert_eq!(eui.eui.as_deref(), Some("70B3D57EF0000001"));
    assert_eq!(store.events(), vec![StoreEvent::Item("app1".into())]);
}

#[tokio::test]
async fn test_set_access_key_puts_rights_then_refetches() {
    let (server, client, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/applications/app1/access-keys/dashboard"))
        .and(body_json(json!({ "rights": ["messages:up:r"] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let options = AccessKeyOptions {
        name: "dashboard".into(),
        rights: vec!["messages:up:r".into()],
    };
    assert_eq!(client.set_access_key(&app_with_handler(), &options).await, Some(()));
    assert_eq!(store.events(), vec![StoreEvent::Item("app1".into())]);
}

#[tokio::test]
async fn test_delete_access_key_failure_skips_refetch() {
    let (server, client, store) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/applications/app1/access-keys/dashboard"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "forbidden" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 0).await;

    assert_eq!(
        client.delete_access_key(&app_with_handler(), "dashboard").await,
        None
    );
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_set_collaborator_propagates_failure() {
    let (server, client, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/applications/app1/collaborators/alice"))
        .and(body_json(json!({ "rights": ["settings", "devices"] })))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "error": "unknown right" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collaborator = Collaborator {
        username: "alice".into(),
        rights: vec!["settings".into(), "devices".into()],
    };
    let err = client
        .set_collaborator(&app_with_handler(), &collaborator)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(422), .. }));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_set_collaborator_refetches_parent() {
    let (server, client, store) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/applications/app1/collaborators/alice"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_app(&server, "app1", 1).await;

    let collaborator = Collaborator {
        username: "alice".into(),
        rights: vec!["settings".into()],
    };
    client
        .set_collaborator(&app_with_handler(), &collaborator)
        .await
        .unwrap();

    assert_eq!(store.events(), vec![StoreEvent::Item("app1".into())]);
}

#[tokio::test]
async fn test_delete_collaborator_refetch_failure_is_absorbed() {
    let (server, client, store) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/applications/app1/collaborators/alice"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/applications/app1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        client.delete_collaborator(&app_with_handler(), "alice").await,
        None
    );
    assert!(store.events().is_empty());
}

// ── Absorbed failures ───────────────────────────────────────────────

#[tokio::test]
async fn test_server_errors_are_absorbed_without_refetch() {
    let (server, client, store) = setup().await;

    // One failing request per operation; any follow-up GET would push
    // the count past the expectation.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .expect(14)
        .mount(&server)
        .await;

    let outcomes = absorbing_outcomes(&client).await;

    assert_all_absorbed(&outcomes);
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_connection_failures_are_absorbed() {
    let store = Arc::new(RecordingStore::default());
    let config = ConsoleConfig {
        api_url: Url::parse("http://127.0.0.1:1/applications/").unwrap(),
        timeout: std::time::Duration::from_secs(5),
        ..ConsoleConfig::default()
    };
    let client = SyncClient::from_config(&config, store.clone()).unwrap();

    let outcomes = absorbing_outcomes(&client).await;

    assert_all_absorbed(&outcomes);
    assert!(store.events().is_empty());
}
