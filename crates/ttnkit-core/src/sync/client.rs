// ── Entity synchronization client ──
//
// Translates entity-level intents into calls against the applications
// API, then re-reads the parent application (or the whole collection) so
// the injected store converges on server state. Local state is never
// patched directly.

use std::sync::Arc;

use tracing::{debug, warn};
use ttnkit_api::ApplicationsClient;
use ttnkit_api::types::DeviceRecord;

use super::policy::Operation;
use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::model::{
    AccessKeyOptions, Application, ApplicationDraft, Collaborator, Device, EuiDescriptor,
    UNREGISTERED_HANDLER,
};
use crate::store::ApplicationStore;

/// Entry point for every application, device, and access-policy operation.
///
/// Cheaply cloneable via `Arc<SyncInner>`. Each operation is one linear
/// attempt: no retry, no backoff, no locking between concurrent callers.
/// Failure handling follows [`Operation::error_policy`]: reads and
/// collaborator upserts return `Result`, every other operation logs the
/// failure and resolves to `None`.
#[derive(Clone)]
pub struct SyncClient {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    api: ApplicationsClient,
    store: Arc<dyn ApplicationStore>,
}

impl SyncClient {
    pub fn new(api: ApplicationsClient, store: Arc<dyn ApplicationStore>) -> Self {
        Self {
            inner: Arc::new(SyncInner { api, store }),
        }
    }

    /// Build the HTTP client from `config` and wrap it.
    pub fn from_config(
        config: &ConsoleConfig,
        store: Arc<dyn ApplicationStore>,
    ) -> Result<Self, CoreError> {
        let api = ApplicationsClient::new(
            config.api_url.as_str(),
            &config.credentials(),
            &config.transport(),
        )?;
        debug!(api_url = %api.base_url(), "sync client ready");
        Ok(Self::new(api, store))
    }

    pub fn api(&self) -> &ApplicationsClient {
        &self.inner.api
    }

    pub fn store(&self) -> &Arc<dyn ApplicationStore> {
        &self.inner.store
    }

    // ── Applications ─────────────────────────────────────────────────

    /// Fetch every application and replace the store's collection.
    pub async fn list_applications(&self) -> Result<Vec<Application>, CoreError> {
        let result = async {
            let apps: Vec<Application> = self
                .api()
                .list_applications()
                .await?
                .into_iter()
                .map(Application::from)
                .collect();
            self.store().replace_collection(apps.clone());
            Ok::<_, CoreError>(apps)
        }
        .await;
        propagate(Operation::ListApplications, "*", result)
    }

    /// Fetch one application and replace its cached copy.
    pub async fn get_application(&self, app_id: &str) -> Result<Application, CoreError> {
        let result = async {
            let app = Application::from(self.api().get_application(app_id).await?);
            self.store().replace_item(app.clone());
            Ok::<_, CoreError>(app)
        }
        .await;
        propagate(Operation::GetApplication, app_id, result)
    }

    /// Create an application, register its handler when one is given,
    /// then re-read it.
    pub async fn create_application(&self, draft: &ApplicationDraft) -> Option<()> {
        let result = async {
            self.api()
                .create_application(&draft.id, &draft.name)
                .await?;
            self.sync_handler(draft).await;
            self.get_application(&draft.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::CreateApplication, &draft.id, result)
    }

    /// Rename an application, update its handler when one is given,
    /// then re-read it.
    pub async fn update_application(&self, draft: &ApplicationDraft) -> Option<()> {
        let result = async {
            self.api()
                .update_application(&draft.id, &draft.name)
                .await?;
            self.sync_handler(draft).await;
            self.get_application(&draft.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::UpdateApplication, &draft.id, result)
    }

    /// Delete an application, then re-read the whole collection.
    pub async fn delete_application(&self, app: &Application) -> Option<()> {
        let result = async {
            self.api().delete_application(&app.id).await?;
            self.list_applications().await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::DeleteApplication, &app.id, result)
    }

    /// Register `handler` for an application, or drop the registration
    /// when `handler` is the `"none"` sentinel.
    pub async fn set_handler(&self, app_id: &str, handler: &str) -> Option<()> {
        let result = if handler == UNREGISTERED_HANDLER {
            self.api().unregister_handler(app_id).await
        } else {
            self.api().register_handler(app_id, handler).await
        };
        absorb(Operation::SetHandler, app_id, result.map_err(CoreError::from))
    }

    async fn sync_handler(&self, draft: &ApplicationDraft) {
        if let Some(handler) = draft.registered_handler() {
            // Failures are absorbed inside set_handler; the re-read still runs.
            self.set_handler(&draft.id, handler).await;
        }
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// List an application's devices.
    ///
    /// Without a registered handler the server has nowhere to look the
    /// devices up, so this returns an empty list without a request.
    pub async fn list_devices(&self, app: &Application) -> Option<Vec<Device>> {
        if !app.has_handler() {
            warn!(
                app_id = %app.id,
                "no handler registered, returning empty device list"
            );
            return Some(Vec::new());
        }
        let result = self
            .api()
            .list_devices(&app.id)
            .await
            .map(|devices| devices.into_iter().map(Device::from).collect())
            .map_err(CoreError::from);
        absorb(Operation::ListDevices, &app.id, result)
    }

    pub async fn get_device(&self, app: &Application, device_id: &str) -> Option<Device> {
        let result = self
            .api()
            .get_device(&app.id, device_id)
            .await
            .map(Device::from)
            .map_err(CoreError::from);
        absorb(Operation::GetDevice, &app.id, result)
    }

    pub async fn add_device(&self, app: &Application, device: &Device) -> Option<()> {
        let result = self
            .api()
            .add_device(&app.id, &DeviceRecord::from(device))
            .await
            .map_err(CoreError::from);
        absorb(Operation::AddDevice, &app.id, result)
    }

    /// Patch a device and return the server's updated record.
    pub async fn update_device(
        &self,
        app: &Application,
        device_id: &str,
        device: &Device,
    ) -> Option<Device> {
        let result = self
            .api()
            .update_device(&app.id, device_id, &DeviceRecord::from(device))
            .await
            .map(Device::from)
            .map_err(CoreError::from);
        absorb(Operation::UpdateDevice, &app.id, result)
    }

    /// Delete a device. A device without `dev_id` addresses the bare
    /// `devices/` path; the server decides what that means.
    pub async fn delete_device(&self, app: &Application, device: &Device) -> Option<()> {
        let device_id = device.dev_id.as_deref().unwrap_or_default();
        let result = self
            .api()
            .delete_device(&app.id, device_id)
            .await
            .map_err(CoreError::from);
        absorb(Operation::DeleteDevice, &app.id, result)
    }

    // ── EUIs ─────────────────────────────────────────────────────────

    /// Ask the server for a new EUI, re-read the application, and return
    /// the issued descriptor.
    pub async fn create_eui(&self, app: &Application) -> Option<EuiDescriptor> {
        let result = async {
            let eui = EuiDescriptor::from(self.api().create_eui(&app.id).await?);
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(eui)
        }
        .await;
        absorb(Operation::CreateEui, &app.id, result)
    }

    pub async fn delete_eui(&self, app: &Application, eui: &str) -> Option<()> {
        let result = async {
            self.api().delete_eui(&app.id, eui).await?;
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::DeleteEui, &app.id, result)
    }

    // ── Access keys ──────────────────────────────────────────────────

    /// Create or replace the access key `options.name`.
    pub async fn set_access_key(&self, app: &Application, options: &AccessKeyOptions) -> Option<()> {
        let result = async {
            self.api()
                .put_access_key(&app.id, &options.name, &options.rights)
                .await?;
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::SetAccessKey, &app.id, result)
    }

    pub async fn delete_access_key(&self, app: &Application, name: &str) -> Option<()> {
        debug!(app_id = %app.id, name, "deleting access key");
        let result = async {
            self.api().delete_access_key(&app.id, name).await?;
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::DeleteAccessKey, &app.id, result)
    }

    // ── Collaborators ────────────────────────────────────────────────

    /// Create or replace a collaborator's rights.
    ///
    /// Unlike every other mutation, a failure here (including in the
    /// re-read) is returned after being logged.
    pub async fn set_collaborator(
        &self,
        app: &Application,
        collaborator: &Collaborator,
    ) -> Result<(), CoreError> {
        let result = async {
            self.api()
                .put_collaborator(&app.id, &collaborator.username, &collaborator.rights)
                .await?;
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        propagate(Operation::SetCollaborator, &app.id, result)
    }

    pub async fn delete_collaborator(&self, app: &Application, username: &str) -> Option<()> {
        let result = async {
            self.api().delete_collaborator(&app.id, username).await?;
            self.get_application(&app.id).await?;
            Ok::<_, CoreError>(())
        }
        .await;
        absorb(Operation::DeleteCollaborator, &app.id, result)
    }
}

// ── Error policy helpers ─────────────────────────────────────────────

/// Log a failure and drop it. Only valid for swallowing operations.
fn absorb<T>(op: Operation, app_id: &str, result: Result<T, CoreError>) -> Option<T> {
    debug_assert!(!op.propagates_error(), "{op} must surface its errors");
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(operation = %op, app_id, error = %err, "operation failed, error absorbed");
            None
        }
    }
}

/// Log a failure and hand it back. Only valid for propagating operations.
fn propagate<T>(op: Operation, app_id: &str, result: Result<T, CoreError>) -> Result<T, CoreError> {
    debug_assert!(op.propagates_error(), "{op} must absorb its errors");
    result.inspect_err(|err| {
        warn!(operation = %op, app_id, error = %err, "operation failed");
    })
}
