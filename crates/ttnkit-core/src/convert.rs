// ── Wire-to-domain conversions ──
//
// `ttnkit_api::types` mirror the JSON the server speaks; the domain model
// is what the store and CLI consume. Conversions are total: the server's
// shape is accepted as-is and nothing is validated away.

use ttnkit_api::types::{
    AccessKeyResponse, ApplicationResponse, CollaboratorResponse, DeviceRecord, EuiResponse,
};

use crate::model::{AccessKey, Application, Collaborator, Device, EuiDescriptor};

impl From<ApplicationResponse> for Application {
    fn from(r: ApplicationResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            handler: r.handler,
            euis: r.euis,
            access_keys: r.access_keys.into_iter().map(AccessKey::from).collect(),
            collaborators: r.collaborators.into_iter().map(Collaborator::from).collect(),
            created: r.created,
            updated: r.updated,
            extra: r.extra,
        }
    }
}

impl From<AccessKeyResponse> for AccessKey {
    fn from(r: AccessKeyResponse) -> Self {
        Self {
            name: r.name,
            rights: r.rights,
            key: r.key,
        }
    }
}

impl From<CollaboratorResponse> for Collaborator {
    fn from(r: CollaboratorResponse) -> Self {
        Self {
            username: r.username,
            rights: r.rights,
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(r: DeviceRecord) -> Self {
        Self {
            dev_id: r.dev_id,
            attributes: r.attributes,
        }
    }
}

impl From<&Device> for DeviceRecord {
    fn from(d: &Device) -> Self {
        Self {
            dev_id: d.dev_id.clone(),
            attributes: d.attributes.clone(),
        }
    }
}

impl From<EuiResponse> for EuiDescriptor {
    fn from(r: EuiResponse) -> Self {
        Self {
            eui: r.eui,
            extra: r.extra,
        }
    }
}
