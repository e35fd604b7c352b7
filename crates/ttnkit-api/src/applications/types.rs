//! Wire types for the console applications API.
//!
//! Response records mirror the account server JSON (snake_case field
//! names). Fields the client does not model are kept in `extra` so that a
//! fetched record can be echoed back without losing data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Applications ─────────────────────────────────────────────────────

/// Application record, from `GET /` and `GET /{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Registered handler id, or `"none"` when explicitly unregistered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub euis: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_keys: Vec<AccessKeyResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaborators: Vec<CollaboratorResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode an explicit JSON `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Access key entry embedded in an application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessKeyResponse {
    pub name: String,
    #[serde(default)]
    pub rights: Vec<String>,
    /// The key secret itself. Only present for callers allowed to see it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Collaborator entry embedded in an application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorResponse {
    pub username: String,
    #[serde(default)]
    pub rights: Vec<String>,
}

/// Body of `POST /`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApplicationRequest<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// Body of `PATCH /{id}`. The server stores the display name as
/// `description`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateApplicationRequest<'a> {
    pub description: &'a str,
}

/// Body of `PUT /{id}/registration`.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest<'a> {
    pub handler: &'a str,
}

/// Body of `PUT /{id}/access-keys/{name}` and
/// `PUT /{id}/collaborators/{username}`.
#[derive(Debug, Clone, Serialize)]
pub struct RightsRequest<'a> {
    pub rights: &'a [String],
}

// ── Devices ──────────────────────────────────────────────────────────

/// Device record. Only `dev_id` is interpreted; every other attribute is
/// passed through untouched in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

// ── EUIs ─────────────────────────────────────────────────────────────

/// Response of `POST /{id}/euis`.
///
/// Some deployments answer with an empty body; that decodes as the
/// default (no `eui`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eui: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
