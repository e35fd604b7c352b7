// ── Application domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Handler value that means "no handler registered".
///
/// Setting an application's handler to this value removes the
/// registration instead of creating one.
pub const UNREGISTERED_HANDLER: &str = "none";

/// `true` when a handler value counts as set: present and non-empty.
///
/// The unregister sentinel counts as set, so passing it through
/// create/update still reaches the registration endpoint.
pub fn handler_is_set(handler: Option<&str>) -> bool {
    handler.is_some_and(|h| !h.is_empty())
}

/// Top-level tenant-scoped resource grouping devices and access policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub handler: Option<String>,
    pub euis: Vec<String>,
    pub access_keys: Vec<AccessKey>,
    pub collaborators: Vec<Collaborator>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Server fields the client does not interpret.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Application {
    /// A bare application reference, e.g. for addressing child entities
    /// before the full record has been fetched.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handler: None,
            euis: Vec::new(),
            access_keys: Vec::new(),
            collaborators: Vec::new(),
            created: None,
            updated: None,
            extra: Map::new(),
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Whether a handler is registered. Devices are only reachable when
    /// this is `true`.
    pub fn has_handler(&self) -> bool {
        handler_is_set(self.handler.as_deref())
    }

    pub fn access_key(&self, name: &str) -> Option<&AccessKey> {
        self.access_keys.iter().find(|k| k.name == name)
    }

    pub fn collaborator(&self, username: &str) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.username == username)
    }
}

/// Input for creating or updating an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl ApplicationDraft {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// The handler to register, if one is set.
    pub fn registered_handler(&self) -> Option<&str> {
        self.handler.as_deref().filter(|h| handler_is_set(Some(h)))
    }

    pub fn has_handler(&self) -> bool {
        self.registered_handler().is_some()
    }
}

impl From<&Application> for ApplicationDraft {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id.clone(),
            name: app.name.clone(),
            handler: app.handler.clone(),
        }
    }
}

/// Named credential with a permission set, scoped to one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    pub name: String,
    pub rights: Vec<String>,
    /// Key secret, when the server chose to reveal it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Input for creating or replacing an access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyOptions {
    pub name: String,
    pub rights: Vec<String>,
}

/// A principal granted a permission set on one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub username: String,
    pub rights: Vec<String>,
}
