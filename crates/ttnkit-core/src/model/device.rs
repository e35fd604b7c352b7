// ── Device and EUI domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A device registered under one application.
///
/// Only `dev_id` is interpreted by the client. Everything else the server
/// sends is carried in `attributes` and written back verbatim on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Device {
    pub fn new(dev_id: impl Into<String>) -> Self {
        Self {
            dev_id: Some(dev_id.into()),
            attributes: Map::new(),
        }
    }

    /// Look up an attribute as a string, for display.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// Descriptor returned by the server when it issues a new EUI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuiDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eui: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
