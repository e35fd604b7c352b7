// ── Well-known permission strings ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Rights the account server understands on an application.
///
/// Rights stay plain strings on the wire; this enum only exists so the
/// CLI can offer completion and catch typos before a request is sent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[non_exhaustive]
pub enum Right {
    #[strum(serialize = "settings")]
    #[serde(rename = "settings")]
    Settings,
    #[strum(serialize = "delete")]
    #[serde(rename = "delete")]
    Delete,
    #[strum(serialize = "collaborators")]
    #[serde(rename = "collaborators")]
    Collaborators,
    #[strum(serialize = "devices")]
    #[serde(rename = "devices")]
    Devices,
    #[strum(serialize = "messages:up:r")]
    #[serde(rename = "messages:up:r")]
    MessagesUpRead,
    #[strum(serialize = "messages:down:w")]
    #[serde(rename = "messages:down:w")]
    MessagesDownWrite,
}

/// Render a rights list as the wire strings.
pub fn rights_to_strings(rights: &[Right]) -> Vec<String> {
    rights.iter().map(ToString::to_string).collect()
}
