//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use ttnkit_core::{Application, Operation};

use super::Session;
use crate::error::CliError;

/// Fetch an application, mapping a 404 to a named not-found error.
pub async fn resolve_app(session: &Session, app_id: &str) -> Result<Application, CliError> {
    session
        .client
        .get_application(app_id)
        .await
        .map_err(|err| {
            if err.is_not_found() {
                CliError::NotFound {
                    resource_type: "application".into(),
                    identifier: app_id.into(),
                    list_command: "apps list".into(),
                }
            } else {
                err.into()
            }
        })
}

/// Turn a swallowing operation's outcome into a CLI result.
pub fn confirmed<T>(outcome: Option<T>, op: Operation, app_id: &str) -> Result<T, CliError> {
    outcome.ok_or_else(|| CliError::unconfirmed(op, app_id))
}

/// The store's copy of an application after a resynchronizing operation.
pub fn refreshed(session: &Session, app_id: &str) -> Result<Arc<Application>, CliError> {
    session.store.application(app_id).ok_or_else(|| CliError::NotFound {
        resource_type: "application".into(),
        identifier: app_id.into(),
        list_command: "apps list".into(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use ttnkit_core::Device;

    use super::*;

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Delete application app1?", true).unwrap());
    }

    #[test]
    fn device_file_keeps_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dev_id": "node-1", "app_key": "00112233"}}"#).unwrap();

        let device: Device = read_json_file(file.path()).unwrap();

        assert_eq!(device.dev_id.as_deref(), Some("node-1"));
        assert_eq!(device.attribute_str("app_key"), Some("00112233"));
    }

    #[test]
    fn malformed_file_is_a_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = read_json_file::<Device>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "from-file"));
    }
}
