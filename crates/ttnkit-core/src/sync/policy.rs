// ── Per-operation error policy ──

use strum::{Display, EnumIter};

/// What an operation does with a failure after logging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Resolve with no result. The store is left untouched.
    Swallow,
    /// Return the error to the caller.
    Propagate,
}

/// Every operation the sync client exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    ListApplications,
    GetApplication,
    CreateApplication,
    UpdateApplication,
    DeleteApplication,
    ListDevices,
    GetDevice,
    AddDevice,
    UpdateDevice,
    DeleteDevice,
    SetHandler,
    CreateEui,
    DeleteEui,
    SetAccessKey,
    DeleteAccessKey,
    SetCollaborator,
    DeleteCollaborator,
}

impl Operation {
    /// The failure policy for this operation.
    ///
    /// Collaborator upserts are the only mutation whose failure reaches
    /// the caller.
    pub fn error_policy(self) -> ErrorPolicy {
        match self {
            Self::ListApplications | Self::GetApplication | Self::SetCollaborator => {
                ErrorPolicy::Propagate
            }
            Self::CreateApplication
            | Self::UpdateApplication
            | Self::DeleteApplication
            | Self::ListDevices
            | Self::GetDevice
            | Self::AddDevice
            | Self::UpdateDevice
            | Self::DeleteDevice
            | Self::SetHandler
            | Self::CreateEui
            | Self::DeleteEui
            | Self::SetAccessKey
            | Self::DeleteAccessKey
            | Self::DeleteCollaborator => ErrorPolicy::Swallow,
        }
    }

    /// Whether a failure is surfaced to the caller.
    pub fn propagates_error(self) -> bool {
        self.error_policy() == ErrorPolicy::Propagate
    }
}
