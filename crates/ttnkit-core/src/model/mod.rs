// ── Domain model ──
//
// Canonical types handed to store and CLI consumers. The api crate's wire
// records are converted into these in `convert`.

pub mod application;
pub mod device;
pub mod rights;

pub use application::{
    AccessKey, AccessKeyOptions, Application, ApplicationDraft, Collaborator,
    UNREGISTERED_HANDLER, handler_is_set,
};
pub use device::{Device, EuiDescriptor};
pub use rights::{Right, rights_to_strings};
