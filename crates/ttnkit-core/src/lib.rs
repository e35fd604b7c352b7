//! Entity synchronization layer between `ttnkit-api` and its consumers.
//!
//! - **[`SyncClient`]**: Runs every application, device, EUI, access-key,
//!   and collaborator operation against the console API, then re-reads
//!   the parent application (or the whole collection after a delete) so
//!   the injected store converges on server state. Failures follow a
//!   per-[`Operation`] [`ErrorPolicy`].
//!
//! - **[`ApplicationStore`]**: The two-method store boundary
//!   (`replace_collection` / `replace_item`). [`DataStore`] is the default
//!   implementation: `DashMap` storage with `tokio::sync::watch`
//!   snapshots for reactive readers.
//!
//! - **Domain model** ([`model`]): `Application`, `Device`, `AccessKey`,
//!   `Collaborator`, `EuiDescriptor`, converted from the api crate's wire
//!   records in `convert`.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ConsoleConfig, DEFAULT_API_URL, TlsVerification};
pub use error::CoreError;
pub use store::{ApplicationStore, DataStore};
pub use sync::{ErrorPolicy, Operation, SyncClient};

pub use model::{
    AccessKey, AccessKeyOptions, Application, ApplicationDraft, Collaborator, Device,
    EuiDescriptor, Right, UNREGISTERED_HANDLER, rights_to_strings,
};
