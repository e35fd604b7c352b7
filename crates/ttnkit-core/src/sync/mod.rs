// ── Entity synchronization ──
//
// `SyncClient` runs every operation; `policy` records which of them hand
// failures back to the caller.

mod client;
pub mod policy;

pub use client::SyncClient;
pub use policy::{ErrorPolicy, Operation};
