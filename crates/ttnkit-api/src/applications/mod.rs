// Applications API client for the console account server.
//
// Every resource hangs off one collection path: applications, their
// devices, handler registration, EUIs, access keys, and collaborators.

pub mod client;
pub mod types;

pub use client::ApplicationsClient;
