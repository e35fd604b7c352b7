// ttnkit-api: Async Rust client for The Things Network console applications API

pub mod applications;
pub mod auth;
pub mod error;
pub mod transport;

pub use applications::ApplicationsClient;
pub use applications::types;
pub use auth::Credentials;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
