// ── Runtime connection configuration ──
//
// These types describe *how* to reach the console API. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `ConsoleConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Applications collection of the public account server.
pub const DEFAULT_API_URL: &str = "https://account.thethingsnetwork.org/applications/";

/// How to authenticate with the console API.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// OAuth access token, sent as a bearer token.
    AccessToken(SecretString),
    /// No credentials.
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for the public account server.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (private deployments with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one console deployment.
///
/// Built by the CLI, passed to `SyncClient::from_config` -- core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Applications collection URL.
    pub api_url: Url,
    /// Authentication credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            auth: AuthCredentials::Anonymous,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ConsoleConfig {
    pub(crate) fn transport(&self) -> ttnkit_api::TransportConfig {
        ttnkit_api::TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => ttnkit_api::TlsMode::System,
                TlsVerification::CustomCa(path) => ttnkit_api::TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => ttnkit_api::TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }

    pub(crate) fn credentials(&self) -> ttnkit_api::Credentials {
        match &self.auth {
            AuthCredentials::AccessToken(token) => ttnkit_api::Credentials::AccessToken(token.clone()),
            AuthCredentials::Anonymous => ttnkit_api::Credentials::Anonymous,
        }
    }
}
