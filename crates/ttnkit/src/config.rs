//! CLI configuration: a thin wrapper around `ttnkit_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --access-token, ...).

use std::time::Duration;

use secrecy::SecretString;

use ttnkit_core::{AuthCredentials, ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ttnkit_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, store_access_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Build the `ConsoleConfig` for API-bound commands.
///
/// An explicitly requested profile must exist. Without one, a missing
/// default profile falls back to the public account server, where
/// anonymous requests are allowed.
pub fn build_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
            path: config_path().display().to_string(),
        });
    }

    tracing::debug!(profile = %profile_name, "no profile configured, using defaults");
    resolve_profile(&Profile::default(), &profile_name, &cfg.defaults, global)
}

/// Translate a `Profile` + global flags into a `ConsoleConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ConsoleConfig, CliError> {
    // 1. API URL (flag > env > profile)
    let url_str = global.api_url.as_deref().unwrap_or(&profile.api_url);
    let api_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Access token (flag > env var > keyring > plaintext > anonymous)
    let auth = match global.access_token {
        Some(ref token) => AuthCredentials::AccessToken(SecretString::from(token.clone())),
        None => ttnkit_config::resolve_access_token(profile, profile_name)
            .map_or(AuthCredentials::Anonymous, AuthCredentials::AccessToken),
    };

    // 3. TLS verification (flag > profile > defaults)
    let tls = if global.insecure || profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        ttnkit_config::profile_tls(profile)
    };

    // 4. Timeout
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(defaults.timeout),
    );

    Ok(ConsoleConfig {
        api_url,
        auth,
        tls,
        timeout,
    })
}
