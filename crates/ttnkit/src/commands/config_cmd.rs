//! Config subcommand handlers. None of these touch the network.

use std::fmt::Write;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext tokens masked, for structured output.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.access_token.is_some() {
            profile.access_token = Some(MASK.into());
        }
    }
    cfg
}

/// TOML-like rendering for the table view. Expects an already redacted config.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let Some(p) = cfg.profiles.get(name) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if let Some(ref token) = p.access_token {
            let _ = writeln!(out, "access_token = \"{token}\"");
        }
        if let Some(ref env) = p.access_token_env {
            let _ = writeln!(out, "access_token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Map a prompt failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!(
                    "No profiles configured; commands use the public account server.\n\
                     Add one to: {}",
                    config::config_path().display()
                );
            } else {
                let mut names: Vec<&String> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) && !global.quiet {
                eprintln!("Note: profile '{profile_name}' is not in the config file yet");
            }

            let token = rpassword::prompt_password("Access token: ").map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "access_token".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            config::store_access_token(&profile_name, &token)?;

            output::success(
                global,
                &format!("Access token stored in system keyring for profile '{profile_name}'"),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Profile;

    use super::*;

    #[test]
    fn tokens_are_masked() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "staging".into(),
            Profile {
                access_token: Some("very-secret".into()),
                access_token_env: Some("STAGING_TOKEN".into()),
                ..Profile::default()
            },
        );

        let shown = format_config(&redacted(&cfg));

        assert!(!shown.contains("very-secret"));
        assert!(shown.contains("access_token = \"****\""));
        assert!(shown.contains("access_token_env = \"STAGING_TOKEN\""));
        assert!(shown.contains("[profiles.staging]"));
    }
}
