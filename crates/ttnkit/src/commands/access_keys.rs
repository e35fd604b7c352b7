//! Access-key command handlers.

use tabled::Tabled;
use ttnkit_core::{AccessKey, AccessKeyOptions, Operation, rights_to_strings};

use crate::cli::{AccessKeysArgs, AccessKeysCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AccessKeyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rights")]
    rights: String,
    #[tabled(rename = "Key")]
    key: String,
}

impl From<&AccessKey> for AccessKeyRow {
    fn from(k: &AccessKey) -> Self {
        Self {
            name: k.name.clone(),
            rights: k.rights.join(", "),
            // Secrets only appear in structured output.
            key: if k.key.is_some() { "****".into() } else { "-".into() },
        }
    }
}

fn render(keys: &[AccessKey], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        keys,
        |k| AccessKeyRow::from(k),
        |k| k.name.clone(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: AccessKeysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AccessKeysCommand::List { app } => {
            let app = util::resolve_app(session, &app).await?;
            render(&app.access_keys, global);
            Ok(())
        }

        AccessKeysCommand::Set { app, name, rights } => {
            let app = util::resolve_app(session, &app).await?;
            let options = AccessKeyOptions {
                name,
                rights: rights_to_strings(&rights),
            };
            util::confirmed(
                session.client.set_access_key(&app, &options).await,
                Operation::SetAccessKey,
                &app.id,
            )?;
            output::success(global, &format!("Access key '{}' saved", options.name));
            let refreshed = util::refreshed(session, &app.id)?;
            if let Some(key) = refreshed.access_key(&options.name) {
                render(std::slice::from_ref(key), global);
            }
            Ok(())
        }

        AccessKeysCommand::Delete { app, name } => {
            let app = util::resolve_app(session, &app).await?;
            if !util::confirm(
                &format!("Delete access key '{name}' from {}?", app.id),
                global.yes,
            )? {
                return Ok(());
            }
            util::confirmed(
                session.client.delete_access_key(&app, &name).await,
                Operation::DeleteAccessKey,
                &app.id,
            )?;
            output::success(global, &format!("Access key '{name}' deleted"));
            Ok(())
        }
    }
}
