//! Application command handlers.

use tabled::Tabled;
use ttnkit_core::{Application, ApplicationDraft, Operation};

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Handler")]
    handler: String,
    #[tabled(rename = "EUIs")]
    euis: usize,
    #[tabled(rename = "Keys")]
    access_keys: usize,
    #[tabled(rename = "Collaborators")]
    collaborators: usize,
}

impl From<&Application> for AppRow {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id.clone(),
            name: app.name.clone(),
            handler: output::or_dash(app.handler.as_deref()),
            euis: app.euis.len(),
            access_keys: app.access_keys.len(),
            collaborators: app.collaborators.len(),
        }
    }
}

pub(super) fn detail(app: &Application) -> String {
    let mut lines = vec![
        format!("ID:            {}", app.id),
        format!("Name:          {}", app.name),
        format!("Handler:       {}", output::or_dash(app.handler.as_deref())),
        format!(
            "EUIs:          {}",
            if app.euis.is_empty() {
                "-".into()
            } else {
                app.euis.join(", ")
            }
        ),
        format!("Access keys:   {}", app.access_keys.len()),
        format!("Collaborators: {}", app.collaborators.len()),
    ];
    if let Some(created) = app.created {
        lines.push(format!("Created:       {}", created.to_rfc3339()));
    }
    if let Some(updated) = app.updated {
        lines.push(format!("Updated:       {}", updated.to_rfc3339()));
    }
    lines.join("\n")
}

fn draft(app: String, name: String, handler: Option<String>) -> ApplicationDraft {
    let draft = ApplicationDraft::new(app, name);
    match handler {
        Some(handler) => draft.with_handler(handler),
        None => draft,
    }
}

fn print_refreshed(session: &Session, app_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let app = util::refreshed(session, app_id)?;
    let out = output::render_single(&global.output, app.as_ref(), detail, |a| a.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AppsCommand::List => {
            let apps = session.client.list_applications().await?;
            let out = output::render_list(
                &global.output,
                &apps,
                |a| AppRow::from(a),
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Get { app } => {
            let app = util::resolve_app(session, &app).await?;
            let out = output::render_single(&global.output, &app, detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Create { app, name, handler } => {
            let draft = draft(app, name, handler);
            util::confirmed(
                session.client.create_application(&draft).await,
                Operation::CreateApplication,
                &draft.id,
            )?;
            output::success(global, &format!("Application '{}' created", draft.id));
            print_refreshed(session, &draft.id, global)
        }

        AppsCommand::Update { app, name, handler } => {
            let draft = draft(app, name, handler);
            util::confirmed(
                session.client.update_application(&draft).await,
                Operation::UpdateApplication,
                &draft.id,
            )?;
            output::success(global, &format!("Application '{}' updated", draft.id));
            print_refreshed(session, &draft.id, global)
        }

        AppsCommand::Delete { app } => {
            let app = util::resolve_app(session, &app).await?;
            if !util::confirm(&format!("Delete application {}?", app.id), global.yes)? {
                return Ok(());
            }
            util::confirmed(
                session.client.delete_application(&app).await,
                Operation::DeleteApplication,
                &app.id,
            )?;
            output::success(
                global,
                &format!(
                    "Application '{}' deleted ({} remaining)",
                    app.id,
                    session.store.application_count()
                ),
            );
            Ok(())
        }

        AppsCommand::SetHandler { app, handler } => {
            util::confirmed(
                session.client.set_handler(&app, &handler).await,
                Operation::SetHandler,
                &app,
            )?;
            if handler == ttnkit_core::UNREGISTERED_HANDLER {
                output::success(global, &format!("Handler registration removed from '{app}'"));
            } else {
                output::success(global, &format!("Handler '{handler}' registered for '{app}'"));
            }
            Ok(())
        }
    }
}
