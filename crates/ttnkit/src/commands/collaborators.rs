//! Collaborator command handlers.

use tabled::Tabled;
use ttnkit_core::{Collaborator, Operation, rights_to_strings};

use crate::cli::{CollaboratorsArgs, CollaboratorsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

#[derive(Tabled)]
struct CollaboratorRow {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Rights")]
    rights: String,
}

pub async fn handle(
    session: &Session,
    args: CollaboratorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CollaboratorsCommand::List { app } => {
            let app = util::resolve_app(session, &app).await?;
            let out = output::render_list(
                &global.output,
                &app.collaborators,
                |c| CollaboratorRow {
                    username: c.username.clone(),
                    rights: c.rights.join(", "),
                },
                |c| c.username.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CollaboratorsCommand::Set {
            app,
            username,
            rights,
        } => {
            let app = util::resolve_app(session, &app).await?;
            let collaborator = Collaborator {
                username,
                rights: rights_to_strings(&rights),
            };
            // Unlike the other mutations, this one reports its own failure.
            session
                .client
                .set_collaborator(&app, &collaborator)
                .await?;
            output::success(
                global,
                &format!(
                    "'{}' granted {} on '{}'",
                    collaborator.username,
                    collaborator.rights.join(", "),
                    app.id
                ),
            );
            Ok(())
        }

        CollaboratorsCommand::Delete { app, username } => {
            let app = util::resolve_app(session, &app).await?;
            if !util::confirm(
                &format!("Remove collaborator '{username}' from {}?", app.id),
                global.yes,
            )? {
                return Ok(());
            }
            util::confirmed(
                session.client.delete_collaborator(&app, &username).await,
                Operation::DeleteCollaborator,
                &app.id,
            )?;
            output::success(global, &format!("Collaborator '{username}' removed"));
            Ok(())
        }
    }
}
