//! EUI command handlers.

use ttnkit_core::{EuiDescriptor, Operation};

use crate::cli::{EuisArgs, EuisCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

fn detail(eui: &EuiDescriptor) -> String {
    let mut lines = vec![format!("EUI: {}", output::or_dash(eui.eui.as_deref()))];
    lines.extend(eui.extra.iter().map(|(k, v)| format!("{k}: {v}")));
    lines.join("\n")
}

pub async fn handle(session: &Session, args: EuisArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        EuisCommand::Create { app } => {
            let app = util::resolve_app(session, &app).await?;
            let eui = util::confirmed(
                session.client.create_eui(&app).await,
                Operation::CreateEui,
                &app.id,
            )?;
            let total = util::refreshed(session, &app.id)?.euis.len();
            output::success(global, &format!("EUI issued for '{}' ({total} total)", app.id));
            let out = output::render_single(&global.output, &eui, detail, |e| {
                e.eui.clone().unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EuisCommand::Delete { app, eui } => {
            let app = util::resolve_app(session, &app).await?;
            if !util::confirm(&format!("Release EUI {eui} from {}?", app.id), global.yes)? {
                return Ok(());
            }
            util::confirmed(
                session.client.delete_eui(&app, &eui).await,
                Operation::DeleteEui,
                &app.id,
            )?;
            output::success(global, &format!("EUI {eui} released"));
            Ok(())
        }
    }
}
