//! Command dispatch: bridges CLI args -> `SyncClient` operations -> output.

pub mod access_keys;
pub mod apps;
pub mod collaborators;
pub mod config_cmd;
pub mod devices;
pub mod euis;
pub mod util;

use std::sync::Arc;

use ttnkit_core::{DataStore, SyncClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// What an API-bound command handler works with: the sync client and
/// the store it resynchronizes into.
pub struct Session {
    pub client: SyncClient,
    pub store: Arc<DataStore>,
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Apps(args) => apps::handle(session, args, global).await,
        Command::Devices(args) => devices::handle(session, args, global).await,
        Command::Euis(args) => euis::handle(session, args, global).await,
        Command::AccessKeys(args) => access_keys::handle(session, args, global).await,
        Command::Collaborators(args) => collaborators::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
