//! Command dispatch: bridges CLI args -> console sessions -> output formatting.

pub mod config_cmd;
pub mod datasets;
pub mod environments;
pub mod maintenance;
pub mod metadata_forms;
pub mod organizations;
pub mod util;

use dataall_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Toasts;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
    toasts: &mut Toasts,
) -> Result<(), CliError> {
    match cmd {
        Command::Datasets(args) => datasets::handle(console, args, global).await,
        Command::Environments(args) => environments::handle(console, args, global).await,
        Command::Organizations(args) => organizations::handle(console, args, global).await,
        Command::MetadataForms(args) => metadata_forms::handle(console, args, global).await,
        Command::Maintenance(args) => maintenance::handle(console, args, global, toasts).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Api {
            message: "command does not talk to the API".into(),
        }),
    }
}
