use std::path::Path;

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, find::find, init::init, sync::sync},
};

/// Dispatch a parsed command to its handler.
///
/// `serve` runs outside this path since it owns the process until stdin
/// closes.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Find(cmd)) => find(cmd),
        Some(Command::Init) => init(Path::new(".")),
        Some(Command::Serve) => bail!("Serve command should be handled before run()"),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
