//! Command-line interface layer.

use std::process::ExitCode;

use anyhow::Result;

pub mod actions;
pub mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::CommandResult;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(exit_status_from_result(&result).into())
}

/// Commands that gate on issues fail when any problem was reported.
fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    let problems = result.error_count + result.warning_count;
    if result.exit_on_errors && problems > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
