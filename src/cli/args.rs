//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report missing and obsolete translation keys
//! - `sync`: Add missing keys and remove obsolete ones
//! - `find`: List source files referencing a key
//! - `init`: Initialize the lemmascan configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::Find(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(long, env = "LEMMASCAN_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Lang folder path (overrides config file)
    #[arg(long)]
    pub lang_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only report missing keys
    #[arg(long)]
    pub no_obsolete: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write locale files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Do not remove obsolete keys
    #[arg(long)]
    pub keep_obsolete: bool,

    /// Write group files as flat `"a.b": "..."` objects (overrides config file)
    #[arg(long)]
    pub output_flat: bool,
}

#[derive(Debug, Args)]
pub struct FindCommand {
    /// Text to look for in translation keys
    pub lemma: String,

    /// Treat the lemma as a regular expression
    #[arg(short, long)]
    pub regex: bool,

    /// Print paths relative to the project root
    #[arg(short, long)]
    pub short: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report translation keys missing from or obsolete in locale files
    Check(CheckCommand),
    /// Add missing keys to locale files and remove obsolete ones
    Sync(SyncCommand),
    /// Find source files referencing a translation key
    Find(FindCommand),
    /// Initialize a new .lemmascan.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
