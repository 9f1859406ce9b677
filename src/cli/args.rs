//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `transform`: run the engine on one file and print the result
//! - `scan`: list the route configuration of every page
//! - `init`: write a default configuration file

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

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Transform(cmd)) => cmd.common.verbose,
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the engine commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Name of the macro call (overrides config file)
    #[arg(long)]
    pub macro_name: Option<String>,

    /// Routes folder to scan (overrides config file)
    #[arg(long)]
    pub routes_folder: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TransformCommand {
    /// File to transform
    pub file: PathBuf,

    /// Emit the standalone configuration module instead of the stripped source
    #[arg(long, conflicts_with = "id")]
    pub extract: bool,

    /// Module identifier to use instead of the file path (may carry a query)
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Print pages as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Remove the macro call from a file, or extract its configuration module
    Transform(TransformCommand),
    /// List the name and path declared by every page
    Scan(ScanCommand),
    /// Initialize a new .pagemacrorc.json configuration file
    Init,
}
