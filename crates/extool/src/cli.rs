//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run named external tools in a reusable terminal session
///
/// Tool commands may use `$ProjectFileDir$` and `$FilePath$`, which expand to
/// the workspace root and the file passed with `--file`.
#[derive(Parser, Debug)]
#[command(name = "extool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Define a tool, or replace the command of an existing one
    Add {
        /// Tool name (prompted for when omitted)
        name: Option<String>,

        /// Command to run; everything after the name (prompted for when omitted)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,

        /// Directory to cd into before running (defaults to $ProjectFileDir$)
        #[arg(long)]
        cwd: Option<String>,
    },

    /// Remove a tool
    Remove {
        /// Tool name (pick from a list when omitted)
        name: Option<String>,
    },

    /// Rename a tool or change its command
    Update,

    /// Run a tool in the terminal session
    Run {
        /// Tool name (pick from a list when omitted)
        name: Option<String>,

        /// File substituted for $FilePath$
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Workspace root substituted for $ProjectFileDir$
        /// (defaults to the nearest directory with a workspace marker)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// List defined tools
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Bring the terminal session to the foreground
    Attach,

    /// Terminate the terminal session
    Kill,

    /// Run diagnostics
    Doctor,

    /// Show version
    Version,
}
