//! Command implementations for the extool CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod doctor;
pub mod run;
pub mod session;
pub mod tool;

use std::sync::Arc;

use colored::Colorize;
use extool_core::{CommandStore, Outcome, SessionManager, TmuxBackend, ToolController};

use crate::config::Config;
use crate::prompt::TerminalPrompts;

/// Wire the controller to the config file, tmux and the terminal prompts.
pub fn controller(config: &Config) -> ToolController<TerminalPrompts> {
    let store = CommandStore::new(Arc::new(config.settings()));
    let sessions = SessionManager::new(Arc::new(TmuxBackend::new()), &config.terminal.session_name)
        .with_policy(config.session_policy());

    ToolController::new(store, sessions, TerminalPrompts::new())
}

/// Print the outcomes the prompt provider does not already announce.
pub fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Cancelled => println!("{}", "Cancelled".dimmed()),
        Outcome::NotFound => println!("{} Tool no longer exists", "○".yellow()),
        Outcome::NoToolsDefined => {
            println!("{} No external tools defined", "○".yellow());
            println!("  Define one with: extool add <name> <command>");
        }
        Outcome::NoWorkingDirectory
        | Outcome::Saved(_)
        | Outcome::Removed(_)
        | Outcome::Dispatched(_) => {}
    }
}
