//! Terminal session commands: attach, kill.

use anyhow::Result;
use colored::Colorize;
use extool_core::SessionPolicy;

use super::controller;
use crate::config::Config;

pub async fn attach(config: &Config) -> Result<()> {
    let mut controller = controller(config);
    let sessions = controller.sessions_mut();

    match sessions.attach_existing()? {
        Some(session) => sessions.reveal(&session)?,
        None => print_no_session(config),
    }

    Ok(())
}

pub async fn kill(config: &Config) -> Result<()> {
    let mut controller = controller(config);

    match controller.sessions_mut().attach_existing()? {
        Some(session) => {
            let id = session.id().to_string();
            controller.shutdown()?;
            println!("{} Killed session {}", "✓".green(), id.cyan());
        }
        None => print_no_session(config),
    }

    Ok(())
}

fn print_no_session(config: &Config) {
    match config.session_policy() {
        SessionPolicy::Shared => println!(
            "{} No session named {}",
            "○".yellow(),
            config.terminal.session_name.cyan()
        ),
        SessionPolicy::PerDirectory => println!(
            "{} Sessions are per directory; use tmux directly to manage them",
            "○".yellow()
        ),
    }
}
