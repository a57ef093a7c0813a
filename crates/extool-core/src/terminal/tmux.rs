//! tmux-backed terminal sessions.
//!
//! Provides low-level tmux operations for:
//! - Session creation and teardown
//! - Sending literal command lines to a session
//! - Bringing a session to the foreground
//!
//! A session outlives the process that created it, so opening a session whose
//! name already exists adopts it instead of creating a new one. The adopted
//! session keeps the directory it was created in.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{SessionSpec, Terminal, TerminalBackend, TerminalSession};
use crate::error::{Error, Result};

/// Check if tmux is installed and available.
pub fn check_tmux() -> Result<()> {
    match which::which("tmux") {
        Ok(path) => {
            debug!("Found tmux at: {:?}", path);
            Ok(())
        }
        Err(_) => Err(Error::TmuxNotFound),
    }
}

/// Check if a tmux session exists.
pub fn session_exists(session_name: &str) -> Result<bool> {
    let output = Command::new("tmux")
        .args(["has-session", "-t", &exact_target(session_name)])
        .output()?;

    Ok(output.status.success())
}

/// Create a detached tmux session running the default shell.
pub fn create_session(session_name: &str, working_directory: &Path) -> Result<()> {
    if session_exists(session_name)? {
        return Err(Error::Tmux(format!(
            "Session already exists: {}",
            session_name
        )));
    }

    let cwd = working_directory.to_string_lossy();
    let output = Command::new("tmux")
        .args(["new-session", "-d", "-s", session_name, "-c", &cwd])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Tmux(stderr.to_string()));
    }

    debug!("Created tmux session: {} in {}", session_name, cwd);
    Ok(())
}

/// Kill a tmux session. A session that is already gone is not an error.
pub fn kill_session(session_name: &str) -> Result<()> {
    if !session_exists(session_name)? {
        debug!("tmux session already gone: {}", session_name);
        return Ok(());
    }

    let output = Command::new("tmux")
        .args(["kill-session", "-t", &exact_target(session_name)])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Tmux(stderr.to_string()));
    }

    debug!("Killed tmux session: {}", session_name);
    Ok(())
}

/// Type a line into a session and press Enter.
///
/// The text is sent with `-l` so words such as `Enter` or `C-c` inside a
/// command are typed rather than interpreted as key names.
pub fn send_line(session_name: &str, text: &str) -> Result<()> {
    if !session_exists(session_name)? {
        return Err(Error::StaleSession(session_name.to_string()));
    }

    let target = exact_target(session_name);

    if !text.is_empty() {
        let output = Command::new("tmux")
            .args(["send-keys", "-t", &target, "-l", text])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Tmux(format!("send-keys failed: {}", stderr)));
        }
    }

    let output = Command::new("tmux")
        .args(["send-keys", "-t", &target, "Enter"])
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Tmux(format!("send-keys failed: {}", stderr)));
    }

    debug!("Sent line to session {}: {}", session_name, text);
    Ok(())
}

/// Bring a session to the foreground.
///
/// Inside tmux the current client switches to the session; outside, this
/// attaches and blocks until the user detaches.
pub fn focus_session(session_name: &str) -> Result<()> {
    if !session_exists(session_name)? {
        return Err(Error::StaleSession(session_name.to_string()));
    }

    let subcommand = if std::env::var_os("TMUX").is_some() {
        "switch-client"
    } else {
        "attach-session"
    };

    let status = Command::new("tmux")
        .args([subcommand, "-t", &exact_target(session_name)])
        .status()?;

    if !status.success() {
        warn!("tmux {} exited with non-zero status", subcommand);
    }

    Ok(())
}

/// The directory a session was created in.
pub fn session_path(session_name: &str) -> Result<Option<PathBuf>> {
    let output = Command::new("tmux")
        .args([
            "display-message",
            "-p",
            "-t",
            &exact_target(session_name),
            "#{session_path}",
        ])
        .output()?;

    if !output.status.success() {
        return Ok(None);
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

/// `=name` makes tmux match the session name exactly instead of by prefix.
fn exact_target(session_name: &str) -> String {
    format!("={}", session_name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Opens tmux sessions by name.
#[derive(Debug, Default, Clone, Copy)]
pub struct TmuxBackend;

impl TmuxBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalBackend for TmuxBackend {
    fn open(&self, spec: &SessionSpec) -> Result<TerminalSession> {
        check_tmux()?;

        if session_exists(&spec.name)? {
            let working_directory =
                session_path(&spec.name)?.unwrap_or_else(|| spec.working_directory.clone());
            debug!("Adopting existing tmux session: {}", spec.name);
            return Ok(Arc::new(TmuxTerminal {
                name: spec.name.clone(),
                working_directory,
            }));
        }

        create_session(&spec.name, &spec.working_directory)?;
        Ok(Arc::new(TmuxTerminal {
            name: spec.name.clone(),
            working_directory: spec.working_directory.clone(),
        }))
    }

    fn find(&self, name: &str) -> Result<Option<TerminalSession>> {
        check_tmux()?;

        if !session_exists(name)? {
            return Ok(None);
        }

        let working_directory = session_path(name)?.unwrap_or_default();
        Ok(Some(Arc::new(TmuxTerminal {
            name: name.to_string(),
            working_directory,
        })))
    }
}

/// Handle to one tmux session.
#[derive(Debug)]
pub struct TmuxTerminal {
    name: String,
    working_directory: PathBuf,
}

impl Terminal for TmuxTerminal {
    fn id(&self) -> &str {
        &self.name
    }

    fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    fn send_text(&self, text: &str) -> Result<()> {
        send_line(&self.name, text)
    }

    fn show(&self) -> Result<()> {
        focus_session(&self.name)
    }

    fn dispose(&self) -> Result<()> {
        kill_session(&self.name)
    }
}
