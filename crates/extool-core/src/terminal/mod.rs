//! Terminal session management.
//!
//! ```text
//!            get_or_create
//!   ABSENT ─────────────────► LIVE ──┐
//!     ▲                              │ get_or_create (same handle)
//!     │          dispose             │
//!     └──────────────────────────────┘
//! ```
//!
//! A session is bound to a working directory when it is created and keeps it
//! for its whole life: later invocations that resolve to another directory
//! reuse the same session and move with `cd` instead. If the session is closed
//! behind the manager's back, the next send fails with
//! [`Error::StaleSession`](crate::Error::StaleSession); nothing is recreated
//! automatically.

pub mod tmux;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::scope::normalize_path;

pub use tmux::TmuxBackend;

/// A live interactive shell that accepts command lines.
pub trait Terminal: Send + Sync + fmt::Debug {
    /// Backend-specific identifier (the tmux session name, for instance).
    fn id(&self) -> &str;

    /// Directory the shell started in.
    fn working_directory(&self) -> &Path;

    /// Type `text` into the shell and submit it.
    fn send_text(&self, text: &str) -> Result<()>;

    /// Bring the session to the foreground.
    fn show(&self) -> Result<()>;

    /// Terminate the session.
    fn dispose(&self) -> Result<()>;
}

/// Shared handle to a session. Two handles refer to the same session when
/// `Arc::ptr_eq` holds.
pub type TerminalSession = Arc<dyn Terminal>;

/// What to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    pub name: String,
    pub working_directory: PathBuf,
}

/// Creates sessions.
pub trait TerminalBackend: Send + Sync {
    /// Open a session bound to `spec.working_directory`.
    fn open(&self, spec: &SessionSpec) -> Result<TerminalSession>;

    /// Look up a session that already exists outside this process.
    fn find(&self, _name: &str) -> Result<Option<TerminalSession>> {
        Ok(None)
    }
}

/// How many sessions the manager keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// One session for everything, bound to the first directory used.
    #[default]
    Shared,
    /// One session per working directory.
    PerDirectory,
}

/// Owns the current terminal session(s).
pub struct SessionManager {
    backend: Arc<dyn TerminalBackend>,
    name: String,
    policy: SessionPolicy,
    current: Option<TerminalSession>,
    by_directory: HashMap<PathBuf, TerminalSession>,
}

impl SessionManager {
    /// Default session name.
    pub const DEFAULT_NAME: &'static str = "external";

    pub fn new(backend: Arc<dyn TerminalBackend>, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
            policy: SessionPolicy::Shared,
            current: None,
            by_directory: HashMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Return the live session, or open one bound to `working_directory`.
    pub fn get_or_create(&mut self, working_directory: &Path) -> Result<TerminalSession> {
        match self.policy {
            SessionPolicy::Shared => {
                if let Some(session) = &self.current {
                    debug!("Reusing terminal session {}", session.id());
                    return Ok(session.clone());
                }

                let session = self.open(self.name.clone(), working_directory)?;
                self.current = Some(session.clone());
                Ok(session)
            }
            SessionPolicy::PerDirectory => {
                let key = normalize_path(working_directory);
                if let Some(session) = self.by_directory.get(&key) {
                    debug!("Reusing terminal session {}", session.id());
                    return Ok(session.clone());
                }

                let name = directory_session_name(&self.name, &key);
                let session = self.open(name, &key)?;
                self.by_directory.insert(key, session.clone());
                Ok(session)
            }
        }
    }

    fn open(&self, name: String, working_directory: &Path) -> Result<TerminalSession> {
        let spec = SessionSpec {
            name,
            working_directory: working_directory.to_path_buf(),
        };
        let session = self.backend.open(&spec)?;
        info!(
            "Terminal session {} bound to {}",
            session.id(),
            session.working_directory().display()
        );
        Ok(session)
    }

    /// Take over a session left running by an earlier process, if any.
    ///
    /// Only meaningful for the shared policy; returns the current session
    /// unchanged when one is already live.
    pub fn attach_existing(&mut self) -> Result<Option<TerminalSession>> {
        if let Some(session) = &self.current {
            return Ok(Some(session.clone()));
        }
        if self.policy != SessionPolicy::Shared {
            return Ok(None);
        }

        let found = self.backend.find(&self.name)?;
        if let Some(session) = &found {
            debug!("Attached to existing terminal session {}", session.id());
            self.current = Some(session.clone());
        }
        Ok(found)
    }

    /// Submit one line of text to a session.
    pub fn send(&self, session: &TerminalSession, text: &str) -> Result<()> {
        session.send_text(text)
    }

    /// Bring a session to the foreground.
    pub fn reveal(&self, session: &TerminalSession) -> Result<()> {
        session.show()
    }

    /// The shared session, if one is live.
    pub fn current(&self) -> Option<TerminalSession> {
        self.current.clone()
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some() || !self.by_directory.is_empty()
    }

    /// Terminate every session this manager owns and return to ABSENT.
    ///
    /// All sessions are disposed even if one fails; the first failure is
    /// returned.
    pub fn dispose(&mut self) -> Result<()> {
        let sessions = self
            .current
            .take()
            .into_iter()
            .chain(self.by_directory.drain().map(|(_, s)| s));

        let mut first_error = None;
        for session in sessions {
            debug!("Disposing terminal session {}", session.id());
            if let Err(e) = session.dispose() {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Session name for the per-directory policy: `<base>-<first 8 hex of md5>`.
fn directory_session_name(base: &str, directory: &Path) -> String {
    let digest = format!("{:x}", md5::compute(directory.to_string_lossy().as_bytes()));
    format!("{}-{}", base, &digest[..8])
}
