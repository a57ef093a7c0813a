//! Configuration management for extool.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (EXTOOL_*)
//! 2. Config file (EXTOOL_CONFIG, or config.toml in the platform config dir)
//! 3. Default values
//!
//! The tool list lives in the same file under `[external]`. That table
//! belongs to [`FileSettings`] and is ignored here.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use extool_core::{FileSettings, SessionManager, SessionPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Terminal session settings
    #[serde(default)]
    pub terminal: TerminalConfig,

    /// Workspace root detection
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Where this configuration was read from
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// tmux session name
    #[serde(default = "default_session_name")]
    pub session_name: String,

    /// One session per working directory instead of one shared session
    #[serde(default)]
    pub per_directory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Files or directories that mark a workspace root
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

// Default value functions
fn default_session_name() -> String {
    SessionManager::DEFAULT_NAME.to_string()
}

fn default_markers() -> Vec<String> {
    vec![".git".to_string(), ".hg".to_string(), ".svn".to_string()]
}

fn default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "extool", "extool") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".extool")
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            session_name: default_session_name(),
            per_directory: false,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;

        if let Ok(name) = std::env::var("EXTOOL_SESSION") {
            if !name.is_empty() {
                config.terminal.session_name = name;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config: Config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Config::default()
        };

        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("EXTOOL_CONFIG") {
            PathBuf::from(path)
        } else {
            default_config_dir().join("config.toml")
        }
    }

    /// Tool settings stored alongside this configuration.
    pub fn settings(&self) -> FileSettings {
        FileSettings::new(&self.path)
    }

    pub fn session_policy(&self) -> SessionPolicy {
        if self.terminal.per_directory {
            SessionPolicy::PerDirectory
        } else {
            SessionPolicy::Shared
        }
    }

    /// Nearest ancestor of `start` (inclusive) containing a workspace marker.
    pub fn find_workspace_root(&self, start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if self
                .workspace
                .markers
                .iter()
                .any(|marker| current.join(marker).exists())
            {
                return Some(current);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}
