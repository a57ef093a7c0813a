//! extool-core - Core library for extool
//!
//! Named shell commands ("external tools") that run in a reusable terminal
//! session, in a directory derived from the current project or file:
//!
//! - **store**: the tool registry, synced to persisted settings
//! - **settings**: settings storage (TOML file or in-memory)
//! - **scope**: `$ProjectFileDir$` / `$FilePath$` expansion
//! - **terminal**: terminal session lifecycle (tmux backend)
//! - **controller**: tool invocation and the define/update/remove flows
//! - **prompt**: the interface a UI implements to drive the controller

pub mod controller;
pub mod error;
pub mod prompt;
pub mod scope;
pub mod settings;
pub mod store;
pub mod terminal;
pub mod testing;
pub mod tool;

// Re-export commonly used types
pub use controller::{Dispatch, Outcome, ToolController};
pub use error::{Error, Result};
pub use prompt::{ChoiceItem, Notice, PromptProvider, TextPrompt};
pub use scope::{ExecutionScope, HostContext};
pub use settings::{FileSettings, SettingsStore};
pub use store::CommandStore;
pub use terminal::{SessionManager, SessionPolicy, TerminalBackend, TerminalSession, TmuxBackend};
pub use tool::{ToolCollection, ToolDefinition};
