//! Tool definitions as they are persisted.

use serde::{Deserialize, Serialize};

use crate::scope::PROJECT_FILE_DIR;

/// A named shell command with an optional working-directory override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique, user-facing key.
    pub name: String,

    /// Raw shell text; may contain placeholder tokens.
    pub command: String,

    /// Directory to `cd` into before running; may contain placeholder tokens.
    #[serde(
        default,
        rename = "cwd",
        alias = "workingDirectory",
        alias = "working_directory",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_directory: Option<String>,
}

impl ToolDefinition {
    /// A new definition rooted at the project directory.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            working_directory: Some(PROJECT_FILE_DIR.to_string()),
        }
    }

    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }
}

/// Ordered tool definitions. Order is insertion order; replacing an entry
/// keeps its index.
pub type ToolCollection = Vec<ToolDefinition>;
