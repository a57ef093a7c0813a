//! Command store: named tool definitions synced to settings.
//!
//! Every mutation reads the full list, changes it and writes the full list
//! back. Names are unique; a clash replaces rather than rejects.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::settings::SettingsStore;
use crate::tool::{ToolCollection, ToolDefinition};

/// Tool registry backed by a [`SettingsStore`].
#[derive(Clone)]
pub struct CommandStore {
    settings: Arc<dyn SettingsStore>,
}

impl CommandStore {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Read the full collection.
    pub fn load(&self) -> Result<ToolCollection> {
        self.settings.read_commands()
    }

    /// Find a tool by exact name.
    pub fn find(&self, name: &str) -> Result<Option<ToolDefinition>> {
        Ok(self.load()?.into_iter().find(|t| t.name == name))
    }

    /// Add a tool, or replace the command of the tool with the same name.
    ///
    /// A replaced entry keeps its position. Its working directory is only
    /// changed when one is supplied; new entries default to the project
    /// directory.
    pub fn upsert(&self, name: &str, command: &str, working_directory: Option<&str>) -> Result<()> {
        let mut tools = self.load()?;

        match tools.iter_mut().find(|t| t.name == name) {
            Some(existing) => {
                debug!("Replacing command of tool '{}'", name);
                existing.command = command.to_string();
                if let Some(dir) = working_directory {
                    existing.working_directory = Some(dir.to_string());
                }
            }
            None => {
                debug!("Adding tool '{}'", name);
                let mut tool = ToolDefinition::new(name, command);
                if let Some(dir) = working_directory {
                    tool = tool.with_working_directory(dir);
                }
                tools.push(tool);
            }
        }

        self.settings.write_commands(&tools)
    }

    /// Remove a tool. Returns `false` without writing anything when no tool
    /// has that name.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut tools = self.load()?;

        let Some(index) = tools.iter().position(|t| t.name == name) else {
            return Ok(false);
        };

        tools.remove(index);
        debug!("Removing tool '{}'", name);
        self.settings.write_commands(&tools)?;
        Ok(true)
    }

    /// Rename a tool and replace its command in place.
    ///
    /// If another tool already uses `new_name`, that other tool is dropped so
    /// names stay unique. Returns `false` without writing when `old_name` is
    /// unknown.
    pub fn rename(&self, old_name: &str, new_name: &str, command: &str) -> Result<bool> {
        let mut tools = self.load()?;

        let Some(index) = tools.iter().position(|t| t.name == old_name) else {
            return Ok(false);
        };

        tools[index].name = new_name.to_string();
        tools[index].command = command.to_string();

        let mut position = 0;
        tools.retain(|t| {
            let keep = position == index || t.name != new_name;
            position += 1;
            keep
        });

        debug!("Updated tool '{}' -> '{}'", old_name, new_name);
        self.settings.write_commands(&tools)?;
        Ok(true)
    }

    /// Whether the terminal should be revealed after dispatch.
    pub fn show_terminal(&self) -> Result<bool> {
        self.settings.show_terminal()
    }
}
