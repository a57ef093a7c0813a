//! Persisted settings backing the command store.
//!
//! Settings live under a namespace table (`[external]` by default) in a TOML
//! file that may also hold unrelated tables. Writes replace only the
//! `commands` key of the namespace and leave everything else in place.

use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tool::{ToolCollection, ToolDefinition};

/// Namespace table holding tool settings.
pub const DEFAULT_NAMESPACE: &str = "external";

const COMMANDS_FIELD: &str = "commands";
const SHOW_TERMINAL_FIELD: &str = "show_terminal";
const SHOW_TERMINAL_ALIAS: &str = "showTerminal";

/// Storage for the tool collection and the `show_terminal` flag.
///
/// Implementations read and write the whole list; there are no deltas.
pub trait SettingsStore: Send + Sync {
    /// Read every configured tool. Missing settings yield an empty list.
    fn read_commands(&self) -> Result<ToolCollection>;

    /// Replace the persisted tool list.
    fn write_commands(&self, commands: &[ToolDefinition]) -> Result<()>;

    /// Whether the terminal should be brought forward after dispatch.
    fn show_terminal(&self) -> Result<bool>;
}

/// Settings stored in a TOML file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    namespace: String,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table> {
        if !self.path.exists() {
            return Ok(Table::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Persistence(format!("{}: {}", self.path.display(), e)))?;
        Ok(content.parse::<Table>()?)
    }

    fn section<'a>(&self, table: &'a Table) -> Option<&'a Table> {
        table.get(&self.namespace).and_then(Value::as_table)
    }
}

impl SettingsStore for FileSettings {
    fn read_commands(&self) -> Result<ToolCollection> {
        let table = self.read_table()?;
        match self.section(&table).and_then(|s| s.get(COMMANDS_FIELD)) {
            Some(value) => Ok(value.clone().try_into()?),
            None => Ok(Vec::new()),
        }
    }

    fn write_commands(&self, commands: &[ToolDefinition]) -> Result<()> {
        let mut table = self.read_table()?;

        let section = table
            .entry(self.namespace.clone())
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| {
                Error::Persistence(format!(
                    "[{}] in {} is not a table",
                    self.namespace,
                    self.path.display()
                ))
            })?;
        section.insert(COMMANDS_FIELD.to_string(), Value::try_from(commands)?);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Persistence(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let content = toml::to_string_pretty(&table)?;
        std::fs::write(&self.path, content)
            .map_err(|e| Error::Persistence(format!("{}: {}", self.path.display(), e)))?;

        debug!(
            "Wrote {} tool(s) to {}",
            commands.len(),
            self.path.display()
        );
        Ok(())
    }

    fn show_terminal(&self) -> Result<bool> {
        let table = self.read_table()?;
        let flag = self.section(&table).and_then(|s| {
            s.get(SHOW_TERMINAL_FIELD)
                .or_else(|| s.get(SHOW_TERMINAL_ALIAS))
                .and_then(Value::as_bool)
        });
        Ok(flag.unwrap_or(false))
    }
}
