//! The seam between the core and whatever UI drives it.
//!
//! Prompts suspend the current operation until the user answers. `Ok(None)`
//! means the user dismissed the prompt; callers abort without side effects.

use async_trait::async_trait;

use crate::error::Result;
use crate::tool::ToolDefinition;

/// A free-text prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPrompt {
    /// Hint shown while the input is empty.
    pub placeholder: Option<String>,
    /// Label shown next to the input.
    pub prompt: Option<String>,
    /// Prefilled value.
    pub value: Option<String>,
}

impl TextPrompt {
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            placeholder: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn prefilled(prompt: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

/// One entry of a pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub label: String,
    pub description: String,
}

impl From<&ToolDefinition> for ChoiceItem {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            label: tool.name.clone(),
            description: tool.command.clone(),
        }
    }
}

/// Fire-and-forget messages from the core to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Neither a workspace root nor an active file was available.
    NoWorkingDirectory { tool: String },
    /// Command lines were handed to a terminal session.
    Dispatched { tool: String, session: String },
    /// A tool was added or changed.
    Saved { tool: String },
    /// A tool was removed.
    Removed { tool: String },
}

/// User interaction required by the controller.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    /// Ask for a line of text.
    async fn prompt_text(&self, request: TextPrompt) -> Result<Option<String>>;

    /// Ask the user to pick one item.
    async fn prompt_choice(&self, items: Vec<ChoiceItem>) -> Result<Option<ChoiceItem>>;

    /// Show a message with a set of buttons; returns the chosen option.
    async fn prompt_confirm_choice(&self, message: &str, options: &[&str]) -> Result<Option<String>>;

    /// Tell the user something happened.
    fn notify(&self, notice: Notice);
}
