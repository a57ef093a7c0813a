//! Terminal prompts backing the controller.
//!
//! An empty answer to a text prompt, or Esc/q at a list, cancels the
//! operation.

use async_trait::async_trait;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use extool_core::{ChoiceItem, Error, Notice, PromptProvider, Result, TextPrompt};

/// [`PromptProvider`] reading from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompts;

impl TerminalPrompts {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}

#[async_trait]
impl PromptProvider for TerminalPrompts {
    async fn prompt_text(&self, request: TextPrompt) -> Result<Option<String>> {
        let theme = ColorfulTheme::default();
        let label = request
            .prompt
            .or(request.placeholder)
            .unwrap_or_default();

        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(label)
            .allow_empty(true);
        if let Some(value) = request.value {
            input = input.with_initial_text(value);
        }

        let answer = input.interact_text().map_err(prompt_error)?;
        Ok(Some(answer))
    }

    async fn prompt_choice(&self, items: Vec<ChoiceItem>) -> Result<Option<ChoiceItem>> {
        let theme = ColorfulTheme::default();
        let rows: Vec<String> = items
            .iter()
            .map(|item| format!("{}  {}", item.label, item.description.dimmed()))
            .collect();

        let index = Select::with_theme(&theme)
            .with_prompt("Select an external tool")
            .items(&rows)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(index.and_then(|i| items.into_iter().nth(i)))
    }

    async fn prompt_confirm_choice(&self, message: &str, options: &[&str]) -> Result<Option<String>> {
        let theme = ColorfulTheme::default();

        let index = Select::with_theme(&theme)
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(index.and_then(|i| options.get(i)).map(|o| o.to_string()))
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Dispatched { tool, session } => {
                println!("{} Sent '{}' to session {}", "✓".green(), tool, session.cyan());
            }
            Notice::Saved { tool } => {
                println!("{} Saved '{}'", "✓".green(), tool);
            }
            Notice::Removed { tool } => {
                println!("{} Removed '{}'", "✓".green(), tool);
            }
            Notice::NoWorkingDirectory { tool } => {
                eprintln!(
                    "{} Cannot run '{}': no workspace root or active file",
                    "✗".red(),
                    tool
                );
            }
        }
    }
}
