//! Tool registry commands: add, remove, update, list.

use anyhow::{bail, Result};
use colored::Colorize;
use extool_core::{Outcome, ToolDefinition};

use super::{controller, report};
use crate::config::Config;

pub async fn add(
    name: Option<String>,
    command: Vec<String>,
    cwd: Option<String>,
    config: &Config,
) -> Result<()> {
    let mut controller = controller(config);

    let Some(name) = name else {
        let outcome = controller.define().await?;
        report(&outcome);
        return Ok(());
    };

    let name = name.trim();
    if name.is_empty() {
        bail!("Tool name cannot be empty");
    }

    let outcome = if command.is_empty() {
        controller.define_command(name, cwd.as_deref()).await?
    } else {
        controller.add(name, &command.join(" "), cwd.as_deref())?
    };

    report(&outcome);
    Ok(())
}

pub async fn remove(name: Option<String>, config: &Config) -> Result<()> {
    let mut controller = controller(config);

    let outcome = match name {
        Some(name) => match controller.remove(&name)? {
            Outcome::NotFound => bail!("Tool '{}' not found", name),
            outcome => outcome,
        },
        None => controller.remove_interactive().await?,
    };

    report(&outcome);
    Ok(())
}

pub async fn update(config: &Config) -> Result<()> {
    let mut controller = controller(config);
    let outcome = controller.update_interactive().await?;
    report(&outcome);
    Ok(())
}

pub async fn list(json: bool, config: &Config) -> Result<()> {
    let controller = controller(config);
    let tools = controller.tools()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    if tools.is_empty() {
        println!("{}", "No external tools defined".yellow());
        println!("  Config: {}", config.path.display());
        return Ok(());
    }

    println!("{}", "External Tools".cyan().bold());
    println!("{}", "─".repeat(60));
    for tool in &tools {
        print_tool(tool);
    }
    println!();
    println!("{} tool(s)", tools.len());

    Ok(())
}

fn print_tool(tool: &ToolDefinition) {
    println!("  {} {}", tool.name.green().bold(), tool.command);
    if let Some(cwd) = &tool.working_directory {
        println!("    {} {}", "cwd:".dimmed(), cwd.dimmed());
    }
}
