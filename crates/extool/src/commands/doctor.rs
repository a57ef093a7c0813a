//! Diagnostics command.

use anyhow::Result;
use colored::Colorize;
use extool_core::terminal::tmux;
use extool_core::SessionPolicy;

use super::controller;
use crate::config::Config;

pub async fn execute(config: &Config) -> Result<()> {
    println!("{}", "extool Doctor".cyan().bold());
    println!("{}", "─".repeat(50));
    println!();

    let mut issues = Vec::new();

    // Check tmux
    print!("  tmux: ");
    match which::which("tmux") {
        Ok(path) => println!("{} {}", "✓ installed".green(), path.display().to_string().dimmed()),
        Err(_) => {
            println!("{}", "✗ not found".red());
            issues.push("tmux is not installed".to_string());
        }
    }

    // Check config file
    print!("  Config file: ");
    if config.path.exists() {
        println!("{} {}", "✓ exists".green(), config.path.display());
    } else {
        println!("{}", "○ not found (using defaults)".yellow());
    }

    // Check tools
    print!("  Tools: ");
    match controller(config).tools() {
        Ok(tools) if tools.is_empty() => println!("{}", "○ none defined".yellow()),
        Ok(tools) => println!("{}", format!("✓ {} defined", tools.len()).green()),
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push(format!("Cannot read tools: {}", e));
        }
    }

    // Check workspace detection
    print!("  Workspace root: ");
    match std::env::current_dir()
        .ok()
        .and_then(|cwd| config.find_workspace_root(&cwd))
    {
        Some(root) => println!("{} {}", "✓".green(), root.display()),
        None => println!("{}", "○ none found from current directory".yellow()),
    }

    // Check session
    print!("  Session: ");
    match config.session_policy() {
        SessionPolicy::PerDirectory => println!("{}", "○ one per directory".dimmed()),
        SessionPolicy::Shared => {
            let name = &config.terminal.session_name;
            match tmux::session_exists(name) {
                Ok(true) => println!("{} {}", "✓ running".green(), name.cyan()),
                Ok(false) => println!("{} {}", "○ not running".yellow(), name.cyan()),
                Err(_) => println!("{}", "○ unknown".yellow()),
            }
        }
    }

    // Summary
    println!();
    if issues.is_empty() {
        println!("{}", "✓ All checks passed".green().bold());
    } else {
        println!("{}", format!("✗ {} issue(s) found:", issues.len()).red().bold());
        for issue in &issues {
            println!("  • {}", issue);
        }
    }

    Ok(())
}
