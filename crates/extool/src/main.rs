//! extool - External tool runner
//!
//! Named shell commands, run in a reusable tmux session from the current
//! workspace.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod prompt;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `list --json` stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("extool=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;

    // Execute command
    match cli.command {
        Commands::Add { name, command, cwd } => {
            commands::tool::add(name, command, cwd, &config).await
        }
        Commands::Remove { name } => commands::tool::remove(name, &config).await,
        Commands::Update => commands::tool::update(&config).await,
        Commands::Run { name, file, root } => {
            commands::run::execute(name, file, root, &config).await
        }
        Commands::List { json } => commands::tool::list(json, &config).await,
        Commands::Attach => commands::session::attach(&config).await,
        Commands::Kill => commands::session::kill(&config).await,
        Commands::Doctor => commands::doctor::execute(&config).await,
        Commands::Version => {
            println!("extool {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
