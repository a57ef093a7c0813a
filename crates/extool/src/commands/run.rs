//! Run a tool in the terminal session.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use extool_core::{HostContext, Outcome};
use tracing::debug;

use super::{controller, report};
use crate::config::Config;

pub async fn execute(
    name: Option<String>,
    file: Option<PathBuf>,
    root: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let ctx = host_context(file, root, config)?;
    debug!(
        "Workspace root: {:?}, active file: {:?}",
        ctx.workspace_root, ctx.active_file
    );

    let mut controller = controller(config);
    let outcome = match name {
        Some(name) => match controller.invoke(&name, &ctx).await? {
            Outcome::NotFound => bail!("Tool '{}' not found", name),
            outcome => outcome,
        },
        None => controller.run(&ctx).await?,
    };

    if outcome == Outcome::NoWorkingDirectory {
        bail!("Invocation failed: no working directory");
    }
    report(&outcome);
    Ok(())
}

/// Resolve the workspace root and active file for an invocation.
///
/// An explicit `--root` wins; otherwise the nearest marked ancestor of the
/// current directory is used, if any.
fn host_context(file: Option<PathBuf>, root: Option<PathBuf>, config: &Config) -> Result<HostContext> {
    let workspace_root = match root {
        Some(root) => Some(absolute(&root)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            config.find_workspace_root(&cwd)
        }
    };

    let active_file = file.map(|f| absolute(&f)).transpose()?;

    Ok(HostContext::new(workspace_root, active_file))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}
