//! Placeholder expansion against an execution scope.
//!
//! Two literal tokens are recognized in command and directory templates:
//!
//! | Token | Replacement |
//! |-------|-------------|
//! | `$ProjectFileDir$` | the project directory, normalized |
//! | `$FilePath$` | the active file, normalized, or `""` when there is none |
//!
//! Only the first occurrence of each token is replaced. Existing tool
//! definitions rely on this, so a template such as
//! `"$ProjectFileDir$ $ProjectFileDir$"` keeps its second token verbatim.
//! Unknown `$...$` tokens are left alone.

use std::path::{Component, Path, PathBuf};

/// Token replaced with the project directory.
pub const PROJECT_FILE_DIR: &str = "$ProjectFileDir$";

/// Token replaced with the active file path.
pub const FILE_PATH: &str = "$FilePath$";

/// What the host knows at the moment a tool is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Root of the open workspace, if any.
    pub workspace_root: Option<PathBuf>,
    /// File the user is currently working on, if any.
    pub active_file: Option<PathBuf>,
}

impl HostContext {
    pub fn new(workspace_root: Option<PathBuf>, active_file: Option<PathBuf>) -> Self {
        Self {
            workspace_root,
            active_file,
        }
    }

    /// The directory an invocation runs against: the workspace root, else the
    /// directory containing the active file.
    pub fn project_directory(&self) -> Option<PathBuf> {
        if let Some(root) = &self.workspace_root {
            return Some(root.clone());
        }
        self.active_file
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

/// Resolved paths for a single invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionScope {
    pub project_directory: PathBuf,
    pub active_file_path: Option<PathBuf>,
}

impl ExecutionScope {
    /// Build a scope, normalizing both paths.
    pub fn new(project_directory: impl AsRef<Path>, active_file_path: Option<&Path>) -> Self {
        Self {
            project_directory: normalize_path(project_directory.as_ref()),
            active_file_path: active_file_path.map(normalize_path),
        }
    }
}

/// Expand the first occurrence of each placeholder token in `template`.
pub fn expand(template: &str, scope: &ExecutionScope) -> String {
    let project_dir = normalize_path(&scope.project_directory);
    let file_path = scope
        .active_file_path
        .as_deref()
        .map(|p| normalize_path(p).display().to_string())
        .unwrap_or_default();

    template
        .replacen(PROJECT_FILE_DIR, &project_dir.display().to_string(), 1)
        .replacen(FILE_PATH, &file_path, 1)
}

/// Lexically normalize a path: drop `.`, resolve `..` against preceding
/// components, collapse repeated separators and use native separators.
///
/// The filesystem is never consulted, so symlinks are not resolved and the
/// path does not need to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
