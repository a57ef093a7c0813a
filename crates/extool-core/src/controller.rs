//! Tool invocation and the interactive define/update/remove flows.
//!
//! ```text
//! run ──► pick tool ──► invoke
//!                         │
//!                         ├─► CommandStore::load / find
//!                         ├─► HostContext::project_directory
//!                         ├─► scope::expand (cwd, command)
//!                         └─► SessionManager::get_or_create ──► send [cd] + command
//! ```
//!
//! Every operation takes `&mut self`, so two operations never overlap: each
//! runs to completion, or sits awaiting the prompt provider, before the next
//! one starts. Dismissing a prompt aborts the operation with nothing written.


use tracing::{debug, warn};

use crate::error::Result;
use crate::prompt::{ChoiceItem, Notice, PromptProvider, TextPrompt};
use crate::scope::{expand, ExecutionScope, HostContext};
use crate::store::CommandStore;
use crate::terminal::SessionManager;
use crate::tool::{ToolCollection, ToolDefinition};

const DEFINE_OPTION: &str = "Define";
const CANCEL_OPTION: &str = "Cancel";

/// How an operation ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user dismissed a prompt.
    Cancelled,
    /// The named tool no longer exists.
    NotFound,
    /// There is nothing to pick from.
    NoToolsDefined,
    /// Neither a workspace root nor an active file was available.
    NoWorkingDirectory,
    /// A tool was added or changed.
    Saved(String),
    /// A tool was removed.
    Removed(String),
    /// Lines were sent to a terminal session.
    Dispatched(Dispatch),
}

/// What an invocation sent, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub tool: String,
    pub session: String,
    pub lines: Vec<String>,
}

/// Orchestrates the command store, scope resolution and terminal sessions on
/// behalf of a prompt provider.
pub struct ToolController<P: PromptProvider> {
    store: CommandStore,
    sessions: SessionManager,
    prompts: P,
}

impl<P: PromptProvider> ToolController<P> {
    pub fn new(store: CommandStore, sessions: SessionManager, prompts: P) -> Self {
        Self {
            store,
            sessions,
            prompts,
        }
    }

    pub fn store(&self) -> &CommandStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionManager {
        &mut self.sessions
    }

    pub fn prompts(&self) -> &P {
        &self.prompts
    }

    /// All configured tools.
    pub fn tools(&self) -> Result<ToolCollection> {
        self.store.load()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invocation
    // ─────────────────────────────────────────────────────────────────────────

    /// Pick a tool and invoke it. With no tools configured, offer to define
    /// one instead.
    pub async fn run(&mut self, ctx: &HostContext) -> Result<Outcome> {
        let tools = self.store.load()?;

        if tools.is_empty() {
            let action = self
                .prompts
                .prompt_confirm_choice("No external tools defined.", &[DEFINE_OPTION, CANCEL_OPTION])
                .await?;
            return match action.as_deref() {
                Some(DEFINE_OPTION) => self.define().await,
                _ => Ok(Outcome::NoToolsDefined),
            };
        }

        let Some(selected) = self.pick(&tools).await? else {
            return Ok(Outcome::Cancelled);
        };
        self.invoke(&selected.label, ctx).await
    }

    /// Invoke the tool named `name` in the context the host provides.
    pub async fn invoke(&mut self, name: &str, ctx: &HostContext) -> Result<Outcome> {
        let tools = self.store.load()?;
        if tools.is_empty() {
            return Ok(Outcome::NoToolsDefined);
        }

        let Some(tool) = tools.into_iter().find(|t| t.name == name) else {
            debug!("Tool '{}' is no longer defined", name);
            return Ok(Outcome::NotFound);
        };

        let Some(project_directory) = ctx.project_directory() else {
            warn!("No working directory for tool '{}'", tool.name);
            self.prompts.notify(Notice::NoWorkingDirectory {
                tool: tool.name.clone(),
            });
            return Ok(Outcome::NoWorkingDirectory);
        };

        let scope = ExecutionScope::new(&project_directory, ctx.active_file.as_deref());
        let lines = command_lines(&tool, &scope);

        let session = self.sessions.get_or_create(&scope.project_directory)?;
        for line in &lines {
            self.sessions.send(&session, line)?;
        }

        if self.store.show_terminal()? {
            self.sessions.reveal(&session)?;
        }

        debug!("Dispatched '{}' to session {}", tool.name, session.id());
        self.prompts.notify(Notice::Dispatched {
            tool: tool.name.clone(),
            session: session.id().to_string(),
        });

        Ok(Outcome::Dispatched(Dispatch {
            tool: tool.name,
            session: session.id().to_string(),
            lines,
        }))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Define / update / remove
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask for a name and a command, then add or replace that tool.
    pub async fn define(&mut self) -> Result<Outcome> {
        let Some(name) = self
            .ask(TextPrompt::placeholder("Give a name for this external tool"))
            .await?
        else {
            return Ok(Outcome::Cancelled);
        };

        self.define_command(&name, None).await
    }

    /// Ask for the command of an already named tool, then add or replace it.
    pub async fn define_command(&mut self, name: &str, working_directory: Option<&str>) -> Result<Outcome> {
        let Some(command) = self
            .ask(TextPrompt::placeholder(format!("Define the command of '{}'", name)))
            .await?
        else {
            return Ok(Outcome::Cancelled);
        };

        self.add(name, &command, working_directory)
    }

    /// Add or replace a tool without prompting.
    pub fn add(&mut self, name: &str, command: &str, working_directory: Option<&str>) -> Result<Outcome> {
        self.store.upsert(name, command, working_directory)?;
        self.prompts.notify(Notice::Saved {
            tool: name.to_string(),
        });
        Ok(Outcome::Saved(name.to_string()))
    }

    /// Pick a tool, then edit its name and command.
    pub async fn update_interactive(&mut self) -> Result<Outcome> {
        let tools = self.store.load()?;
        if tools.is_empty() {
            return Ok(Outcome::NoToolsDefined);
        }

        let Some(selected) = self.pick(&tools).await? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(tool) = tools.into_iter().find(|t| t.name == selected.label) else {
            return Ok(Outcome::NotFound);
        };

        let Some(new_name) = self
            .ask(TextPrompt::prefilled("Enter the name of the command", &tool.name))
            .await?
        else {
            return Ok(Outcome::Cancelled);
        };

        let Some(new_command) = self
            .ask(TextPrompt::prefilled("Enter the raw command", &tool.command))
            .await?
        else {
            return Ok(Outcome::Cancelled);
        };

        if !self.store.rename(&tool.name, &new_name, &new_command)? {
            return Ok(Outcome::NotFound);
        }

        self.prompts.notify(Notice::Saved {
            tool: new_name.clone(),
        });
        Ok(Outcome::Saved(new_name))
    }

    /// Pick a tool and remove it.
    pub async fn remove_interactive(&mut self) -> Result<Outcome> {
        let tools = self.store.load()?;
        if tools.is_empty() {
            return Ok(Outcome::NoToolsDefined);
        }

        let Some(selected) = self.pick(&tools).await? else {
            return Ok(Outcome::Cancelled);
        };
        self.remove(&selected.label)
    }

    /// Remove a tool by name without prompting.
    pub fn remove(&mut self, name: &str) -> Result<Outcome> {
        if !self.store.remove(name)? {
            return Ok(Outcome::NotFound);
        }

        self.prompts.notify(Notice::Removed {
            tool: name.to_string(),
        });
        Ok(Outcome::Removed(name.to_string()))
    }

    /// Dispose the terminal session(s). Called when the host shuts down.
    pub fn shutdown(&mut self) -> Result<()> {
        self.sessions.dispose()
    }

    async fn pick(&self, tools: &[ToolDefinition]) -> Result<Option<ChoiceItem>> {
        let items = tools.iter().map(ChoiceItem::from).collect();
        self.prompts.prompt_choice(items).await
    }

    /// A text prompt whose empty answer counts as dismissal.
    async fn ask(&self, request: TextPrompt) -> Result<Option<String>> {
        let answer = self.prompts.prompt_text(request).await?;
        Ok(answer.filter(|value| !value.is_empty()))
    }
}

/// The lines an invocation sends: an optional `cd`, then the command.
///
/// Any tool with a working directory gets a `cd` to its expansion, even one
/// matching the directory the session was opened in: the shell may have moved
/// since. An empty command is sent as is.
fn command_lines(tool: &ToolDefinition, scope: &ExecutionScope) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);

    if let Some(dir) = tool.working_directory.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("cd {}", expand(dir, scope)));
    }

    let command = expand(&tool.command, scope);
    if command.trim().is_empty() {
        warn!("Tool '{}' expands to an empty command", tool.name);
    }
    lines.push(command);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::terminal::SessionManager;
    use crate::testing::{MemorySettings, RecordingBackend, ScriptedPrompts};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    struct Harness {
        controller: ToolController<ScriptedPrompts>,
        settings: Arc<MemorySettings>,
        backend: Arc<RecordingBackend>,
    }

    fn harness(tools: Vec<ToolDefinition>, prompts: ScriptedPrompts) -> Harness {
        let settings = Arc::new(MemorySettings::with_commands(tools));
        let backend = Arc::new(RecordingBackend::new());
        let controller = ToolController::new(
            CommandStore::new(settings.clone()),
            SessionManager::new(backend.clone(), SessionManager::DEFAULT_NAME),
            prompts,
        );
        Harness {
            controller,
            settings,
            backend,
        }
    }

    fn root(dir: &str) -> HostContext {
        HostContext::new(Some(PathBuf::from(dir)), None)
    }

    #[tokio::test]
    async fn test_invoke_empty_collection() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new());

        let outcome = h.controller.invoke("build", &root("/repo")).await.unwrap();

        assert_eq!(outcome, Outcome::NoToolsDefined);
        assert!(h.backend.opened().is_empty());
        assert!(!h.controller.sessions().is_live());
    }

    #[tokio::test]
    async fn test_invoke_with_working_directory_override() {
        let tool = ToolDefinition::new("build", "make").with_working_directory("$ProjectFileDir$/sub");
        let mut h = harness(vec![tool], ScriptedPrompts::new());

        let outcome = h.controller.invoke("build", &root("/repo")).await.unwrap();

        assert_eq!(h.backend.sent(), vec!["cd /repo/sub", "make"]);
        assert_eq!(h.backend.opened()[0].working_directory, PathBuf::from("/repo"));
        match outcome {
            Outcome::Dispatched(dispatch) => {
                assert_eq!(dispatch.tool, "build");
                assert_eq!(dispatch.session, "external");
                assert_eq!(dispatch.lines, vec!["cd /repo/sub", "make"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_default_cwd_changes_to_project_directory() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo/")).await.unwrap();

        assert_eq!(h.backend.sent(), vec!["cd /repo", "make"]);
    }

    #[tokio::test]
    async fn test_default_cwd_returns_from_previous_override() {
        let tools = vec![
            ToolDefinition::new("web", "npm start").with_working_directory("$ProjectFileDir$/web"),
            ToolDefinition::new("build", "make"),
        ];
        let mut h = harness(tools, ScriptedPrompts::new());

        h.controller.invoke("web", &root("/repo")).await.unwrap();
        h.controller.invoke("build", &root("/repo")).await.unwrap();
        h.controller.invoke("build", &root("/other")).await.unwrap();

        assert_eq!(
            h.backend.sent(),
            vec![
                "cd /repo/web",
                "npm start",
                "cd /repo",
                "make",
                "cd /other",
                "make",
            ]
        );
        assert_eq!(h.backend.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_without_cwd_sends_no_cd() {
        let tool = ToolDefinition {
            name: "fmt".to_string(),
            command: "cargo fmt".to_string(),
            working_directory: None,
        };
        let mut h = harness(vec![tool], ScriptedPrompts::new());

        h.controller.invoke("fmt", &root("/repo")).await.unwrap();

        assert_eq!(h.backend.sent(), vec!["cargo fmt"]);
    }

    #[tokio::test]
    async fn test_invoke_absolute_cwd() {
        let tool = ToolDefinition::new("logs", "tail -f app.log").with_working_directory("/var/log");
        let mut h = harness(vec![tool], ScriptedPrompts::new());

        h.controller.invoke("logs", &root("/repo")).await.unwrap();

        assert_eq!(h.backend.sent(), vec!["cd /var/log", "tail -f app.log"]);
    }

    #[tokio::test]
    async fn test_second_invocation_reuses_session() {
        let tools = vec![
            ToolDefinition::new("build", "make"),
            ToolDefinition::new("test", "make test"),
        ];
        let mut h = harness(tools, ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo")).await.unwrap();
        let first = h.controller.sessions().current().unwrap();

        h.controller.invoke("test", &root("/elsewhere")).await.unwrap();
        let second = h.controller.sessions().current().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(h.backend.opened().len(), 1);
        assert_eq!(second.working_directory(), Path::new("/repo"));
        // The session was opened in /repo; the cd moves it to the new project.
        assert_eq!(
            h.backend.sent(),
            vec!["cd /repo", "make", "cd /elsewhere", "make test"]
        );
    }

    #[tokio::test]
    async fn test_invoke_derives_directory_from_active_file() {
        let tool = ToolDefinition::new("fmt", "rustfmt $FilePath$");
        let mut h = harness(vec![tool], ScriptedPrompts::new());
        let ctx = HostContext::new(None, Some(PathBuf::from("/proj/src/main.rs")));

        h.controller.invoke("fmt", &ctx).await.unwrap();

        assert_eq!(h.backend.opened()[0].working_directory, PathBuf::from("/proj/src"));
        assert_eq!(
            h.backend.sent(),
            vec!["cd /proj/src", "rustfmt /proj/src/main.rs"]
        );
    }

    #[tokio::test]
    async fn test_invoke_without_directory() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        let outcome = h
            .controller
            .invoke("build", &HostContext::default())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoWorkingDirectory);
        assert!(h.backend.opened().is_empty());
        assert_eq!(
            h.controller.prompts().notices(),
            vec![Notice::NoWorkingDirectory {
                tool: "build".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_invoke_stale_name() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        let outcome = h.controller.invoke("deploy", &root("/repo")).await.unwrap();

        assert_eq!(outcome, Outcome::NotFound);
        assert!(h.backend.opened().is_empty());
        assert!(h.controller.prompts().notices().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_reveals_after_sending_when_configured() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo")).await.unwrap();
        assert!(h.backend.shown().is_empty());

        h.settings.set_show_terminal(true);
        h.controller.invoke("build", &root("/repo")).await.unwrap();
        assert_eq!(h.backend.shown(), vec!["external"]);
    }

    #[tokio::test]
    async fn test_invoke_sends_empty_command() {
        let tool = ToolDefinition::new("nothing", "$FilePath$");
        let mut h = harness(vec![tool], ScriptedPrompts::new());

        h.controller.invoke("nothing", &root("/repo")).await.unwrap();

        assert_eq!(h.backend.sent(), vec!["cd /repo", ""]);
    }

    #[tokio::test]
    async fn test_invoke_on_closed_session_fails() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo")).await.unwrap();
        h.backend.close_all();

        let err = h.controller.invoke("build", &root("/repo")).await.unwrap_err();
        assert!(matches!(err, Error::StaleSession(_)));
        assert_eq!(h.backend.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_notifies_dispatch() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo")).await.unwrap();

        assert_eq!(
            h.controller.prompts().notices(),
            vec![Notice::Dispatched {
                tool: "build".to_string(),
                session: "external".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_run_picks_and_invokes() {
        let tools = vec![
            ToolDefinition::new("build", "make"),
            ToolDefinition::new("test", "make test"),
        ];
        let mut h = harness(tools, ScriptedPrompts::new().choose("test"));

        h.controller.run(&root("/repo")).await.unwrap();

        let offered = &h.controller.prompts().choice_requests()[0];
        assert_eq!(offered.len(), 2);
        assert_eq!(offered[1].label, "test");
        assert_eq!(offered[1].description, "make test");
        assert_eq!(h.backend.sent(), vec!["cd /repo", "make test"]);
    }

    #[tokio::test]
    async fn test_run_cancelled_pick() {
        let mut h = harness(
            vec![ToolDefinition::new("build", "make")],
            ScriptedPrompts::new().cancel_choice(),
        );

        let outcome = h.controller.run(&root("/repo")).await.unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(h.backend.opened().is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_offers_define() {
        let prompts = ScriptedPrompts::new()
            .confirm("Define")
            .text("build")
            .text("make");
        let mut h = harness(Vec::new(), prompts);

        let outcome = h.controller.run(&root("/repo")).await.unwrap();

        assert_eq!(outcome, Outcome::Saved("build".to_string()));
        let (message, options) = &h.controller.prompts().confirm_requests()[0];
        assert_eq!(message, "No external tools defined.");
        assert_eq!(options, &vec!["Define".to_string(), "Cancel".to_string()]);
        assert_eq!(h.settings.snapshot(), vec![ToolDefinition::new("build", "make")]);
        assert!(h.backend.opened().is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_declined() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().confirm("Cancel"));

        let outcome = h.controller.run(&root("/repo")).await.unwrap();

        assert_eq!(outcome, Outcome::NoToolsDefined);
        assert_eq!(h.settings.write_count(), 0);
        assert!(h.backend.opened().is_empty());
    }

    #[tokio::test]
    async fn test_define_prompts() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text("lint").text("cargo clippy"));

        h.controller.define().await.unwrap();

        let requests = h.controller.prompts().text_requests();
        assert_eq!(
            requests[0].placeholder.as_deref(),
            Some("Give a name for this external tool")
        );
        assert_eq!(
            requests[1].placeholder.as_deref(),
            Some("Define the command of 'lint'")
        );
        assert_eq!(h.settings.snapshot()[0].command, "cargo clippy");
    }

    #[tokio::test]
    async fn test_define_cancelled_writes_nothing() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text("lint").cancel_text());

        let outcome = h.controller.define().await.unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(h.settings.write_count(), 0);
    }

    #[tokio::test]
    async fn test_define_empty_name_is_cancel() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text(""));

        let outcome = h.controller.define().await.unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(h.controller.prompts().remaining(), 0);
        assert_eq!(h.settings.write_count(), 0);
    }

    #[tokio::test]
    async fn test_define_command_for_given_name() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text("npm start"));

        let outcome = h
            .controller
            .define_command("serve", Some("$ProjectFileDir$/web"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Saved("serve".to_string()));
        let requests = h.controller.prompts().text_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].placeholder.as_deref(),
            Some("Define the command of 'serve'")
        );
        assert_eq!(
            h.settings.snapshot(),
            vec![ToolDefinition::new("serve", "npm start").with_working_directory("$ProjectFileDir$/web")]
        );
    }

    #[tokio::test]
    async fn test_define_command_empty_answer_is_cancel() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text(""));

        let outcome = h.controller.define_command("serve", None).await.unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(h.settings.write_count(), 0);
        assert!(h.controller.prompts().notices().is_empty());
    }

    #[tokio::test]
    async fn test_define_persistence_failure_propagates() {
        let mut h = harness(Vec::new(), ScriptedPrompts::new().text("lint").text("cargo clippy"));
        h.settings.fail_writes(true);

        let err = h.controller.define().await.unwrap_err();

        assert!(matches!(err, Error::Persistence(_)));
        assert!(h.controller.prompts().notices().is_empty());
    }

    #[tokio::test]
    async fn test_update_renames_in_place() {
        let tools = vec![
            ToolDefinition::new("build", "make"),
            ToolDefinition::new("test", "make test"),
        ];
        let prompts = ScriptedPrompts::new()
            .choose("build")
            .text("compile")
            .text("make -j8");
        let mut h = harness(tools, prompts);

        let outcome = h.controller.update_interactive().await.unwrap();

        assert_eq!(outcome, Outcome::Saved("compile".to_string()));
        let requests = h.controller.prompts().text_requests();
        assert_eq!(requests[0].value.as_deref(), Some("build"));
        assert_eq!(requests[1].value.as_deref(), Some("make"));

        let saved = h.settings.snapshot();
        assert_eq!(saved[0].name, "compile");
        assert_eq!(saved[0].command, "make -j8");
        assert_eq!(saved[1].name, "test");
    }

    #[tokio::test]
    async fn test_update_cancel_second_prompt_writes_nothing() {
        let prompts = ScriptedPrompts::new()
            .choose("build")
            .text("compile")
            .cancel_text();
        let mut h = harness(vec![ToolDefinition::new("build", "make")], prompts);

        let outcome = h.controller.update_interactive().await.unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(h.settings.write_count(), 0);
        assert_eq!(h.settings.snapshot()[0].name, "build");
    }

    #[tokio::test]
    async fn test_update_stale_selection() {
        let prompts = ScriptedPrompts::new().choose("vanished");
        let mut h = harness(vec![ToolDefinition::new("build", "make")], prompts);

        let outcome = h.controller.update_interactive().await.unwrap();

        assert_eq!(outcome, Outcome::NotFound);
        assert!(h.controller.prompts().text_requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove_interactive() {
        let tools = vec![
            ToolDefinition::new("build", "make"),
            ToolDefinition::new("test", "make test"),
        ];
        let mut h = harness(tools, ScriptedPrompts::new().choose("build"));

        let outcome = h.controller.remove_interactive().await.unwrap();

        assert_eq!(outcome, Outcome::Removed("build".to_string()));
        assert_eq!(h.settings.snapshot(), vec![ToolDefinition::new("test", "make test")]);
    }

    #[tokio::test]
    async fn test_remove_missing_is_silent() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        let outcome = h.controller.remove("deploy").unwrap();

        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(h.settings.write_count(), 0);
        assert!(h.controller.prompts().notices().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_disposes_session() {
        let mut h = harness(vec![ToolDefinition::new("build", "make")], ScriptedPrompts::new());

        h.controller.invoke("build", &root("/repo")).await.unwrap();
        h.controller.shutdown().unwrap();

        assert!(!h.controller.sessions().is_live());
        assert_eq!(h.backend.disposed(), vec!["external"]);
    }
}
