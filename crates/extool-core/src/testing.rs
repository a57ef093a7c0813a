//! In-memory stand-ins for the settings store, terminal backend and prompt
//! provider. Used by the tests of this crate and of the CLI.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::prompt::{ChoiceItem, Notice, PromptProvider, TextPrompt};
use crate::settings::SettingsStore;
use crate::terminal::{SessionSpec, Terminal, TerminalBackend, TerminalSession};
use crate::tool::{ToolCollection, ToolDefinition};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings held in memory. Counts writes and can be told to fail them.
#[derive(Debug, Default)]
pub struct MemorySettings {
    commands: Mutex<ToolCollection>,
    show_terminal: AtomicBool,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(commands: ToolCollection) -> Self {
        Self {
            commands: Mutex::new(commands),
            ..Self::default()
        }
    }

    pub fn set_show_terminal(&self, show: bool) {
        self.show_terminal.store(show, Ordering::SeqCst);
    }

    /// Make every following write fail with [`Error::Persistence`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> ToolCollection {
        lock(&self.commands).clone()
    }
}

impl SettingsStore for MemorySettings {
    fn read_commands(&self) -> Result<ToolCollection> {
        Ok(self.snapshot())
    }

    fn write_commands(&self, commands: &[ToolDefinition]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence("settings are read-only".to_string()));
        }
        *lock(&self.commands) = commands.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn show_terminal(&self) -> Result<bool> {
        Ok(self.show_terminal.load(Ordering::SeqCst))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal backend
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Recording {
    opened: Vec<SessionSpec>,
    sent: Vec<(String, String)>,
    shown: Vec<String>,
    disposed: Vec<String>,
    existing: HashMap<String, PathBuf>,
    closed: HashSet<usize>,
    next_serial: usize,
}

/// Backend that records every session opened and every line sent.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    state: Arc<Mutex<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a session with this name was left running by another process.
    pub fn preexisting(&self, name: &str, working_directory: impl Into<PathBuf>) {
        lock(&self.state)
            .existing
            .insert(name.to_string(), working_directory.into());
    }

    /// Close every session out-of-band, as a user closing the terminal would.
    pub fn close_all(&self) {
        let mut state = lock(&self.state);
        let serials: Vec<usize> = (0..state.next_serial).collect();
        state.closed.extend(serials);
        state.existing.clear();
    }

    pub fn opened(&self) -> Vec<SessionSpec> {
        lock(&self.state).opened.clone()
    }

    /// Every line sent, in order, regardless of session.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.state)
            .sent
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Lines sent to one session.
    pub fn sent_to(&self, session: &str) -> Vec<String> {
        lock(&self.state)
            .sent
            .iter()
            .filter(|(name, _)| name == session)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn shown(&self) -> Vec<String> {
        lock(&self.state).shown.clone()
    }

    pub fn disposed(&self) -> Vec<String> {
        lock(&self.state).disposed.clone()
    }

    fn terminal(&self, name: &str, working_directory: &Path) -> TerminalSession {
        let mut state = lock(&self.state);
        let serial = state.next_serial;
        state.next_serial += 1;
        state
            .existing
            .insert(name.to_string(), working_directory.to_path_buf());

        Arc::new(RecordingTerminal {
            name: name.to_string(),
            working_directory: working_directory.to_path_buf(),
            serial,
            state: self.state.clone(),
        })
    }
}

impl TerminalBackend for RecordingBackend {
    fn open(&self, spec: &SessionSpec) -> Result<TerminalSession> {
        let existing = {
            let mut state = lock(&self.state);
            state.opened.push(spec.clone());
            state.existing.get(&spec.name).cloned()
        };
        let working_directory = existing.unwrap_or_else(|| spec.working_directory.clone());
        Ok(self.terminal(&spec.name, &working_directory))
    }

    fn find(&self, name: &str) -> Result<Option<TerminalSession>> {
        let existing = lock(&self.state).existing.get(name).cloned();
        Ok(existing.map(|dir| self.terminal(name, &dir)))
    }
}

#[derive(Debug)]
struct RecordingTerminal {
    name: String,
    working_directory: PathBuf,
    serial: usize,
    state: Arc<Mutex<Recording>>,
}

impl RecordingTerminal {
    fn check_alive(&self, state: &Recording) -> Result<()> {
        if state.closed.contains(&self.serial) {
            return Err(Error::StaleSession(self.name.clone()));
        }
        Ok(())
    }
}

impl Terminal for RecordingTerminal {
    fn id(&self) -> &str {
        &self.name
    }

    fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    fn send_text(&self, text: &str) -> Result<()> {
        let mut state = lock(&self.state);
        self.check_alive(&state)?;
        state.sent.push((self.name.clone(), text.to_string()));
        Ok(())
    }

    fn show(&self) -> Result<()> {
        let mut state = lock(&self.state);
        self.check_alive(&state)?;
        state.shown.push(self.name.clone());
        Ok(())
    }

    fn dispose(&self) -> Result<()> {
        let mut state = lock(&self.state);
        state.closed.insert(self.serial);
        state.existing.remove(&self.name);
        state.disposed.push(self.name.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Answer {
    Text(Option<String>),
    Choice(Option<String>),
    Confirm(Option<String>),
}

#[derive(Debug, Default)]
struct Transcript {
    answers: VecDeque<Answer>,
    text_requests: Vec<TextPrompt>,
    choice_requests: Vec<Vec<ChoiceItem>>,
    confirm_requests: Vec<(String, Vec<String>)>,
    notices: Vec<Notice>,
}

/// Prompt provider that replays scripted answers in order and records what
/// it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompts {
    transcript: Mutex<Transcript>,
}

impl ScriptedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    fn answer(self, answer: Answer) -> Self {
        lock(&self.transcript).answers.push_back(answer);
        self
    }

    /// Answer the next text prompt.
    pub fn text(self, value: impl Into<String>) -> Self {
        self.answer(Answer::Text(Some(value.into())))
    }

    /// Dismiss the next text prompt.
    pub fn cancel_text(self) -> Self {
        self.answer(Answer::Text(None))
    }

    /// Pick the item labelled `label` at the next choice prompt. The label
    /// does not have to be among the offered items.
    pub fn choose(self, label: impl Into<String>) -> Self {
        self.answer(Answer::Choice(Some(label.into())))
    }

    pub fn cancel_choice(self) -> Self {
        self.answer(Answer::Choice(None))
    }

    /// Press `option` at the next confirmation.
    pub fn confirm(self, option: impl Into<String>) -> Self {
        self.answer(Answer::Confirm(Some(option.into())))
    }

    pub fn cancel_confirm(self) -> Self {
        self.answer(Answer::Confirm(None))
    }

    pub fn text_requests(&self) -> Vec<TextPrompt> {
        lock(&self.transcript).text_requests.clone()
    }

    pub fn choice_requests(&self) -> Vec<Vec<ChoiceItem>> {
        lock(&self.transcript).choice_requests.clone()
    }

    pub fn confirm_requests(&self) -> Vec<(String, Vec<String>)> {
        lock(&self.transcript).confirm_requests.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.transcript).notices.clone()
    }

    /// Scripted answers not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.transcript).answers.len()
    }

    fn next(&self, kind: &str) -> Result<Answer> {
        lock(&self.transcript)
            .answers
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for {} prompt", kind)))
    }
}

#[async_trait]
impl PromptProvider for ScriptedPrompts {
    async fn prompt_text(&self, request: TextPrompt) -> Result<Option<String>> {
        lock(&self.transcript).text_requests.push(request);
        match self.next("text")? {
            Answer::Text(value) => Ok(value),
            other => Err(Error::Prompt(format!("expected text answer, got {:?}", other))),
        }
    }

    async fn prompt_choice(&self, items: Vec<ChoiceItem>) -> Result<Option<ChoiceItem>> {
        lock(&self.transcript).choice_requests.push(items.clone());
        match self.next("choice")? {
            Answer::Choice(None) => Ok(None),
            Answer::Choice(Some(label)) => {
                let item = items
                    .into_iter()
                    .find(|i| i.label == label)
                    .unwrap_or(ChoiceItem {
                        label,
                        description: String::new(),
                    });
                Ok(Some(item))
            }
            other => Err(Error::Prompt(format!("expected choice answer, got {:?}", other))),
        }
    }

    async fn prompt_confirm_choice(&self, message: &str, options: &[&str]) -> Result<Option<String>> {
        lock(&self.transcript).confirm_requests.push((
            message.to_string(),
            options.iter().map(|o| o.to_string()).collect(),
        ));
        match self.next("confirm")? {
            Answer::Confirm(choice) => Ok(choice),
            other => Err(Error::Prompt(format!("expected confirm answer, got {:?}", other))),
        }
    }

    fn notify(&self, notice: Notice) {
        lock(&self.transcript).notices.push(notice);
    }
}
