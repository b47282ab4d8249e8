// src/state.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    commands::CommandRegistry,
    games::trivia::PendingTrivia,
    services::{weather::WeatherService, TriviaSource},
    store::JsonStore,
    transcript::{RecallNext, RecallHistory, Transcript, TranscriptEntry, TranscriptKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConsoleTheme {
    Default,
    Nord,
    Matrix,
}

// ConsoleState holds the console's shared state. Everything mutable lives
// behind an Arc so command handlers, the dispatcher, the terminal loop, and
// the server all observe the same console.
pub struct ConsoleState {
    // CommandRegistry is wrapped in Arc for cheap cloning and sharing.
    command_registry: Arc<CommandRegistry>,
    transcript: Arc<Mutex<Transcript>>,
    recall: Arc<Mutex<RecallHistory>>,
    console_open: Arc<Mutex<bool>>,
    theme: Arc<Mutex<ConsoleTheme>>,
    pending_trivia: Arc<Mutex<Option<PendingTrivia>>>,
    store: Arc<JsonStore>,
    trivia_source: Arc<dyn TriviaSource>,
    weather: WeatherService,
}

// Manual Clone implementation because CommandRegistry is not Clone by default.
impl Clone for ConsoleState {
    fn clone(&self) -> Self {
        Self {
            command_registry: Arc::clone(&self.command_registry),
            transcript: Arc::clone(&self.transcript),
            recall: Arc::clone(&self.recall),
            console_open: Arc::clone(&self.console_open),
            theme: Arc::clone(&self.theme),
            pending_trivia: Arc::clone(&self.pending_trivia),
            store: Arc::clone(&self.store),
            trivia_source: Arc::clone(&self.trivia_source),
            weather: self.weather.clone(),
        }
    }
}

impl ConsoleState {
    /// Creates the console state, including initializing and registering
    /// commands against the external collaborators it is given.
    pub fn new(
        store: Arc<JsonStore>,
        trivia_source: Arc<dyn TriviaSource>,
        weather: WeatherService,
    ) -> Self {
        let transcript = Arc::new(Mutex::new(Transcript::default()));
        let recall = Arc::new(Mutex::new(RecallHistory::default()));
        let console_open = Arc::new(Mutex::new(false));
        let theme = Arc::new(Mutex::new(ConsoleTheme::Default));
        let pending_trivia = Arc::new(Mutex::new(None));

        // Commands need a state handle during their own construction, so a
        // preliminary state with an empty registry is built first; every Arc
        // except the registry is shared with the final state.
        let preliminary_state = ConsoleState {
            command_registry: Arc::new(CommandRegistry::new_empty()),
            transcript: transcript.clone(),
            recall: recall.clone(),
            console_open: console_open.clone(),
            theme: theme.clone(),
            pending_trivia: pending_trivia.clone(),
            store: store.clone(),
            trivia_source: trivia_source.clone(),
            weather: weather.clone(),
        };

        let command_registry = CommandRegistry::new(preliminary_state);

        ConsoleState {
            command_registry: Arc::new(command_registry),
            transcript,
            recall,
            console_open,
            theme,
            pending_trivia,
            store,
            trivia_source,
            weather,
        }
    }

    // --- Transcript ---
    pub async fn add_transcript_entry(
        &self,
        output: &str,
        kind: TranscriptKind,
        input: &str,
    ) -> TranscriptEntry {
        self.transcript.lock().await.add_entry(output, kind, input)
    }

    pub async fn transcript_entries(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().await.entries().to_vec()
    }

    pub async fn clear_transcript(&self) {
        self.transcript.lock().await.clear();
    }

    // --- Recall history ---
    pub async fn record_submission(&self, line: &str) {
        self.recall.lock().await.record(line);
    }

    pub async fn recall_previous(&self) -> Option<String> {
        self.recall.lock().await.previous()
    }

    pub async fn recall_next(&self) -> RecallNext {
        self.recall.lock().await.next()
    }

    pub async fn reset_recall_cursor(&self) {
        self.recall.lock().await.reset_cursor();
    }

    pub async fn recall_lines(&self) -> Vec<String> {
        self.recall.lock().await.lines().to_vec()
    }

    // --- Console open/closed flag ---
    pub async fn is_open(&self) -> bool {
        *self.console_open.lock().await
    }

    pub async fn set_open(&self, open: bool) {
        *self.console_open.lock().await = open;
    }

    // --- Theme ---
    pub async fn get_theme(&self) -> ConsoleTheme {
        *self.theme.lock().await
    }

    pub async fn set_theme(&self, theme: ConsoleTheme) {
        *self.theme.lock().await = theme;
    }

    // --- Pending trivia slot (single owner, overwritten not queued) ---
    pub async fn set_pending_trivia(&self, pending: PendingTrivia) {
        *self.pending_trivia.lock().await = Some(pending);
    }

    pub async fn pending_trivia(&self) -> Option<PendingTrivia> {
        self.pending_trivia.lock().await.clone()
    }

    pub async fn clear_pending_trivia(&self) {
        *self.pending_trivia.lock().await = None;
    }

    pub async fn has_pending_trivia(&self) -> bool {
        self.pending_trivia.lock().await.is_some()
    }

    // --- Collaborators ---
    pub fn store(&self) -> Arc<JsonStore> {
        Arc::clone(&self.store)
    }

    pub fn trivia_source(&self) -> Arc<dyn TriviaSource> {
        Arc::clone(&self.trivia_source)
    }

    pub fn weather(&self) -> WeatherService {
        self.weather.clone()
    }

    /// Provides read-only access to the command registry Arc.
    pub fn command_registry(&self) -> Arc<CommandRegistry> {
        Arc::clone(&self.command_registry)
    }
}

impl ConsoleTheme {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(ConsoleTheme::Default),
            "nord" => Some(ConsoleTheme::Nord),
            "matrix" => Some(ConsoleTheme::Matrix),
            _ => None,
        }
    }
}
