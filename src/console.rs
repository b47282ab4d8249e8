// src/console.rs
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    dispatch::Dispatcher,
    error::{ConsoleError, ConsoleResult},
    gesture::GestureDetector,
    render,
    signal,
    state::ConsoleState,
    store::KEY_CONSOLE_REOPEN,
    transcript::{RecallNext, TranscriptEntry, TranscriptKind},
};

/// The keyboard-activated overlay console. While closed it only watches key
/// events for the arming gesture; once open it is a line editor feeding the
/// dispatcher, with arrow-key recall of previous input.
pub struct Console {
    state: ConsoleState,
    dispatcher: Dispatcher,
    results: Option<UnboundedReceiver<TranscriptEntry>>,
    gesture: GestureDetector,
    input: String,
}

impl Console {
    pub fn new(state: ConsoleState) -> Self {
        let (dispatcher, results) = Dispatcher::new(state.clone());
        Console {
            state,
            dispatcher,
            results: Some(results),
            gesture: GestureDetector::default(),
            input: String::new(),
        }
    }

    pub async fn run(&mut self, open_immediately: bool) -> ConsoleResult<()> {
        enable_raw_mode().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
        let result = self.run_loop(open_immediately).await;
        let _ = disable_raw_mode();
        print!("\r\n");
        result
    }

    async fn run_loop(&mut self, open_immediately: bool) -> ConsoleResult<()> {
        let mut results = self
            .results
            .take()
            .ok_or_else(|| ConsoleError::Terminal("console already running".to_string()))?;
        let mut events = EventStream::new();
        let mut poll = tokio::time::interval(Duration::from_millis(200));

        // A previous session torn down with the console open asked to come
        // straight back.
        let reopen_requested = self.state.store().get::<bool>(KEY_CONSOLE_REOPEN).await
            == Some(true);
        if reopen_requested {
            self.state.store().remove(KEY_CONSOLE_REOPEN).await?;
            self.open_console("Console reopened after restart.").await?;
        } else if open_immediately {
            self.open_console("Console opened.").await?;
        }

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                            if self.handle_key(key).await? {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(ConsoleError::Terminal(e.to_string()));
                        }
                        None => break,
                    }
                }
                Some(entry) = results.recv() => {
                    self.handle_completed(entry).await?;
                }
                _ = poll.tick() => {
                    if signal::is_shutdown_requested() {
                        // Torn down mid-session: ask to reopen next launch.
                        if self.state.is_open().await {
                            self.state.store().set(KEY_CONSOLE_REOPEN, &true).await?;
                        }
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns true when the whole process should shut down.
    async fn handle_key(&mut self, key: KeyEvent) -> ConsoleResult<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            if self.state.is_open().await {
                self.state.store().set(KEY_CONSOLE_REOPEN, &true).await?;
            }
            return Ok(true);
        }

        if !self.state.is_open().await {
            if let Some(id) = key_identifier(&key) {
                if self.gesture.observe(&id) {
                    self.open_console("Console activated by key sequence.").await?;
                }
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                self.redraw_input().await?;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.redraw_input().await?;
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.state.reset_recall_cursor().await;
                self.dispatcher.submit(&line);
                self.redraw_input().await?;
            }
            KeyCode::Up => {
                if let Some(line) = self.state.recall_previous().await {
                    self.input = line;
                }
                self.redraw_input().await?;
            }
            KeyCode::Down => {
                match self.state.recall_next().await {
                    RecallNext::Line(line) => self.input = line,
                    RecallNext::ClearInput => self.input.clear(),
                    RecallNext::Unchanged => {}
                }
                self.redraw_input().await?;
            }
            KeyCode::Esc => {
                self.close_console().await?;
            }
            _ => {}
        }
        Ok(false)
    }

    async fn handle_completed(&mut self, entry: TranscriptEntry) -> ConsoleResult<()> {
        // Results of handlers still in flight when the console closed land
        // in the transcript but are not painted over the closed overlay.
        if !self.state.is_open().await {
            return Ok(());
        }
        self.print_entry(&entry).await?;
        self.redraw_input().await
    }

    async fn open_console(&mut self, notice: &str) -> ConsoleResult<()> {
        self.state.set_open(true).await;
        self.state
            .add_transcript_entry(notice, TranscriptKind::Info, "")
            .await;

        let theme = self.state.get_theme().await;
        print!("\r\n{}\r\n", render::banner(theme).replace('\n', "\r\n"));
        // Replay what the (in-memory) transcript already holds, activation
        // notice included.
        for entry in self.state.transcript_entries().await {
            print!("{}\r\n", render::format_entry(&entry, theme).replace('\n', "\r\n"));
        }
        self.redraw_input().await
    }

    async fn close_console(&mut self) -> ConsoleResult<()> {
        self.state.set_open(false).await;
        self.state.reset_recall_cursor().await;
        self.state.store().remove(KEY_CONSOLE_REOPEN).await?;
        self.input.clear();
        self.gesture.reset();
        print!("\r\x1B[2K\r\n");
        flush()?;
        Ok(())
    }

    async fn print_entry(&self, entry: &TranscriptEntry) -> ConsoleResult<()> {
        let theme = self.state.get_theme().await;
        print!(
            "\r\x1B[2K{}\r\n",
            render::format_entry(entry, theme).replace('\n', "\r\n")
        );
        flush()
    }

    async fn redraw_input(&self) -> ConsoleResult<()> {
        // The exit command may have closed the console between keystrokes.
        if !self.state.is_open().await {
            print!("\r\x1B[2K");
            return flush();
        }
        let theme = self.state.get_theme().await;
        let (_, palette) = render::get_theme_resources(theme);
        print!(
            "\r\x1B[2K{} {}",
            render::colorize("❯", palette.prompt),
            self.input
        );
        flush()
    }
}

fn flush() -> ConsoleResult<()> {
    io::stdout().flush().map_err(ConsoleError::Io)
}

/// Stable string identifiers for the keys the gesture detector compares
/// against. Letters are lowercased so Shift does not break the sequence.
fn key_identifier(key: &KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Char(c) => Some(c.to_ascii_lowercase().to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        _ => None,
    }
}
