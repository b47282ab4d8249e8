// src/commands/basics.rs
use async_trait::async_trait;
use chrono::{Local, Utc};

use crate::{
    commands::Command,
    error::ConsoleResult,
    state::ConsoleState,
    store::KEY_CONSOLE_REOPEN,
};

// --- clear ---

pub struct ClearCommand {
    state: ConsoleState,
}

impl ClearCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for ClearCommand {
    async fn execute(&self, _args: &[String]) -> ConsoleResult<String> {
        self.state.clear_transcript().await;
        Ok("Transcript cleared.".to_string())
    }

    fn name(&self) -> &str {
        "clear"
    }

    fn help(&self) -> &str {
        "Wipe the console transcript."
    }
}

// --- exit ---

pub struct ExitCommand {
    state: ConsoleState,
}

impl ExitCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for ExitCommand {
    async fn execute(&self, _args: &[String]) -> ConsoleResult<String> {
        self.state.set_open(false).await;
        self.state.reset_recall_cursor().await;
        // A deliberate close also withdraws any pending auto-reopen request.
        self.state.store().remove(KEY_CONSOLE_REOPEN).await?;
        Ok("Console closed. Enter the secret sequence to reopen it.".to_string())
    }

    fn name(&self) -> &str {
        "exit"
    }

    fn help(&self) -> &str {
        "Close the console overlay."
    }
}

// --- echo ---

pub struct EchoCommand;

impl EchoCommand {
    pub fn new() -> Self {
        EchoCommand
    }
}

#[async_trait]
impl Command for EchoCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        Ok(args.join(" "))
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn help(&self) -> &str {
        "Print the given arguments back."
    }
}

// --- history ---

pub struct HistoryCommand {
    state: ConsoleState,
}

impl HistoryCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for HistoryCommand {
    async fn execute(&self, _args: &[String]) -> ConsoleResult<String> {
        let lines = self.state.recall_lines().await;
        if lines.is_empty() {
            return Ok("No recalled input yet.".to_string());
        }
        let listing = lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>3}  {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(listing)
    }

    fn name(&self) -> &str {
        "history"
    }

    fn help(&self) -> &str {
        "List the recallable input lines (newest last)."
    }
}

// --- time ---

pub struct TimeCommand;

impl TimeCommand {
    pub fn new() -> Self {
        TimeCommand
    }
}

#[async_trait]
impl Command for TimeCommand {
    async fn execute(&self, _args: &[String]) -> ConsoleResult<String> {
        let local = Local::now();
        let utc = Utc::now();
        Ok(format!(
            "Local: {}\nUTC:   {}",
            local.format("%Y-%m-%d %H:%M:%S"),
            utc.format("%Y-%m-%d %H:%M:%S")
        ))
    }

    fn name(&self) -> &str {
        "time"
    }

    fn help(&self) -> &str {
        "Show the current local and UTC time."
    }
}
