// src/commands/mod.rs
use async_trait::async_trait;

use crate::{error::ConsoleResult, fuzzy, state::ConsoleState};

// Declare the modules for each command family
pub mod basics;
pub mod color;
pub mod crypto;
pub mod hangman;
pub mod help;
pub mod search;
pub mod theme;
pub mod trivia;
pub mod weather;

/// The core trait that all console commands implement.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with its flat argument list (positionals first,
    /// parsed options reconstituted as `--key value` pairs).
    async fn execute(&self, args: &[String]) -> ConsoleResult<String>;
    /// Returns the name of the command (e.g., "help", "hangman").
    fn name(&self) -> &str;
    /// Returns a short help string describing the command's purpose.
    fn help(&self) -> &str;
}

/// Holds all registered commands. Built once at console construction and
/// never mutated afterwards; lookup is case-insensitive exact match.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates a new CommandRegistry and registers all built-in commands.
    /// Takes the shared ConsoleState, as commands need it during *their*
    /// initialization.
    pub fn new(state: ConsoleState) -> Self {
        let mut registry = CommandRegistry { commands: Vec::new() };

        registry.register(Box::new(help::HelpCommand::new(state.clone())));
        registry.register(Box::new(basics::ClearCommand::new(state.clone())));
        registry.register(Box::new(basics::ExitCommand::new(state.clone())));
        registry.register(Box::new(search::SearchCommand::new()));
        registry.register(Box::new(basics::EchoCommand::new()));
        registry.register(Box::new(basics::HistoryCommand::new(state.clone())));
        registry.register(Box::new(basics::TimeCommand::new()));
        registry.register(Box::new(theme::ThemeCommand::new(state.clone())));
        registry.register(Box::new(weather::WeatherCommand::new(state.clone())));
        registry.register(Box::new(crypto::HashCommand::new()));
        registry.register(Box::new(crypto::Base64Command::new()));
        registry.register(Box::new(color::ColorCommand::new()));
        registry.register(Box::new(hangman::HangmanCommand::new(state.clone())));
        registry.register(Box::new(trivia::TriviaCommand::new(state.clone())));
        registry.register(Box::new(trivia::TriviaAnswerCommand::new(state)));

        registry
    }

    /// Creates an empty CommandRegistry, used while the real one is being
    /// bootstrapped (see ConsoleState::new).
    pub fn new_empty() -> Self {
        CommandRegistry { commands: Vec::new() }
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Finds a command by its name, case-insensitively.
    pub fn get_command(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .map(|c| &**c)
    }

    /// Returns (name, help) for every registered command, in registration
    /// order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.commands.iter().map(|c| (c.name(), c.help())).collect()
    }

    /// Best fuzzy suggestion for an unmatched name, if any candidate is
    /// close enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        fuzzy::best_match(name, self.list_commands())
    }
}
