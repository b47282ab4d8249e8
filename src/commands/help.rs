// src/commands/help.rs
use async_trait::async_trait;

use crate::{
    commands::Command,
    error::ConsoleResult,
    state::ConsoleState,
};

pub struct HelpCommand {
    state: ConsoleState,
}

impl HelpCommand {
    pub fn new(state: ConsoleState) -> Self {
        HelpCommand { state }
    }
}

#[async_trait]
impl Command for HelpCommand {
    async fn execute(&self, _args: &[String]) -> ConsoleResult<String> {
        let current_theme = self.state.get_theme().await;

        Ok(format!(
            r#"Console commands:

  help                          Show this help message.
  clear                         Wipe the console transcript.
  exit                          Close the console overlay.
  search <query>                Build a web search link for the query.
  echo <text...>                Print the given arguments back.
  history                       List recallable input lines.
  time                          Show the current local and UTC time.
  theme [default|nord|matrix]   Show or switch the console theme.
  weather [location]            Current conditions (geolocated if omitted).
  hash <sha256|sha512> <text>   Hex digest of the given text.
  base64 <encode|decode> <text> Base64 round-trips.
  color <#hex|r g b>            Convert between hex and RGB color forms.
  hangman start [category]      Start a word-guessing game.
  hangman guess <letter>        Guess one letter.
  hangman word <guess>          Risky whole-word guess (wrong costs double).
  hangman hint|status|quit      Reveal a letter, show the board, give up.
  trivia [category] [difficulty]  Fetch one multiple-choice question.
  trivia-answer <A|B|C|D>       Answer the pending question (bare letters work too).

Options use `--key`, `--key=value`, or `--key value`; quoted strings stay
together. Arrow keys recall previous input. `exit` closes the console; the
secret key sequence opens it again.

Current theme: {:?}"#,
            current_theme
        ))
    }

    fn name(&self) -> &str {
        "help"
    }

    fn help(&self) -> &str {
        "Show this help message."
    }
}
