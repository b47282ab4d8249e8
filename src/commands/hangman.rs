// src/commands/hangman.rs
use async_trait::async_trait;

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
    games::hangman::{GuessOutcome, HangmanState, WordOutcome},
    games::words::WordCategory,
    state::ConsoleState,
    store::KEY_HANGMAN_STATE,
};

const NO_GAME: &str = "No active hangman game. Start one with 'hangman start [category]'.";

pub struct HangmanCommand {
    state: ConsoleState,
}

impl HangmanCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }

    async fn load_game(&self) -> Option<HangmanState> {
        self.state.store().get::<HangmanState>(KEY_HANGMAN_STATE).await
    }

    async fn save_game(&self, game: &HangmanState) -> ConsoleResult<()> {
        self.state.store().set(KEY_HANGMAN_STATE, game).await
    }

    async fn delete_game(&self) -> ConsoleResult<()> {
        self.state.store().remove(KEY_HANGMAN_STATE).await
    }

    async fn start(&self, category_arg: Option<&String>) -> ConsoleResult<String> {
        let category = match category_arg {
            Some(name) => WordCategory::parse(name).ok_or_else(|| {
                ConsoleError::Command(format!(
                    "Unknown category '{}'. Available: {}",
                    name,
                    WordCategory::names().join(", ")
                ))
            })?,
            None => WordCategory::random(),
        };

        let game = HangmanState::start(category);
        self.save_game(&game).await?;
        Ok(format!(
            "New hangman game started (category: {}).\n{}",
            category,
            board(&game)
        ))
    }

    async fn guess(&self, letter_arg: Option<&String>) -> ConsoleResult<String> {
        let Some(mut game) = self.load_game().await else {
            return Ok(NO_GAME.to_string());
        };
        let letter = match letter_arg.map(String::as_str) {
            Some(s) if s.chars().count() == 1 => s.chars().next().filter(|c| c.is_ascii_alphabetic()),
            _ => None,
        };
        let Some(letter) = letter else {
            return Err(ConsoleError::Command(
                "Usage: hangman guess <single letter>".to_string(),
            ));
        };

        match game.guess(letter) {
            GuessOutcome::AlreadyGuessed => Ok(format!(
                "You already tried '{}'.\n{}",
                letter.to_ascii_lowercase(),
                board(&game)
            )),
            GuessOutcome::Correct => {
                self.save_game(&game).await?;
                Ok(format!("Good guess!\n{}", board(&game)))
            }
            GuessOutcome::Wrong => {
                self.save_game(&game).await?;
                Ok(format!(
                    "No '{}' in the word.\n{}",
                    letter.to_ascii_lowercase(),
                    board(&game)
                ))
            }
            GuessOutcome::Won => {
                self.delete_game().await?;
                Ok(format!("You won! The word was '{}'.", game.secret_word))
            }
            GuessOutcome::Lost => {
                self.delete_game().await?;
                Ok(format!("Game over. The word was '{}'.", game.secret_word))
            }
        }
    }

    async fn guess_word(&self, word_arg: Option<&String>) -> ConsoleResult<String> {
        let Some(mut game) = self.load_game().await else {
            return Ok(NO_GAME.to_string());
        };
        let Some(word) = word_arg.filter(|w| !w.is_empty()) else {
            return Err(ConsoleError::Command("Usage: hangman word <guess>".to_string()));
        };

        match game.guess_word(word) {
            WordOutcome::Won => {
                self.delete_game().await?;
                Ok(format!("You won! The word was '{}'.", game.secret_word))
            }
            WordOutcome::Wrong { lost: true } => {
                self.delete_game().await?;
                Ok(format!(
                    "'{}' is not it, and that cost two guesses. Game over. The word was '{}'.",
                    word, game.secret_word
                ))
            }
            WordOutcome::Wrong { lost: false } => {
                self.save_game(&game).await?;
                Ok(format!(
                    "'{}' is not it. Whole-word misses cost two guesses.\n{}",
                    word,
                    board(&game)
                ))
            }
        }
    }

    async fn hint(&self) -> ConsoleResult<String> {
        let Some(mut game) = self.load_game().await else {
            return Ok(NO_GAME.to_string());
        };
        let Some((letter, won)) = game.hint() else {
            return Ok(format!("Nothing left to reveal.\n{}", board(&game)));
        };

        if won {
            self.delete_game().await?;
            Ok(format!(
                "The last letter was '{}' - you won! The word was '{}'.",
                letter, game.secret_word
            ))
        } else {
            self.save_game(&game).await?;
            Ok(format!("Hint: the word contains '{}'.\n{}", letter, board(&game)))
        }
    }

    async fn status(&self) -> ConsoleResult<String> {
        match self.load_game().await {
            Some(game) => Ok(board(&game)),
            None => Ok(NO_GAME.to_string()),
        }
    }

    async fn quit(&self) -> ConsoleResult<String> {
        match self.load_game().await {
            Some(game) => {
                self.delete_game().await?;
                Ok(format!("Game abandoned. The word was '{}'.", game.secret_word))
            }
            None => Ok(NO_GAME.to_string()),
        }
    }
}

fn board(game: &HangmanState) -> String {
    let guessed: String = game
        .guessed_letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}\nwrong: {}/{} | guessed: [{}]",
        game.masked_word(),
        game.wrong_guesses,
        game.max_wrong,
        guessed
    )
}

#[async_trait]
impl Command for HangmanCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        match args.first().map(String::as_str) {
            Some("start") => self.start(args.get(1)).await,
            Some("guess") => self.guess(args.get(1)).await,
            Some("word") => self.guess_word(args.get(1)).await,
            Some("hint") => self.hint().await,
            Some("status") => self.status().await,
            Some("quit") => self.quit().await,
            _ => Err(ConsoleError::Command(
                "Usage: hangman start|guess|word|hint|status|quit".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "hangman"
    }

    fn help(&self) -> &str {
        "Word-guessing game: start, guess, word, hint, status, quit."
    }
}
