// src/games/hangman.rs
use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::words::WordCategory;

pub const MAX_WRONG_GUESSES: u8 = 6;

/// Outcome of a single-letter guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    AlreadyGuessed,
    Correct,
    Wrong,
    Won,
    Lost,
}

/// Outcome of a whole-word guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOutcome {
    Won,
    /// A wrong whole-word guess costs two wrong-guess points in one step.
    Wrong { lost: bool },
}

/// One in-progress (or just-finished) hangman game. Serialized into the
/// persistent store while in progress; terminal states are deleted from the
/// store by the command layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangmanState {
    pub secret_word: String,
    pub category: WordCategory,
    pub guessed_letters: BTreeSet<char>,
    pub wrong_guesses: u8,
    pub max_wrong: u8,
    pub is_complete: bool,
    pub is_won: bool,
}

impl HangmanState {
    pub fn start(category: WordCategory) -> Self {
        Self::with_word(category, category.pick_word())
    }

    pub fn with_word(category: WordCategory, word: &str) -> Self {
        HangmanState {
            secret_word: word.to_lowercase(),
            category,
            guessed_letters: BTreeSet::new(),
            wrong_guesses: 0,
            max_wrong: MAX_WRONG_GUESSES,
            is_complete: false,
            is_won: false,
        }
    }

    /// Secret with guessed letters revealed and the rest as placeholders.
    pub fn masked_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn remaining_guesses(&self) -> u8 {
        self.max_wrong.saturating_sub(self.wrong_guesses)
    }

    fn all_revealed(&self) -> bool {
        self.secret_word
            .chars()
            .all(|c| self.guessed_letters.contains(&c))
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_ascii_lowercase();
        if self.guessed_letters.contains(&letter) {
            return GuessOutcome::AlreadyGuessed;
        }
        self.guessed_letters.insert(letter);

        let hit = self.secret_word.contains(letter);
        if !hit {
            self.wrong_guesses += 1;
        }

        if self.all_revealed() {
            self.is_complete = true;
            self.is_won = true;
            GuessOutcome::Won
        } else if self.wrong_guesses >= self.max_wrong {
            self.is_complete = true;
            GuessOutcome::Lost
        } else if hit {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Wrong
        }
    }

    pub fn guess_word(&mut self, word: &str) -> WordOutcome {
        if word.to_lowercase() == self.secret_word {
            self.guessed_letters.extend(self.secret_word.chars());
            self.is_complete = true;
            self.is_won = true;
            return WordOutcome::Won;
        }

        self.wrong_guesses += 2;
        let lost = self.wrong_guesses >= self.max_wrong;
        if lost {
            self.is_complete = true;
        }
        WordOutcome::Wrong { lost }
    }

    /// Reveal one random still-hidden letter by marking it guessed. Returns
    /// the letter and whether that reveal finished the word.
    pub fn hint(&mut self) -> Option<(char, bool)> {
        let hidden: Vec<char> = self
            .secret_word
            .chars()
            .filter(|c| !self.guessed_letters.contains(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let letter = *hidden.choose(&mut rand::rng())?;
        self.guessed_letters.insert(letter);

        let won = self.all_revealed();
        if won {
            self.is_complete = true;
            self.is_won = true;
        }
        Some((letter, won))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_game() -> HangmanState {
        HangmanState::with_word(WordCategory::Animals, "cat")
    }

    #[test]
    fn correct_guesses_in_any_order_win_without_cost() {
        let mut game = cat_game();
        assert_eq!(game.guess('t'), GuessOutcome::Correct);
        assert_eq!(game.guess('a'), GuessOutcome::Correct);
        assert_eq!(game.guess('c'), GuessOutcome::Won);
        assert!(game.is_won);
        assert_eq!(game.wrong_guesses, 0);
    }

    #[test]
    fn six_wrong_guesses_lose() {
        let mut game = cat_game();
        for (i, letter) in ['x', 'y', 'z', 'q', 'w', 'e'].into_iter().enumerate() {
            let outcome = game.guess(letter);
            if i < 5 {
                assert_eq!(outcome, GuessOutcome::Wrong);
            } else {
                assert_eq!(outcome, GuessOutcome::Lost);
            }
        }
        assert!(game.is_complete);
        assert!(!game.is_won);
    }

    #[test]
    fn repeated_guess_does_not_mutate() {
        let mut game = cat_game();
        assert_eq!(game.guess('z'), GuessOutcome::Wrong);
        assert_eq!(game.guess('z'), GuessOutcome::AlreadyGuessed);
        assert_eq!(game.wrong_guesses, 1);
    }

    #[test]
    fn wrong_word_guess_costs_two_in_one_step() {
        let mut game = cat_game();
        assert_eq!(game.guess_word("dog"), WordOutcome::Wrong { lost: false });
        assert_eq!(game.wrong_guesses, 2);
        assert!(!game.is_complete);
    }

    #[test]
    fn wrong_word_guess_can_finish_the_game() {
        let mut game = cat_game();
        for letter in ['x', 'y', 'z', 'q'] {
            game.guess(letter);
        }
        assert_eq!(game.guess_word("dog"), WordOutcome::Wrong { lost: true });
        assert!(game.is_complete);
        assert!(!game.is_won);
    }

    #[test]
    fn correct_word_guess_wins_immediately() {
        let mut game = cat_game();
        assert_eq!(game.guess_word("CAT"), WordOutcome::Won);
        assert!(game.is_won);
        assert_eq!(game.masked_word(), "c a t");
    }

    #[test]
    fn hint_reveals_a_hidden_letter() {
        let mut game = cat_game();
        game.guess('c');
        let (letter, _) = game.hint().expect("a hidden letter remains");
        assert!("at".contains(letter));
        assert!(game.guessed_letters.contains(&letter));
        assert_eq!(game.wrong_guesses, 0);
    }

    #[test]
    fn hint_on_last_letter_wins() {
        let mut game = cat_game();
        game.guess('c');
        game.guess('a');
        let (letter, won) = game.hint().expect("one letter left");
        assert_eq!(letter, 't');
        assert!(won);
        assert!(game.is_won);
    }

    #[test]
    fn masked_word_reveals_only_guessed_letters() {
        let mut game = cat_game();
        game.guess('a');
        assert_eq!(game.masked_word(), "_ a _");
    }

    #[test]
    fn state_round_trips_through_serde() {
        let mut game = cat_game();
        game.guess('a');
        let json = serde_json::to_string(&game).expect("serialize");
        let back: HangmanState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.masked_word(), "_ a _");
        assert_eq!(back.wrong_guesses, 0);
    }
}
