// src/games/trivia.rs
use serde::{Deserialize, Serialize};

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// The one unanswered question the console may hold. Memory only: a reload
/// forgets it, and a second `trivia` call overwrites it without warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTrivia {
    pub question: String,
    pub options: [String; 4],
    pub correct_index: usize,
    pub category: String,
    pub difficulty: String,
}

/// Result of resolving a pending question against a chosen letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaVerdict {
    pub correct: bool,
    pub correct_letter: char,
    pub correct_answer: String,
}

impl PendingTrivia {
    /// Map an A-D letter (case-insensitive) to an option index.
    pub fn letter_index(letter: char) -> Option<usize> {
        let letter = letter.to_ascii_uppercase();
        OPTION_LETTERS.iter().position(|l| *l == letter)
    }

    pub fn resolve(&self, letter: char) -> Option<TriviaVerdict> {
        let chosen = Self::letter_index(letter)?;
        Some(TriviaVerdict {
            correct: chosen == self.correct_index,
            correct_letter: OPTION_LETTERS[self.correct_index],
            correct_answer: self.options[self.correct_index].clone(),
        })
    }

    /// Question text plus the four lettered options.
    pub fn render(&self) -> String {
        let mut out = format!(
            "[{} / {}] {}\n",
            self.category, self.difficulty, self.question
        );
        for (i, option) in self.options.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", OPTION_LETTERS[i], option));
        }
        out.push_str("Answer with: trivia-answer <A|B|C|D>");
        out
    }
}
