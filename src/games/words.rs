// src/games/words.rs
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Word-list categories for the hangman game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    Programming,
    Animals,
    Food,
    Space,
}

impl std::fmt::Display for WordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordCategory::Programming => write!(f, "programming"),
            WordCategory::Animals => write!(f, "animals"),
            WordCategory::Food => write!(f, "food"),
            WordCategory::Space => write!(f, "space"),
        }
    }
}

impl WordCategory {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "programming" => Some(WordCategory::Programming),
            "animals" => Some(WordCategory::Animals),
            "food" => Some(WordCategory::Food),
            "space" => Some(WordCategory::Space),
            _ => None,
        }
    }

    pub fn names() -> Vec<String> {
        WordCategory::iter().map(|c| c.to_string()).collect()
    }

    pub fn random() -> Self {
        let all: Vec<WordCategory> = WordCategory::iter().collect();
        *all.choose(&mut rand::rng()).unwrap_or(&WordCategory::Programming)
    }

    /// All words are lowercase ASCII letters, which keeps the guess
    /// validation in the command layer simple.
    pub fn words(&self) -> &'static [&'static str] {
        match self {
            WordCategory::Programming => &[
                "compiler", "borrow", "closure", "iterator", "pointer", "thread", "crate",
                "macro", "lifetime", "trait",
            ],
            WordCategory::Animals => &[
                "capybara", "axolotl", "pangolin", "narwhal", "ocelot", "wombat", "gecko",
                "ferret", "heron", "badger",
            ],
            WordCategory::Food => &[
                "croissant", "dumpling", "paella", "gnocchi", "tiramisu", "falafel", "ramen",
                "pretzel", "churro", "baklava",
            ],
            WordCategory::Space => &[
                "nebula", "quasar", "pulsar", "asteroid", "perihelion", "magnetar", "eclipse",
                "galaxy", "comet", "aurora",
            ],
        }
    }

    pub fn pick_word(&self) -> &'static str {
        self.words()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("compiler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_lowercase_words() {
        for category in WordCategory::iter() {
            for word in category.words() {
                assert!(word.chars().all(|c| c.is_ascii_lowercase()), "bad word {:?}", word);
            }
        }
    }

    #[test]
    fn parse_round_trips_display() {
        for category in WordCategory::iter() {
            assert_eq!(WordCategory::parse(&category.to_string()), Some(category));
        }
        assert_eq!(WordCategory::parse("geology"), None);
    }
}
