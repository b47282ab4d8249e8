// src/testutil.rs
//
// Shared fixtures for the colocated test modules.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::{
    error::ConsoleResult,
    games::trivia::PendingTrivia,
    services::{weather::WeatherService, TriviaSource},
    state::ConsoleState,
    store::JsonStore,
};

/// Deterministic trivia source: the right answer is always option B.
pub struct StubTriviaSource;

#[async_trait]
impl TriviaSource for StubTriviaSource {
    async fn fetch_question(
        &self,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> ConsoleResult<PendingTrivia> {
        Ok(PendingTrivia {
            question: "Which planet is largest?".to_string(),
            options: ["Mars", "Jupiter", "Venus", "Saturn"].map(String::from),
            correct_index: 1,
            category: category.unwrap_or("General").to_string(),
            difficulty: difficulty.unwrap_or("easy").to_string(),
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Console state over a temporary store and stubbed collaborators. The
/// TempDir must stay alive for the duration of the test.
pub async fn test_state() -> (ConsoleState, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(JsonStore::open(dir.path()).await.expect("open store"));
    let state = ConsoleState::new(store, Arc::new(StubTriviaSource), WeatherService::default());
    (state, dir)
}
