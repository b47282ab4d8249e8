// src/services/mod.rs
use async_trait::async_trait;

use crate::error::ConsoleResult;
use crate::games::trivia::PendingTrivia;

pub mod opentdb;
pub mod weather;

/// Seam for the external trivia question source.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    async fn fetch_question(
        &self,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> ConsoleResult<PendingTrivia>;

    fn name(&self) -> &str;
}
