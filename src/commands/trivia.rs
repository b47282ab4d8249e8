// src/commands/trivia.rs
use async_trait::async_trait;

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
    state::ConsoleState,
};

const NO_QUESTION: &str = "No trivia question is pending. Fetch one with 'trivia [category] [difficulty]'.";

// --- trivia ---

pub struct TriviaCommand {
    state: ConsoleState,
}

impl TriviaCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for TriviaCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let mut category: Option<String> = None;
        let mut difficulty: Option<String> = None;
        let mut iter = args.iter().peekable();

        // Accept both positional `trivia science hard` and reconstituted
        // `--category science --difficulty hard` forms.
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--category" => category = iter.next().cloned(),
                "--difficulty" => difficulty = iter.next().cloned(),
                other if !other.starts_with('-') => {
                    if category.is_none() {
                        category = Some(other.to_string());
                    } else if difficulty.is_none() {
                        difficulty = Some(other.to_string());
                    }
                }
                _ => {}
            }
        }

        let question = self
            .state
            .trivia_source()
            .fetch_question(category.as_deref(), difficulty.as_deref())
            .await?;
        let rendered = question.render();
        // Single slot: an unanswered question is overwritten, not queued.
        self.state.set_pending_trivia(question).await;
        Ok(rendered)
    }

    fn name(&self) -> &str {
        "trivia"
    }

    fn help(&self) -> &str {
        "Fetch one multiple-choice trivia question."
    }
}

// --- trivia-answer ---

pub struct TriviaAnswerCommand {
    state: ConsoleState,
}

impl TriviaAnswerCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for TriviaAnswerCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let Some(pending) = self.state.pending_trivia().await else {
            return Ok(NO_QUESTION.to_string());
        };

        let letter = match args.first().map(String::as_str) {
            Some(s) if s.chars().count() == 1 => s.chars().next(),
            _ => None,
        };
        let verdict = letter.and_then(|l| pending.resolve(l));
        let Some(verdict) = verdict else {
            // Malformed answer: the pending question stays.
            return Err(ConsoleError::Command(
                "Usage: trivia-answer <A|B|C|D>".to_string(),
            ));
        };

        // The question is consumed exactly once, right or wrong.
        self.state.clear_pending_trivia().await;

        if verdict.correct {
            Ok(format!("Correct! {} - {}.", verdict.correct_letter, verdict.correct_answer))
        } else {
            Ok(format!(
                "Not quite. The answer was {} - {}.",
                verdict.correct_letter, verdict.correct_answer
            ))
        }
    }

    fn name(&self) -> &str {
        "trivia-answer"
    }

    fn help(&self) -> &str {
        "Answer the pending trivia question with a letter A-D."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_state;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn fetch_then_correct_answer_clears_the_slot() {
        let (state, _dir) = test_state().await;
        let trivia = TriviaCommand::new(state.clone());
        let answer = TriviaAnswerCommand::new(state.clone());

        let question = trivia.execute(&[]).await.expect("fetch question");
        assert!(question.contains("A."));
        assert!(state.has_pending_trivia().await);

        // The test stub always stores the right answer under B.
        let out = answer.execute(&args(&["b"])).await.expect("answer");
        assert!(out.starts_with("Correct!"));
        assert!(!state.has_pending_trivia().await);
    }

    #[tokio::test]
    async fn wrong_answer_reports_the_correct_one_and_clears_the_slot() {
        let (state, _dir) = test_state().await;
        let trivia = TriviaCommand::new(state.clone());
        let answer = TriviaAnswerCommand::new(state.clone());

        trivia.execute(&[]).await.expect("fetch question");
        let out = answer.execute(&args(&["D"])).await.expect("answer");
        assert!(out.contains("Not quite"));
        assert!(out.contains("B -"));
        assert!(!state.has_pending_trivia().await);
    }

    #[tokio::test]
    async fn malformed_answer_keeps_the_question_pending() {
        let (state, _dir) = test_state().await;
        let trivia = TriviaCommand::new(state.clone());
        let answer = TriviaAnswerCommand::new(state.clone());

        trivia.execute(&[]).await.expect("fetch question");
        let err = answer.execute(&args(&["e"])).await.unwrap_err();
        assert!(err.to_string().contains("Usage"));
        assert!(state.has_pending_trivia().await);
    }

    #[tokio::test]
    async fn answering_with_no_question_is_guidance_not_error() {
        let (state, _dir) = test_state().await;
        let answer = TriviaAnswerCommand::new(state.clone());

        let out = answer.execute(&args(&["a"])).await.expect("guidance");
        assert!(out.contains("No trivia question"));
    }

    #[tokio::test]
    async fn second_fetch_overwrites_the_pending_question() {
        let (state, _dir) = test_state().await;
        let trivia = TriviaCommand::new(state.clone());

        trivia.execute(&[]).await.expect("first question");
        let first = state.pending_trivia().await.expect("pending");
        trivia.execute(&args(&["science"])).await.expect("second question");
        let second = state.pending_trivia().await.expect("pending");
        assert_ne!(first.category, second.category);
    }
}
