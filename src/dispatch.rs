// src/dispatch.rs
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    error::ConsoleError,
    parser,
    state::ConsoleState,
    transcript::{TranscriptEntry, TranscriptKind},
};

/// Resolves submitted lines against the command registry and turns every
/// outcome - output, handler failure, unknown command - into a transcript
/// entry. Handler failures never propagate past this boundary.
pub struct Dispatcher {
    state: ConsoleState,
    tx: UnboundedSender<TranscriptEntry>,
}

impl Dispatcher {
    /// The receiver yields completed entries in whatever order handlers
    /// finish; slow commands do not block the input loop.
    pub fn new(state: ConsoleState) -> (Self, UnboundedReceiver<TranscriptEntry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { state, tx }, rx)
    }

    /// Dispatch a submitted line in the background. Once the handler
    /// resolves, the resulting transcript entry is delivered on the channel.
    /// There is no cancellation: a dispatched handler runs to completion
    /// even if the console closes meanwhile.
    pub fn submit(&self, line: &str) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let line = line.to_string();
        tokio::spawn(async move {
            if let Some(entry) = dispatch_line(&state, &line).await {
                let _ = tx.send(entry);
            }
        });
    }
}

/// Core dispatch flow, shared by the terminal loop (via `submit`) and the
/// server (awaited directly). Returns None for blank submissions.
pub async fn dispatch_line(state: &ConsoleState, line: &str) -> Option<TranscriptEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    state.record_submission(trimmed).await;

    let registry = state.command_registry();

    // A bare A-D answers the pending trivia question directly.
    if is_bare_answer(trimmed) && state.has_pending_trivia().await {
        if let Some(command) = registry.get_command("trivia-answer") {
            let args = vec![trimmed.to_string()];
            let entry = match command.execute(&args).await {
                Ok(output) => {
                    state
                        .add_transcript_entry(&output, TranscriptKind::Command, trimmed)
                        .await
                }
                Err(e) => {
                    state
                        .add_transcript_entry(&e.to_string(), TranscriptKind::Error, trimmed)
                        .await
                }
            };
            return Some(entry);
        }
    }

    let parsed = parser::parse_line(trimmed);
    let mut args = parsed.flat_args();
    if args.is_empty() {
        return None;
    }
    let name = args.remove(0);

    let entry = match registry.get_command(&name) {
        Some(command) => match command.execute(&args).await {
            Ok(output) => {
                state
                    .add_transcript_entry(&output, TranscriptKind::Command, trimmed)
                    .await
            }
            Err(e) => {
                state
                    .add_transcript_entry(&e.to_string(), TranscriptKind::Error, trimmed)
                    .await
            }
        },
        None => {
            let base = ConsoleError::UnknownCommand(name.clone()).to_string();
            let message = match registry.suggest(&name) {
                Some(candidate) => format!("{}. Did you mean '{}'?", base, candidate),
                None => format!("{}. Type 'help' to list available commands.", base),
            };
            state
                .add_transcript_entry(&message, TranscriptKind::Error, trimmed)
                .await
        }
    };
    Some(entry)
}

fn is_bare_answer(line: &str) -> bool {
    line.chars().count() == 1
        && line
            .chars()
            .next()
            .map_or(false, |c| matches!(c.to_ascii_uppercase(), 'A'..='D'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_state;

    #[tokio::test]
    async fn blank_submission_is_a_silent_no_op() {
        let (state, _dir) = test_state().await;
        assert!(dispatch_line(&state, "   ").await.is_none());
        assert!(state.transcript_entries().await.is_empty());
        assert!(state.recall_lines().await.is_empty());
    }

    #[tokio::test]
    async fn known_command_output_lands_in_the_transcript() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "echo hello there").await.expect("entry");
        assert_eq!(entry.kind, TranscriptKind::Command);
        assert_eq!(entry.output, "hello there");
        assert_eq!(entry.input, "echo hello there");
        assert_eq!(state.transcript_entries().await.len(), 1);
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "ECHO loud").await.expect("entry");
        assert_eq!(entry.output, "loud");
    }

    #[tokio::test]
    async fn close_typo_gets_a_suggestion() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "hlp").await.expect("entry");
        assert_eq!(entry.kind, TranscriptKind::Error);
        assert!(entry.output.contains("Did you mean 'help'?"));
    }

    #[tokio::test]
    async fn garbage_gets_a_plain_unknown_message() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "xyzzyqqq").await.expect("entry");
        assert_eq!(entry.kind, TranscriptKind::Error);
        assert!(!entry.output.contains("Did you mean"));
        assert!(entry.output.contains("help"));
    }

    #[tokio::test]
    async fn handler_failure_becomes_an_error_entry() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "hash").await.expect("entry");
        assert_eq!(entry.kind, TranscriptKind::Error);
        assert!(entry.output.contains("Usage"));
    }

    #[tokio::test]
    async fn bare_letter_answers_a_pending_question() {
        let (state, _dir) = test_state().await;
        dispatch_line(&state, "trivia").await.expect("question");
        let entry = dispatch_line(&state, "b").await.expect("answer entry");
        assert!(entry.output.starts_with("Correct!"));
        assert!(!state.has_pending_trivia().await);
    }

    #[tokio::test]
    async fn bare_letter_without_pending_question_is_unknown() {
        let (state, _dir) = test_state().await;
        let entry = dispatch_line(&state, "b").await.expect("entry");
        assert_eq!(entry.kind, TranscriptKind::Error);
        assert!(entry.output.contains("Unknown command"));
    }

    #[tokio::test]
    async fn submissions_are_recorded_for_recall() {
        let (state, _dir) = test_state().await;
        let _ = dispatch_line(&state, "help").await;
        let _ = dispatch_line(&state, "help").await;
        let _ = dispatch_line(&state, "clear").await;
        assert_eq!(state.recall_lines().await, ["help", "clear"]);
    }

    #[tokio::test]
    async fn background_submit_delivers_on_the_channel() {
        let (state, _dir) = test_state().await;
        let (dispatcher, mut rx) = Dispatcher::new(state);
        dispatcher.submit("echo queued");
        let entry = rx.recv().await.expect("completed entry");
        assert_eq!(entry.output, "queued");
    }
}
