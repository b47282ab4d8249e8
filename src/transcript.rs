// src/transcript.rs
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Most recent raw lines kept for arrow-key recall.
pub const MAX_RECALL_ENTRIES: usize = 50;

/// Start of an OSC 8 hyperlink sequence. Output that already carries one is
/// stored as-is instead of being linkified again.
pub const OSC8_PREFIX: &str = "\x1b]8;;";

// --- Transcript ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranscriptKind {
    Command,
    Error,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    /// Original submitted line; empty for system messages.
    pub input: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
    pub kind: TranscriptKind,
}

/// Append-only log of past inputs and outputs. Entries are never mutated and
/// never evicted automatically; `clear` wipes it only on explicit request.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn add_entry(&mut self, output: &str, kind: TranscriptKind, input: &str) -> TranscriptEntry {
        let output = if contains_markup(output) {
            output.to_string()
        } else {
            linkify(output)
        };
        let entry = TranscriptEntry {
            input: input.to_string(),
            output,
            timestamp: Utc::now(),
            kind,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// --- Linkifier ---

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://[^\s<>]+").expect("valid url regex");
    static ref WWW_RE: Regex =
        Regex::new(r"\bwww\.[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+[^\s<>]*").expect("valid www regex");
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex");
}

pub fn contains_markup(text: &str) -> bool {
    text.contains(OSC8_PREFIX)
}

fn hyperlink(target: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", target, text)
}

/// Wrap bare URLs, `www.` domains, and email addresses as OSC 8 terminal
/// hyperlinks. The three pattern classes are applied in order; later classes
/// skip spans already claimed so nothing gets wrapped twice.
pub fn linkify(text: &str) -> String {
    let mut spans: Vec<(usize, usize, String)> = Vec::new();

    for m in URL_RE.find_iter(text) {
        spans.push((m.start(), m.end(), m.as_str().to_string()));
    }
    for m in WWW_RE.find_iter(text) {
        if !claimed(&spans, m.start(), m.end()) {
            spans.push((m.start(), m.end(), format!("https://{}", m.as_str())));
        }
    }
    for m in EMAIL_RE.find_iter(text) {
        if !claimed(&spans, m.start(), m.end()) {
            spans.push((m.start(), m.end(), format!("mailto:{}", m.as_str())));
        }
    }

    if spans.is_empty() {
        return text.to_string();
    }
    spans.sort_by_key(|span| span.0);

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end, target) in spans {
        result.push_str(&text[cursor..start]);
        result.push_str(&hyperlink(&target, &text[start..end]));
        cursor = end;
    }
    result.push_str(&text[cursor..]);
    result
}

fn claimed(spans: &[(usize, usize, String)], start: usize, end: usize) -> bool {
    spans.iter().any(|(s, e, _)| start < *e && end > *s)
}

// --- Recall history ---

/// Result of moving the recall cursor toward newer entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallNext {
    Line(String),
    /// Moved past the newest entry: clear the input field.
    ClearInput,
    Unchanged,
}

/// Navigable list of previously submitted raw lines, separate from the
/// transcript. Deduplicated against only the immediately preceding entry and
/// capped at the most recent `MAX_RECALL_ENTRIES`.
#[derive(Debug, Default)]
pub struct RecallHistory {
    lines: Vec<String>,
    cursor: Option<usize>,
}

impl RecallHistory {
    /// Record a submitted line. Adjacent duplicates are suppressed; the
    /// cursor always resets.
    pub fn record(&mut self, line: &str) {
        if self.lines.last().map(String::as_str) != Some(line) {
            self.lines.push(line.to_string());
            if self.lines.len() > MAX_RECALL_ENTRIES {
                let excess = self.lines.len() - MAX_RECALL_ENTRIES;
                self.lines.drain(..excess);
            }
        }
        self.cursor = None;
    }

    /// Arrow-Up: move toward older entries, clamped at the oldest.
    pub fn previous(&mut self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let next_index = match self.cursor {
            None => self.lines.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next_index);
        self.lines.get(next_index).cloned()
    }

    /// Arrow-Down: move toward newer entries; past the newest, the input is
    /// cleared and the cursor resets.
    pub fn next(&mut self) -> RecallNext {
        match self.cursor {
            None => RecallNext::Unchanged,
            Some(i) if i + 1 < self.lines.len() => {
                self.cursor = Some(i + 1);
                RecallNext::Line(self.lines[i + 1].clone())
            }
            Some(_) => {
                self.cursor = None;
                RecallNext::ClearInput
            }
        }
    }

    /// Reset the cursor without touching the stored lines (submission, blur,
    /// console close).
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_linkified() {
        let mut transcript = Transcript::default();
        let entry = transcript.add_entry("see https://example.com for more", TranscriptKind::Command, "about");
        assert!(entry.output.contains(OSC8_PREFIX));
        assert!(entry.output.contains("https://example.com"));
    }

    #[test]
    fn marked_up_output_is_stored_as_is() {
        let mut transcript = Transcript::default();
        let marked = hyperlink("https://example.com", "example");
        let entry = transcript.add_entry(&marked, TranscriptKind::Command, "about");
        assert_eq!(entry.output, marked);
    }

    #[test]
    fn www_inside_url_is_not_double_wrapped() {
        let out = linkify("visit https://www.example.com today");
        assert_eq!(out.matches(OSC8_PREFIX).count(), 2); // open + close of one link
    }

    #[test]
    fn all_three_pattern_classes_apply() {
        let out = linkify("a https://a.io b www.b.io c c@d.io");
        assert_eq!(out.matches("\x1b\\").count(), 6); // three links, two delimiters each
        assert!(out.contains("https://www.b.io"));
        assert!(out.contains("mailto:c@d.io"));
    }

    #[test]
    fn adjacent_duplicate_submissions_store_once() {
        let mut recall = RecallHistory::default();
        recall.record("help");
        recall.record("help");
        assert_eq!(recall.lines(), ["help"]);
        recall.record("clear");
        recall.record("help");
        assert_eq!(recall.lines(), ["help", "clear", "help"]);
    }

    #[test]
    fn recall_is_capped_at_most_recent_entries() {
        let mut recall = RecallHistory::default();
        for i in 0..60 {
            recall.record(&format!("line {}", i));
        }
        assert_eq!(recall.lines().len(), MAX_RECALL_ENTRIES);
        assert_eq!(recall.lines()[0], "line 10");
    }

    #[test]
    fn cursor_clamps_at_oldest_entry() {
        let mut recall = RecallHistory::default();
        recall.record("one");
        recall.record("two");
        assert_eq!(recall.previous(), Some("two".to_string()));
        assert_eq!(recall.previous(), Some("one".to_string()));
        assert_eq!(recall.previous(), Some("one".to_string()));
    }

    #[test]
    fn moving_past_newest_clears_input() {
        let mut recall = RecallHistory::default();
        recall.record("one");
        recall.record("two");
        recall.previous();
        recall.previous();
        assert_eq!(recall.next(), RecallNext::Line("two".to_string()));
        assert_eq!(recall.next(), RecallNext::ClearInput);
        assert_eq!(recall.next(), RecallNext::Unchanged);
    }

    #[test]
    fn down_without_navigation_is_a_no_op() {
        let mut recall = RecallHistory::default();
        recall.record("one");
        assert_eq!(recall.next(), RecallNext::Unchanged);
    }
}
