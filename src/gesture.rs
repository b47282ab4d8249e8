// src/gesture.rs
use std::collections::VecDeque;

/// The arming sequence: the classic ten-key Konami code.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft",
    "ArrowRight", "b", "a",
];

/// Sliding-window matcher over raw key identifiers. Fed every key event
/// while the console is closed; reports armed exactly when the last N keys
/// equal the target sequence. Mismatched buffers keep sliding rather than
/// resetting, so overlapping partial progress is never lost.
#[derive(Debug)]
pub struct GestureDetector {
    target: Vec<String>,
    buffer: VecDeque<String>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(&KONAMI_CODE)
    }
}

impl GestureDetector {
    pub fn new(target: &[&str]) -> Self {
        GestureDetector {
            target: target.iter().map(|k| k.to_string()).collect(),
            buffer: VecDeque::with_capacity(target.len()),
        }
    }

    /// Observe one key. Returns true when the window now matches the target;
    /// the buffer is cleared on a match so re-arming needs the full sequence
    /// again.
    pub fn observe(&mut self, key: &str) -> bool {
        if self.buffer.len() == self.target.len() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(key.to_string());

        let matched = self.buffer.len() == self.target.len()
            && self.buffer.iter().zip(&self.target).all(|(a, b)| a == b);
        if matched {
            self.buffer.clear();
        }
        matched
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut GestureDetector, keys: &[&str]) -> usize {
        keys.iter().filter(|k| detector.observe(k)).count()
    }

    #[test]
    fn exact_sequence_arms_exactly_once() {
        let mut detector = GestureDetector::default();
        assert_eq!(feed(&mut detector, &KONAMI_CODE), 1);
    }

    #[test]
    fn nine_keys_plus_stray_never_arms() {
        let mut detector = GestureDetector::default();
        let mut keys: Vec<&str> = KONAMI_CODE[..9].to_vec();
        keys.push("x");
        assert_eq!(feed(&mut detector, &keys), 0);
    }

    #[test]
    fn window_keeps_sliding_after_noise() {
        let mut detector = GestureDetector::default();
        let mut keys = vec!["x", "ArrowUp", "x"];
        keys.extend_from_slice(&KONAMI_CODE);
        assert_eq!(feed(&mut detector, &keys), 1);
    }

    #[test]
    fn rearming_requires_the_full_sequence_again() {
        let mut detector = GestureDetector::default();
        assert_eq!(feed(&mut detector, &KONAMI_CODE), 1);
        // "b a" alone must not count against the stale window.
        assert_eq!(feed(&mut detector, &["b", "a"]), 0);
        assert_eq!(feed(&mut detector, &KONAMI_CODE), 1);
    }
}
