// src/fuzzy.rs
//
// Approximate matching for mistyped command names. Scores are an
// edit-distance ratio normalized to [0, 1] where 0.0 means identical; a
// candidate is only worth suggesting when its best score stays below
// SUGGESTION_THRESHOLD.

pub const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Damerau-Levenshtein edit distance. Counts transpositions of adjacent
/// characters as a single edit ("hlep" vs "help" = 1, not 2), which matters
/// for typo correction.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix: Vec<Vec<usize>> = vec![vec![0; b_len + 1]; a_len + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                matrix[i][j] = matrix[i][j].min(matrix[i - 2][j - 2] + 1);
            }
        }
    }

    matrix[a_len][b_len]
}

/// Normalized distance: edit distance divided by the longer length.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    damerau_levenshtein(a, b) as f64 / longest as f64
}

/// Rank `(name, description)` candidates against an unmatched command name
/// and return the single best suggestion, if any scores below the threshold.
/// A candidate's score is the better of its name score and its description
/// score.
pub fn best_match<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<&'a str> {
    let query = query.to_lowercase();
    let mut best: Option<(&str, f64)> = None;

    for (name, description) in candidates {
        let name_score = similarity_score(&query, &name.to_lowercase());
        let desc_score = description
            .to_lowercase()
            .split_whitespace()
            .map(|word| similarity_score(&query, word))
            .fold(f64::MAX, f64::min);
        let score = name_score.min(desc_score);

        if best.map_or(true, |(_, s)| score < s) {
            best = Some((name, score));
        }
    }

    best.filter(|(_, score)| *score < SUGGESTION_THRESHOLD)
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(damerau_levenshtein("help", "help"), 0);
        assert_eq!(damerau_levenshtein("help", "hlp"), 1);
        assert_eq!(damerau_levenshtein("help", "hlep"), 1); // transposition
        assert_eq!(damerau_levenshtein("", "abc"), 3);
    }

    #[test]
    fn close_typo_is_suggested() {
        let registry = [("help", "Show available commands."), ("clear", "Wipe the transcript.")];
        assert_eq!(best_match("hlp", registry), Some("help"));
    }

    #[test]
    fn garbage_is_not_suggested() {
        let registry = [("help", "Show available commands."), ("clear", "Wipe the transcript.")];
        assert_eq!(best_match("xyzzyqqq", registry), None);
    }

    #[test]
    fn description_words_count_as_evidence() {
        let registry = [("hangman", "Word guessing game.")];
        assert_eq!(best_match("guessing", registry), Some("hangman"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = [("trivia", "Fetch a trivia question.")];
        assert_eq!(best_match("TRIVA", registry), Some("trivia"));
    }
}
