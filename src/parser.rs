// src/parser.rs
use std::collections::BTreeMap;

/// Value shapes an option can take after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl OptionValue {
    /// Coerce a raw option value: anything that parses fully as a number
    /// becomes `Number`, everything else stays `Text`.
    fn from_raw(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => OptionValue::Number(n),
            _ => OptionValue::Text(raw.to_string()),
        }
    }

    fn raw_text(&self) -> Vec<String> {
        match self {
            OptionValue::Flag(_) => Vec::new(),
            OptionValue::Text(s) => vec![s.clone()],
            OptionValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    vec![format!("{}", *n as i64)]
                } else {
                    vec![n.to_string()]
                }
            }
            OptionValue::List(items) => items.clone(),
        }
    }
}

/// One submitted line, split into positional arguments and named options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub positionals: Vec<String>,
    pub options: BTreeMap<String, OptionValue>,
}

impl ParsedInput {
    /// Rebuild a flat argument list for handlers: positionals first (minus
    /// the command name, which the dispatcher strips), then each option
    /// appended back as `--key [value...]` pairs.
    pub fn flat_args(&self) -> Vec<String> {
        let mut args = self.positionals.clone();
        for (key, value) in &self.options {
            args.push(format!("--{}", key));
            args.extend(value.raw_text());
        }
        args
    }
}

/// Parse a raw input line. This never fails: malformed quoting degrades to a
/// naive whitespace split with surrounding quote characters stripped.
pub fn parse_line(line: &str) -> ParsedInput {
    let tokens = match split_tokens(line) {
        Some(tokens) => tokens,
        None => line
            .split_whitespace()
            .map(|t| t.trim_matches('"').to_string())
            .collect(),
    };
    classify_tokens(tokens)
}

/// Whitespace split honoring double-quoted substrings as single tokens.
/// Returns None on unbalanced quotes.
fn split_tokens(line: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut saw_any = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                saw_any = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if saw_any {
                    tokens.push(std::mem::take(&mut current));
                    saw_any = false;
                }
            }
            c => {
                current.push(c);
                saw_any = true;
            }
        }
    }
    if in_quotes {
        return None;
    }
    if saw_any {
        tokens.push(current);
    }
    Some(tokens)
}

fn classify_tokens(tokens: Vec<String>) -> ParsedInput {
    let mut input = ParsedInput::default();
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        if let Some(name) = token.strip_prefix("--") {
            if name.is_empty() {
                input.positionals.push(token);
            } else if let Some((key, value)) = name.split_once('=') {
                push_option(&mut input.options, key, OptionValue::from_raw(value));
            } else {
                // `--key value` consumes the next token only when it does
                // not itself look like an option.
                let takes_value = iter.peek().map_or(false, |next| !next.starts_with('-'));
                if takes_value {
                    let value = iter.next().unwrap_or_default();
                    push_option(&mut input.options, name, OptionValue::from_raw(&value));
                } else {
                    push_option(&mut input.options, name, OptionValue::Flag(true));
                }
            }
        } else if token.len() > 1
            && token.starts_with('-')
            && token.chars().skip(1).all(|c| c.is_ascii_alphabetic())
        {
            for flag in token.chars().skip(1) {
                push_option(&mut input.options, &flag.to_string(), OptionValue::Flag(true));
            }
        } else {
            input.positionals.push(token);
        }
    }
    input
}

/// Repeated options accumulate into a list of raw strings.
fn push_option(options: &mut BTreeMap<String, OptionValue>, key: &str, value: OptionValue) {
    match options.remove(key) {
        None => {
            options.insert(key.to_string(), value);
        }
        Some(existing) => {
            let mut items = existing.raw_text();
            if items.is_empty() {
                items.push("true".to_string());
            }
            let mut new_items = value.raw_text();
            if new_items.is_empty() {
                new_items.push("true".to_string());
            }
            items.extend(new_items);
            options.insert(key.to_string(), OptionValue::List(items));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let parsed = parse_line("hangman guess  x");
        assert_eq!(parsed.positionals, vec!["hangman", "guess", "x"]);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn quoted_substring_is_one_token() {
        let parsed = parse_line(r#"echo "hello there" world"#);
        assert_eq!(parsed.positionals, vec!["echo", "hello there", "world"]);
    }

    #[test]
    fn long_option_with_equals() {
        let parsed = parse_line("trivia --difficulty=hard");
        assert_eq!(
            parsed.options.get("difficulty"),
            Some(&OptionValue::Text("hard".to_string()))
        );
    }

    #[test]
    fn long_option_consumes_following_token() {
        let parsed = parse_line("weather --units metric london");
        assert_eq!(
            parsed.options.get("units"),
            Some(&OptionValue::Text("metric".to_string()))
        );
        assert_eq!(parsed.positionals, vec!["weather", "london"]);
    }

    #[test]
    fn long_option_does_not_consume_dash_token() {
        let parsed = parse_line("search --exact --limit 3");
        assert_eq!(parsed.options.get("exact"), Some(&OptionValue::Flag(true)));
        assert_eq!(parsed.options.get("limit"), Some(&OptionValue::Number(3.0)));
    }

    #[test]
    fn bare_long_option_is_boolean() {
        let parsed = parse_line("help --verbose");
        assert_eq!(parsed.options.get("verbose"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn short_flags_expand_independently() {
        let parsed = parse_line("search -ab query");
        assert_eq!(parsed.options.get("a"), Some(&OptionValue::Flag(true)));
        assert_eq!(parsed.options.get("b"), Some(&OptionValue::Flag(true)));
        assert_eq!(parsed.positionals, vec!["search", "query"]);
    }

    #[test]
    fn numeric_values_are_coerced() {
        let parsed = parse_line("trivia --category=18 --score 2.5");
        assert_eq!(parsed.options.get("category"), Some(&OptionValue::Number(18.0)));
        assert_eq!(parsed.options.get("score"), Some(&OptionValue::Number(2.5)));
    }

    #[test]
    fn repeated_option_accumulates() {
        let parsed = parse_line("search --tag rust --tag games");
        assert_eq!(
            parsed.options.get("tag"),
            Some(&OptionValue::List(vec!["rust".to_string(), "games".to_string()]))
        );
    }

    #[test]
    fn unbalanced_quotes_fall_back_to_whitespace_split() {
        let parsed = parse_line(r#"echo "oops"#);
        assert_eq!(parsed.positionals, vec!["echo", "oops"]);
    }

    #[test]
    fn negative_number_stays_positional() {
        let parsed = parse_line("color -5");
        assert_eq!(parsed.positionals, vec!["color", "-5"]);
    }

    #[test]
    fn flat_args_reconstitute_options() {
        let parsed = parse_line("trivia science --difficulty easy");
        assert_eq!(
            parsed.flat_args(),
            vec!["trivia", "science", "--difficulty", "easy"]
        );
    }

    #[test]
    fn blank_line_parses_to_nothing() {
        let parsed = parse_line("   ");
        assert!(parsed.positionals.is_empty());
        assert!(parsed.options.is_empty());
    }
}
