// src/services/opentdb.rs
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{ConsoleError, ConsoleResult};
use crate::games::trivia::PendingTrivia;

use super::TriviaSource;

const DEFAULT_BASE_URL: &str = "https://opentdb.com/";

#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    results: Vec<OpenTdbQuestion>,
}

#[derive(Debug, Deserialize)]
struct OpenTdbQuestion {
    category: String,
    difficulty: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OpenTriviaDb {
    client: Client,
    base_url: Url,
}

impl Default for OpenTriviaDb {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default Open Trivia DB URL")
    }
}

impl OpenTriviaDb {
    pub fn new(base_url: &str) -> ConsoleResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConsoleError::Service(format!("Invalid trivia URL: {}", e)))?;
        Ok(OpenTriviaDb {
            client: Client::new(),
            base_url,
        })
    }

    fn build_url(
        &self,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> ConsoleResult<Url> {
        let mut url = self
            .base_url
            .join("api.php")
            .map_err(|e| ConsoleError::Service(format!("Failed to build URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("amount", "1")
            .append_pair("type", "multiple");

        if let Some(name) = category {
            let id = category_id(name).ok_or_else(|| {
                ConsoleError::Command(format!(
                    "Unknown trivia category '{}'. Try one of: {}",
                    name,
                    CATEGORY_IDS
                        .iter()
                        .map(|(n, _)| *n)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
            url.query_pairs_mut().append_pair("category", &id.to_string());
        }
        if let Some(level) = difficulty {
            let level = level.to_lowercase();
            if !matches!(level.as_str(), "easy" | "medium" | "hard") {
                return Err(ConsoleError::Command(
                    "Difficulty must be easy, medium, or hard".to_string(),
                ));
            }
            url.query_pairs_mut().append_pair("difficulty", &level);
        }
        Ok(url)
    }
}

#[async_trait]
impl TriviaSource for OpenTriviaDb {
    async fn fetch_question(
        &self,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> ConsoleResult<PendingTrivia> {
        let url = self.build_url(category, difficulty)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ConsoleError::Service(format!(
                "Trivia API returned an error: {} - {}",
                status, body
            )));
        }

        let parsed: OpenTdbResponse = response.json().await?;
        if parsed.response_code != 0 {
            return Err(ConsoleError::Service(format!(
                "Trivia API response code {} (no question available for that filter)",
                parsed.response_code
            )));
        }
        let question = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConsoleError::Service("Trivia API returned no results".to_string()))?;

        Ok(assemble_question(question))
    }

    fn name(&self) -> &str {
        "opentdb"
    }
}

/// Shuffle the correct answer in among the incorrect ones and remember where
/// it landed.
fn assemble_question(raw: OpenTdbQuestion) -> PendingTrivia {
    let correct = decode_entities(&raw.correct_answer);
    let mut options: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|a| decode_entities(a))
        .collect();
    options.push(correct.clone());
    options.shuffle(&mut rand::rng());
    options.truncate(4);

    let correct_index = options.iter().position(|o| *o == correct).unwrap_or(0);
    let mut fixed: [String; 4] = Default::default();
    for (slot, option) in fixed.iter_mut().zip(options) {
        *slot = option;
    }

    PendingTrivia {
        question: decode_entities(&raw.question),
        options: fixed,
        correct_index,
        category: decode_entities(&raw.category),
        difficulty: raw.difficulty,
    }
}

/// The API HTML-encodes its text; decode the handful of entities it actually
/// emits.
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

const CATEGORY_IDS: [(&str, u32); 10] = [
    ("general", 9),
    ("books", 10),
    ("film", 11),
    ("music", 12),
    ("science", 17),
    ("computers", 18),
    ("sports", 21),
    ("geography", 22),
    ("history", 23),
    ("animals", 27),
];

fn category_id(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    CATEGORY_IDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}
