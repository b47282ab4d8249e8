// src/commands/search.rs
use async_trait::async_trait;
use url::Url;

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
};

pub struct SearchCommand;

impl SearchCommand {
    pub fn new() -> Self {
        SearchCommand
    }
}

#[async_trait]
impl Command for SearchCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let query = args.join(" ");
        if query.trim().is_empty() {
            return Err(ConsoleError::Command("Usage: search <query>".to_string()));
        }

        let mut url = Url::parse("https://duckduckgo.com/")
            .map_err(|e| ConsoleError::Command(format!("Failed to build search URL: {}", e)))?;
        url.query_pairs_mut().append_pair("q", query.trim());

        // The transcript linkifier turns the bare URL into a clickable link.
        Ok(format!("Search results for \"{}\": {}", query.trim(), url))
    }

    fn name(&self) -> &str {
        "search"
    }

    fn help(&self) -> &str {
        "Build a web search link for the query."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_builds_an_encoded_link() {
        let out = SearchCommand::new()
            .execute(&["rust borrow checker".to_string()])
            .await
            .expect("search output");
        assert!(out.contains("https://duckduckgo.com/?q=rust+borrow+checker"));
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let err = SearchCommand::new().execute(&[]).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Command(_)));
    }
}
