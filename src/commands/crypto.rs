// src/commands/crypto.rs
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256, Sha512};

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
};

// --- hash ---

pub struct HashCommand;

impl HashCommand {
    pub fn new() -> Self {
        HashCommand
    }
}

#[async_trait]
impl Command for HashCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let usage = || ConsoleError::Command("Usage: hash <sha256|sha512> <text>".to_string());
        let algorithm = args.first().ok_or_else(usage)?;
        let text = args.get(1..).filter(|rest| !rest.is_empty()).ok_or_else(usage)?.join(" ");

        let digest = match algorithm.to_lowercase().as_str() {
            "sha256" => hex::encode(Sha256::digest(text.as_bytes())),
            "sha512" => hex::encode(Sha512::digest(text.as_bytes())),
            other => {
                return Err(ConsoleError::Command(format!(
                    "Unknown algorithm '{}'. Supported: sha256, sha512",
                    other
                )))
            }
        };
        Ok(format!("{}: {}", algorithm.to_lowercase(), digest))
    }

    fn name(&self) -> &str {
        "hash"
    }

    fn help(&self) -> &str {
        "Hex digest of the given text (sha256 or sha512)."
    }
}

// --- base64 ---

pub struct Base64Command;

impl Base64Command {
    pub fn new() -> Self {
        Base64Command
    }
}

#[async_trait]
impl Command for Base64Command {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let usage = || ConsoleError::Command("Usage: base64 <encode|decode> <text>".to_string());
        let direction = args.first().ok_or_else(usage)?;
        let text = args.get(1..).filter(|rest| !rest.is_empty()).ok_or_else(usage)?.join(" ");

        match direction.to_lowercase().as_str() {
            "encode" => Ok(STANDARD.encode(text.as_bytes())),
            "decode" => {
                let bytes = STANDARD
                    .decode(text.trim())
                    .map_err(|e| ConsoleError::Command(format!("Invalid base64 input: {}", e)))?;
                String::from_utf8(bytes)
                    .map_err(|e| ConsoleError::Command(format!("Decoded bytes are not UTF-8: {}", e)))
            }
            other => Err(ConsoleError::Command(format!(
                "Unknown direction '{}'. Supported: encode, decode",
                other
            ))),
        }
    }

    fn name(&self) -> &str {
        "base64"
    }

    fn help(&self) -> &str {
        "Base64 encode or decode the given text."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sha256_digest_matches_known_vector() {
        let out = HashCommand::new()
            .execute(&["sha256".to_string(), "abc".to_string()])
            .await
            .expect("digest");
        assert!(out.ends_with("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"));
    }

    #[tokio::test]
    async fn base64_round_trips() {
        let encoded = Base64Command::new()
            .execute(&["encode".to_string(), "secret console".to_string()])
            .await
            .expect("encode");
        let decoded = Base64Command::new()
            .execute(&["decode".to_string(), encoded])
            .await
            .expect("decode");
        assert_eq!(decoded, "secret console");
    }

    #[tokio::test]
    async fn missing_arguments_show_usage() {
        let err = HashCommand::new().execute(&[]).await.unwrap_err();
        assert!(err.to_string().contains("Usage"));
    }
}
