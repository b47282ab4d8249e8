// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command error: {0}")]
    Command(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
