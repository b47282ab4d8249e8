// src/server.rs
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    dispatch::dispatch_line,
    error::ConsoleError,
    games::hangman::HangmanState,
    state::ConsoleState,
    store::KEY_HANGMAN_STATE,
    transcript::TranscriptEntry,
};

// --- Request/Response structs for the API ---
#[derive(Serialize)]
struct ApiErrorResponse {
    error: String,
    details: Option<String>,
}
#[derive(Serialize)]
struct StatusResponse {
    console_open: bool,
    theme: String,
    trivia_pending: bool,
    hangman_active: bool,
}
#[derive(Serialize)]
struct CommandInfo {
    name: String,
    help: String,
}
#[derive(Serialize)]
struct CommandListResponse {
    items: Vec<CommandInfo>,
}
#[derive(Deserialize)]
struct InputRequest {
    line: String,
}
#[derive(Serialize)]
struct InputResponse {
    entry: Option<TranscriptEntry>,
}
#[derive(Serialize)]
struct TranscriptResponse {
    entries: Vec<TranscriptEntry>,
}

// --- Axum error handling ---
enum ApiError {
    Console(ConsoleError),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Console(err) => {
                let status_code = match &err {
                    ConsoleError::UnknownCommand(_) => StatusCode::NOT_FOUND,
                    ConsoleError::Command(_) | ConsoleError::Json(_) => StatusCode::BAD_REQUEST,
                    ConsoleError::Service(_) | ConsoleError::Request(_) => StatusCode::BAD_GATEWAY,
                    ConsoleError::Io(_) | ConsoleError::Store(_) | ConsoleError::Terminal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status_code, err.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        let body = AxumJson(ApiErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            details: Some(error_message),
        });
        (status, body).into_response()
    }
}

impl From<ConsoleError> for ApiError {
    fn from(err: ConsoleError) -> Self {
        ApiError::Console(err)
    }
}

// --- API handlers ---
async fn get_status(State(state): State<ConsoleState>) -> Result<AxumJson<StatusResponse>, ApiError> {
    let hangman_active = state
        .store()
        .get::<HangmanState>(KEY_HANGMAN_STATE)
        .await
        .is_some();
    Ok(AxumJson(StatusResponse {
        console_open: state.is_open().await,
        theme: format!("{:?}", state.get_theme().await),
        trivia_pending: state.has_pending_trivia().await,
        hangman_active,
    }))
}

async fn list_commands(
    State(state): State<ConsoleState>,
) -> Result<AxumJson<CommandListResponse>, ApiError> {
    let registry = state.command_registry();
    let items = registry
        .list_commands()
        .into_iter()
        .map(|(name, help)| CommandInfo {
            name: name.to_string(),
            help: help.to_string(),
        })
        .collect();
    Ok(AxumJson(CommandListResponse { items }))
}

async fn get_transcript(
    State(state): State<ConsoleState>,
) -> Result<AxumJson<TranscriptResponse>, ApiError> {
    Ok(AxumJson(TranscriptResponse {
        entries: state.transcript_entries().await,
    }))
}

async fn post_input(
    State(state): State<ConsoleState>,
    AxumJson(payload): AxumJson<InputRequest>,
) -> Result<AxumJson<InputResponse>, ApiError> {
    if payload.line.trim().is_empty() {
        return Err(ApiError::BadRequest("Input line cannot be empty.".to_string()));
    }
    let entry = dispatch_line(&state, &payload.line).await;
    Ok(AxumJson(InputResponse { entry }))
}

// --- Server setup ---
pub async fn run_server(
    state: ConsoleState,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = Router::new()
        .route("/status", get(get_status))
        .route("/commands", get(list_commands))
        .route("/transcript", get(get_transcript))
        .route("/input", post(post_input))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    info!("Starting console API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
