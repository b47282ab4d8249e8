// src/main.rs
mod commands;
mod console;
mod dispatch;
mod error;
mod fuzzy;
mod games;
mod gesture;
mod parser;
mod render;
mod server;
mod services;
mod signal;
mod state;
mod store;
#[cfg(test)]
mod testutil;
mod transcript;

use std::path::PathBuf;
use std::sync::Arc;
use std::{net::SocketAddr, str::FromStr};

use clap::Parser;

use crate::{
    console::Console,
    error::{ConsoleError, ConsoleResult},
    services::{opentdb::OpenTriviaDb, weather::WeatherService},
    state::ConsoleState,
    store::JsonStore,
};

/// A keyboard-activated command console: hidden until the right ten keys are
/// pressed, with an optional REST surface for driving it headlessly.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Run the REST API surface instead of the interactive console.
    #[arg(long)]
    server: bool,

    /// Host and port for the REST API surface.
    #[arg(long, value_name = "HOST:PORT", default_value = "127.0.0.1:3000", env = "KONAMI_CONSOLE_ADDR")]
    addr: String,

    /// Directory for the persistent store (defaults to the platform data dir).
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Open the console immediately instead of waiting for the gesture.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> ConsoleResult<()> {
    let args = CliArgs::parse();

    if let Err(e) = signal::register_signal_handlers() {
        eprintln!("WARN: Failed to register signal handlers: {}", e);
    }

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => store::default_data_dir()?,
    };
    let store = Arc::new(JsonStore::open(&data_dir).await?);
    let state = ConsoleState::new(
        store,
        Arc::new(OpenTriviaDb::default()),
        WeatherService::default(),
    );

    if args.server {
        println!("Starting in server mode...");
        let socket_addr = SocketAddr::from_str(&args.addr).map_err(|e| {
            ConsoleError::Command(format!("Invalid server address '{}': {}", args.addr, e))
        })?;

        if let Err(e) = server::run_server(state, socket_addr).await {
            eprintln!("Server error: {}", e);
            return Err(ConsoleError::Command(format!("Server failed: {}", e)));
        }
        Ok(())
    } else {
        let mut console = Console::new(state);
        console.run(args.open).await
    }
}
