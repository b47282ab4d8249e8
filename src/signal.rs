// src/signal.rs
use lazy_static::lazy_static;
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::flag as signal_flag;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

lazy_static! {
    // Set when a termination signal arrives; the terminal loop polls it so
    // raw mode is always restored before exit.
    pub static ref SHUTDOWN_FLAG: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
}

/// Registers signal handlers that set SHUTDOWN_FLAG. Called once at startup.
pub fn register_signal_handlers() -> io::Result<()> {
    signal_flag::register(SIGINT, SHUTDOWN_FLAG.clone())?;
    signal_flag::register(SIGTERM, SHUTDOWN_FLAG.clone())?;
    signal_flag::register(SIGHUP, SHUTDOWN_FLAG.clone())?;
    signal_flag::register(SIGQUIT, SHUTDOWN_FLAG.clone())?;
    Ok(())
}

pub fn is_shutdown_requested() -> bool {
    SHUTDOWN_FLAG.load(Ordering::SeqCst)
}
