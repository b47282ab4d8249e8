// src/commands/weather.rs
use async_trait::async_trait;

use crate::{commands::Command, error::ConsoleResult, state::ConsoleState};

pub struct WeatherCommand {
    state: ConsoleState,
}

impl WeatherCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for WeatherCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        // Everything that is not an option is part of the location.
        let location = args
            .iter()
            .filter(|a| !a.starts_with('-'))
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        self.state.weather().current(&location).await
    }

    fn name(&self) -> &str {
        "weather"
    }

    fn help(&self) -> &str {
        "Current weather conditions (geolocated when no location is given)."
    }
}
