// src/commands/theme.rs
use async_trait::async_trait;

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
    state::{ConsoleState, ConsoleTheme},
};

pub struct ThemeCommand {
    state: ConsoleState,
}

impl ThemeCommand {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for ThemeCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        let Some(name) = args.first() else {
            let current = self.state.get_theme().await;
            return Ok(format!(
                "Current theme: {:?}. Available: default, nord, matrix",
                current
            ));
        };

        let theme = ConsoleTheme::parse(name).ok_or_else(|| {
            ConsoleError::Command(format!(
                "Unknown theme '{}'. Available: default, nord, matrix",
                name
            ))
        })?;
        self.state.set_theme(theme).await;
        Ok(format!("Theme set to: {:?}", theme))
    }

    fn name(&self) -> &str {
        "theme"
    }

    fn help(&self) -> &str {
        "Show or switch the console theme (default, nord, matrix)."
    }
}
