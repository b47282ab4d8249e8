// src/commands/color.rs
use async_trait::async_trait;

use crate::{
    commands::Command,
    error::{ConsoleError, ConsoleResult},
};

pub struct ColorCommand;

impl ColorCommand {
    pub fn new() -> Self {
        ColorCommand
    }
}

fn usage() -> ConsoleError {
    ConsoleError::Command("Usage: color <#rrggbb> | color <r> <g> <b>".to_string())
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[async_trait]
impl Command for ColorCommand {
    async fn execute(&self, args: &[String]) -> ConsoleResult<String> {
        match args {
            [hex] => {
                let (r, g, b) = parse_hex(hex).ok_or_else(usage)?;
                Ok(format!("#{} = rgb({}, {}, {})", hex.trim_start_matches('#').to_lowercase(), r, g, b))
            }
            [r, g, b] => {
                let parse = |s: &String| s.parse::<u8>().map_err(|_| usage());
                let (r, g, b) = (parse(r)?, parse(g)?, parse(b)?);
                Ok(format!("rgb({}, {}, {}) = #{:02x}{:02x}{:02x}", r, g, b, r, g, b))
            }
            _ => Err(usage()),
        }
    }

    fn name(&self) -> &str {
        "color"
    }

    fn help(&self) -> &str {
        "Convert between hex and RGB color forms."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hex_to_rgb() {
        let out = ColorCommand::new()
            .execute(&["#ff8800".to_string()])
            .await
            .expect("conversion");
        assert_eq!(out, "#ff8800 = rgb(255, 136, 0)");
    }

    #[tokio::test]
    async fn rgb_to_hex() {
        let args: Vec<String> = ["255", "136", "0"].iter().map(|s| s.to_string()).collect();
        let out = ColorCommand::new().execute(&args).await.expect("conversion");
        assert_eq!(out, "rgb(255, 136, 0) = #ff8800");
    }

    #[tokio::test]
    async fn malformed_input_shows_usage() {
        let err = ColorCommand::new()
            .execute(&["#ff88".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Usage"));
    }
}
