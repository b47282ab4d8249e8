// src/render.rs
use colored::Colorize;
use termimad::{
    crossterm::style::{Attribute, Color},
    MadSkin,
};

use crate::{
    state::ConsoleTheme,
    transcript::{contains_markup, TranscriptEntry, TranscriptKind},
};

type Rgb = (u8, u8, u8);

// Nord palette (subset)
const NORD_BG_LIGHT: Rgb = (59, 66, 82); // nord1
const NORD_FG_SUBTLE: Rgb = (76, 86, 106); // nord3
const NORD_FG_DEFAULT: Rgb = (216, 222, 233); // nord4
const NORD_CYAN: Rgb = (136, 192, 208); // nord8
const NORD_BLUE: Rgb = (129, 161, 193); // nord9
const NORD_RED: Rgb = (191, 97, 106); // nord11
const NORD_GREEN: Rgb = (163, 190, 140); // nord14

// Matrix palette
const MATRIX_GREEN: Rgb = (0, 255, 65);
const MATRIX_GREEN_DIM: Rgb = (0, 143, 17);
const MATRIX_RED: Rgb = (255, 64, 64);

#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub prompt: Rgb,
    pub input_echo: Rgb,
    pub output: Rgb,
    pub error: Rgb,
    pub info: Rgb,
    pub accent: Rgb,
}

fn nord_palette() -> ThemePalette {
    ThemePalette {
        prompt: NORD_BLUE,
        input_echo: NORD_CYAN,
        output: NORD_FG_DEFAULT,
        error: NORD_RED,
        info: NORD_FG_SUBTLE,
        accent: NORD_GREEN,
    }
}

fn matrix_palette() -> ThemePalette {
    ThemePalette {
        prompt: MATRIX_GREEN,
        input_echo: MATRIX_GREEN,
        output: MATRIX_GREEN,
        error: MATRIX_RED,
        info: MATRIX_GREEN_DIM,
        accent: MATRIX_GREEN,
    }
}

fn default_palette() -> ThemePalette {
    ThemePalette {
        prompt: (128, 128, 128),
        input_echo: (173, 216, 230),
        output: (220, 220, 220),
        error: (200, 0, 0),
        info: (128, 128, 128),
        accent: (0, 180, 0),
    }
}

fn nord_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    let fg = Color::Rgb { r: NORD_FG_DEFAULT.0, g: NORD_FG_DEFAULT.1, b: NORD_FG_DEFAULT.2 };
    let bg = Color::Rgb { r: NORD_BG_LIGHT.0, g: NORD_BG_LIGHT.1, b: NORD_BG_LIGHT.2 };
    let blue = Color::Rgb { r: NORD_BLUE.0, g: NORD_BLUE.1, b: NORD_BLUE.2 };
    let cyan = Color::Rgb { r: NORD_CYAN.0, g: NORD_CYAN.1, b: NORD_CYAN.2 };

    skin.paragraph.set_fg(fg);
    skin.inline_code.set_bg(bg);
    skin.inline_code.set_fg(fg);
    skin.code_block.set_bg(bg);
    skin.code_block.set_fg(fg);
    skin.headers[0].set_fg(blue);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(cyan);
    skin.bold.add_attr(Attribute::Bold);
    skin
}

fn matrix_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    let green = Color::Rgb { r: MATRIX_GREEN.0, g: MATRIX_GREEN.1, b: MATRIX_GREEN.2 };
    skin.paragraph.set_fg(green);
    skin.inline_code.set_fg(green);
    skin.code_block.set_fg(green);
    for header in &mut skin.headers {
        header.set_fg(green);
    }
    skin
}

pub fn get_theme_resources(theme: ConsoleTheme) -> (MadSkin, ThemePalette) {
    match theme {
        ConsoleTheme::Nord => (nord_skin(), nord_palette()),
        ConsoleTheme::Matrix => (matrix_skin(), matrix_palette()),
        ConsoleTheme::Default => (MadSkin::default(), default_palette()),
    }
}

pub fn colorize(text: &str, color: Rgb) -> colored::ColoredString {
    text.truecolor(color.0, color.1, color.2)
}

/// Format one transcript entry for the terminal: the echoed input line (when
/// present), then the output colored by kind. Help output is rendered as
/// markdown; anything carrying link markup is passed through untouched so
/// the hyperlink escapes survive.
pub fn format_entry(entry: &TranscriptEntry, theme: ConsoleTheme) -> String {
    let (skin, palette) = get_theme_resources(theme);
    let mut lines = String::new();

    if !entry.input.is_empty() {
        lines.push_str(&format!(
            "{} {}\n",
            colorize("❯", palette.prompt),
            colorize(&entry.input, palette.input_echo)
        ));
    }

    let body = match entry.kind {
        TranscriptKind::Error => colorize(&entry.output, palette.error).to_string(),
        TranscriptKind::Info => colorize(&entry.output, palette.info).to_string(),
        TranscriptKind::Command => {
            if contains_markup(&entry.output) {
                entry.output.clone()
            } else if entry.input.split_whitespace().next() == Some("help") {
                skin.term_text(&entry.output).to_string()
            } else {
                colorize(&entry.output, palette.output).to_string()
            }
        }
    };
    lines.push_str(&body);
    lines
}

/// Banner printed when the gesture arms the console.
pub fn banner(theme: ConsoleTheme) -> String {
    let (_, palette) = get_theme_resources(theme);
    format!(
        "{}\n{}",
        colorize("konami-console :: type 'help' for commands", palette.accent),
        colorize("'exit' closes the console; arrow keys recall input.", palette.info)
    )
}
