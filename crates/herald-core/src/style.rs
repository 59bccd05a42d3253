//! Colors and the painter seam.
//!
//! The renderer never emits escape codes itself; it hands a piece of text
//! and a [`Style`] to a [`Painter`]. [`AnsiPainter`] styles through the
//! `colored` crate and [`PlainPainter`] returns text untouched.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::error::HeraldError;

/// Named foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Black,
    Blue,
    BlueBright,
    Cyan,
    CyanBright,
    #[serde(alias = "grey")]
    Gray,
    Green,
    GreenBright,
    Magenta,
    MagentaBright,
    Red,
    RedBright,
    White,
    WhiteBright,
    Yellow,
    YellowBright,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Blue,
        Color::BlueBright,
        Color::Cyan,
        Color::CyanBright,
        Color::Gray,
        Color::Green,
        Color::GreenBright,
        Color::Magenta,
        Color::MagentaBright,
        Color::Red,
        Color::RedBright,
        Color::White,
        Color::WhiteBright,
        Color::Yellow,
        Color::YellowBright,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::BlueBright => "blueBright",
            Color::Cyan => "cyan",
            Color::CyanBright => "cyanBright",
            Color::Gray => "gray",
            Color::Green => "green",
            Color::GreenBright => "greenBright",
            Color::Magenta => "magenta",
            Color::MagentaBright => "magentaBright",
            Color::Red => "red",
            Color::RedBright => "redBright",
            Color::White => "white",
            Color::WhiteBright => "whiteBright",
            Color::Yellow => "yellow",
            Color::YellowBright => "yellowBright",
        }
    }

    fn ansi(self) -> colored::Color {
        match self {
            Color::Black => colored::Color::Black,
            Color::Blue => colored::Color::Blue,
            Color::BlueBright => colored::Color::BrightBlue,
            Color::Cyan => colored::Color::Cyan,
            Color::CyanBright => colored::Color::BrightCyan,
            Color::Gray => colored::Color::BrightBlack,
            Color::Green => colored::Color::Green,
            Color::GreenBright => colored::Color::BrightGreen,
            Color::Magenta => colored::Color::Magenta,
            Color::MagentaBright => colored::Color::BrightMagenta,
            Color::Red => colored::Color::Red,
            Color::RedBright => colored::Color::BrightRed,
            Color::White => colored::Color::White,
            Color::WhiteBright => colored::Color::BrightWhite,
            Color::Yellow => colored::Color::Yellow,
            Color::YellowBright => colored::Color::BrightYellow,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("grey") {
            return Ok(Color::Gray);
        }
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HeraldError::InvalidColor(s.to_string()))
    }
}

/// How one piece of a line should look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        underline: false,
    };

    pub fn color(color: Option<Color>) -> Self {
        Style {
            color,
            underline: false,
        }
    }

    pub fn underlined(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.color.is_none() && !self.underline
    }
}

/// Terminal style renderer.
pub trait Painter: Send + Sync {
    fn paint(&self, text: &str, style: Style) -> String;
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// ANSI styling through `colored`. Honors `NO_COLOR` / `CLICOLOR_FORCE`
/// and any override set with `colored::control`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPainter;

impl Painter for AnsiPainter {
    fn paint(&self, text: &str, style: Style) -> String {
        if style.is_plain() || text.is_empty() {
            return text.to_string();
        }
        let mut styled = text.normal();
        if let Some(color) = style.color {
            styled = styled.color(color.ansi());
        }
        if style.underline {
            styled = styled.underline();
        }
        styled.to_string()
    }
}

/// When to emit color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Painter for this mode. `Always` forces `colored` on process-wide.
    pub fn painter(self) -> Arc<dyn Painter> {
        match self {
            ColorMode::Auto => Arc::new(AnsiPainter),
            ColorMode::Always => {
                colored::control::set_override(true);
                Arc::new(AnsiPainter)
            }
            ColorMode::Never => Arc::new(PlainPainter),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}
