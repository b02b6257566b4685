// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Color utilities.

use std::str::FromStr;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::Level;

/// A style function: given a color token and a text, return the styled text.
pub type Style = fn(&str, &str) -> String;

/// Color tokens for the anchor levels.
///
/// A token is either a hex RGB color such as `#6666FF` or a color name understood by
/// [`colored`], such as `red` or `bright blue`. Levels between anchors use the token of the
/// nearest anchor below them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelColor {
    /// Color for trace level logs.
    pub trace: String,
    /// Color for debug level logs.
    pub debug: String,
    /// Color for info level logs.
    pub info: String,
    /// Color for warning level logs.
    pub warn: String,
    /// Color for error level logs.
    pub error: String,
    /// Color for fatal level logs.
    pub fatal: String,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            trace: "#C0C0C0".to_string(),
            debug: "#FFE6FF".to_string(),
            info: "#6666FF".to_string(),
            warn: "#FFBB33".to_string(),
            error: "#E60000".to_string(),
            fatal: "#8B008B".to_string(),
        }
    }
}

impl LevelColor {
    /// Return the color token bound to the level.
    pub fn token(&self, level: Level) -> &str {
        match level.anchor() {
            Level::FATAL => &self.fatal,
            Level::ERROR => &self.error,
            Level::WARN => &self.warn,
            Level::INFO => &self.info,
            Level::DEBUG => &self.debug,
            _ => &self.trace,
        }
    }
}

/// The default [`Style`]: foreground color via [`colored`].
///
/// Unknown tokens leave the text unstyled. [`colored`] also honors `NO_COLOR` and
/// `CLICOLOR_FORCE`.
pub fn default_style(token: &str, text: &str) -> String {
    match parse_color(token) {
        Some(color) => ColoredString::from(text).color(color).to_string(),
        None => text.to_string(),
    }
}

fn parse_color(token: &str) -> Option<Color> {
    let token = token.trim();
    match token.strip_prefix('#') {
        Some(hex) if hex.len() == 6 && hex.is_ascii() => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::TrueColor {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            })
        }
        Some(_) => None,
        None => Color::from_str(token).ok(),
    }
}
