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

//! Terminal utilities.

/// A terminal width query, returning the column count or `None` on failure.
pub type TerminalWidth = fn() -> Option<usize>;

/// The column count assumed when the terminal width cannot be determined.
pub const FALLBACK_WIDTH: usize = 80;

/// The default [`TerminalWidth`]: the width of the controlling terminal.
pub fn default_terminal_width() -> Option<usize> {
    term_size::dimensions().map(|(w, _)| w)
}

/// Count the columns of `text` as displayed, skipping ANSI escape sequences.
pub(crate) fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequences end with a byte in '@'..='~'
            if chars.peek() == Some(&'[') {
                chars.next();
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_width() {
        assert_eq!(visible_width("[INFO] 10:00:00 - x"), 19);
        assert_eq!(visible_width("\u{1b}[38;2;102;102;255mINFO\u{1b}[0m"), 4);
        assert_eq!(visible_width(""), 0);
        assert_eq!(visible_width("héllo"), 5);
    }
}
