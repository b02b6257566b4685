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

use crate::Error;
use crate::ErrorKind;
use crate::term::visible_width;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field {
        index: usize,
        width: usize,
        left: bool,
    },
}

/// A positional text template, e.g. `"[%s] %s - %s\n"`.
///
/// Supported directives:
///
/// * `%s` or `%v`: the next field.
/// * `%[n]s` or `%[n]v`: field `n`, 1-based. Following implicit directives continue from `n+1`.
/// * `%-8s`, `%8s`: the field padded to a width, left or right aligned.
/// * `%%`: a literal percent sign.
///
/// A template whose directives are all implicit must consume every field exactly once in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse a template for a fixed number of fields.
    pub(crate) fn parse(source: &str, fields: usize) -> Result<Template, Error> {
        let malformed = |reason: &str| {
            Error::new(ErrorKind::Format, format!("malformed template: {reason}"))
                .with_context("template", source)
        };

        let mut pieces = vec![];
        let mut literal = String::new();
        let mut next = 0;
        let mut reordered = false;

        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.next_if_eq(&'%').is_some() {
                literal.push('%');
                continue;
            }

            let mut left = false;
            while chars.next_if_eq(&'-').is_some() {
                left = true;
            }

            let mut index = None;
            if chars.next_if_eq(&'[').is_some() {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => return Err(malformed("bad field index")),
                    }
                }
                let n = digits
                    .parse::<usize>()
                    .map_err(|err| malformed("bad field index").with_source(err))?;
                if n == 0 || n > fields {
                    return Err(malformed("field index out of range").with_context("index", n));
                }
                index = Some(n - 1);
                reordered = true;
            }

            let mut width = 0usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                width = width
                    .checked_mul(10)
                    .and_then(|w| w.checked_add(d as usize))
                    .ok_or_else(|| malformed("width out of range"))?;
            }

            match chars.next() {
                Some('s' | 'v') => {}
                Some(verb) => {
                    return Err(malformed("unsupported verb").with_context("verb", verb));
                }
                None => return Err(malformed("dangling '%'")),
            }

            let index = index.unwrap_or(next);
            if index >= fields {
                return Err(malformed("more directives than fields").with_context("fields", fields));
            }
            next = index + 1;

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Field { index, width, left });
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        if !reordered && next < fields {
            return Err(malformed("fewer directives than fields").with_context("fields", fields));
        }

        Ok(Template { pieces })
    }

    /// Remove whitespace at the start and end of the template's literal text.
    ///
    /// Whitespace inside substituted fields is not affected.
    pub(crate) fn trim(mut self) -> Template {
        if let Some(Piece::Literal(s)) = self.pieces.first_mut() {
            *s = s.trim_start().to_string();
        }
        if let Some(Piece::Literal(s)) = self.pieces.last_mut() {
            *s = s.trim_end().to_string();
        }
        self.pieces
            .retain(|piece| !matches!(piece, Piece::Literal(s) if s.is_empty()));
        self
    }

    /// Substitute the fields into the template.
    pub(crate) fn render(&self, fields: &[&str]) -> String {
        let mut text = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => text.push_str(s),
                Piece::Field { index, width, left } => {
                    let value = fields.get(*index).copied().unwrap_or_default();
                    let pad = " ".repeat(width.saturating_sub(visible_width(value)));
                    if *left {
                        text.push_str(value);
                        text.push_str(&pad);
                    } else {
                        text.push_str(&pad);
                        text.push_str(value);
                    }
                }
            }
        }
        text
    }
}
