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
use crate::layout::template::Template;
use crate::term::FALLBACK_WIDTH;
use crate::term::TerminalWidth;
use crate::term::visible_width;

/// The fields of one text line.
#[derive(Debug)]
pub(crate) struct TextFields<'a> {
    pub level: &'a str,
    pub time: &'a str,
    pub message: &'a str,
    pub group: &'a str,
    pub pid: Option<&'a str>,
    pub attrs: &'a [String],
}

/// A layout that formats a record as a templated text line.
///
/// Output format with the default templates:
///
/// ```text
/// [INFO] 22:44:57 - Hello info!
/// [WARN] 22:44:57 - Hello warn! retries=3
/// mygroup | [INFO] 22:44:57 - Hello group!
/// [4242] [ERROR] 22:44:57 - Hello pid!
/// ```
///
/// With right-justified groups, the group name is aligned to the terminal edge:
///
/// ```text
/// [INF] 22:44:57 - Hello group!                                              mygroup
/// ```
#[derive(Debug)]
pub(crate) struct TextLayout<'a> {
    pub template: &'a str,
    pub group_template: &'a str,
    pub group_right_justify: bool,
    pub terminal_width: TerminalWidth,
}

impl TextLayout<'_> {
    pub(crate) fn format(&self, fields: &TextFields) -> Result<Vec<u8>, Error> {
        let group = fields.group;
        let right_justify = self.group_right_justify && !group.is_empty();
        let values = [fields.level, fields.time, fields.message];

        let template = Template::parse(self.template, 3)?;
        let line = if fields.attrs.is_empty() && !right_justify {
            template.render(&values)
        } else {
            // the template's own surrounding whitespace goes, the fields are kept as is
            let mut line = template.trim().render(&values);
            if !fields.attrs.is_empty() {
                line.push(' ');
                line.push_str(&fields.attrs.join(" "));
            }
            if !right_justify {
                line.push('\n');
            }
            line
        };

        if group.is_empty() {
            return Ok(with_pid(fields.pid, line).into_bytes());
        }

        if right_justify {
            let left = with_pid(fields.pid, line);
            let width = (self.terminal_width)().unwrap_or(FALLBACK_WIDTH);
            let pad = width
                .saturating_sub(visible_width(&left))
                .saturating_sub(visible_width(group));
            let pad = " ".repeat(pad);
            return Ok(format!("{left}{pad}{group}\n").into_bytes());
        }

        let line = Template::parse(self.group_template, 2)?.render(&[group, &line]);
        Ok(with_pid(fields.pid, line).into_bytes())
    }
}

fn with_pid(pid: Option<&str>, line: String) -> String {
    match pid {
        Some(pid) => format!("[{pid}] {line}"),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "[%s] %s - %s\n";
    const GROUP_TEMPLATE: &str = "%s | %s";

    fn layout(group_right_justify: bool) -> TextLayout<'static> {
        TextLayout {
            template: TEMPLATE,
            group_template: GROUP_TEMPLATE,
            group_right_justify,
            terminal_width: || Some(80),
        }
    }

    fn fields<'a>(group: &'a str, pid: Option<&'a str>, attrs: &'a [String]) -> TextFields<'a> {
        TextFields {
            level: "INFO",
            time: "10:00:00",
            message: "test",
            group,
            pid,
            attrs,
        }
    }

    fn format(layout: &TextLayout, fields: &TextFields) -> String {
        String::from_utf8(layout.format(fields).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(
            format(&layout(false), &fields("", None, &[])),
            "[INFO] 10:00:00 - test\n"
        );
    }

    #[test]
    fn test_attrs_appended() {
        let attrs = ["foo=bar".to_string(), "n=1".to_string()];
        assert_eq!(
            format(&layout(false), &fields("", None, &attrs)),
            "[INFO] 10:00:00 - test foo=bar n=1\n"
        );
    }

    #[test]
    fn test_group_prefix_and_pid() {
        assert_eq!(
            format(&layout(false), &fields("db", Some("42"), &[])),
            "[42] db | [INFO] 10:00:00 - test\n"
        );
    }

    #[test]
    fn test_right_justified_group() {
        // "[INFO] 10:00:00 - test" is 22 columns
        let line = format(&layout(true), &fields("derp", None, &[]));
        let expected = format!("[INFO] 10:00:00 - test{}derp\n", " ".repeat(80 - 22 - 4));
        assert_eq!(line, expected);
    }

    #[test]
    fn test_right_justified_group_with_pid() {
        let line = format(&layout(true), &fields("derp", Some("7"), &[]));
        let expected = format!("[7] [INFO] 10:00:00 - test{}derp\n", " ".repeat(80 - 26 - 4));
        assert_eq!(line, expected);
    }

    #[test]
    fn test_right_justified_overflow() {
        let layout = TextLayout {
            terminal_width: || Some(10),
            ..layout(true)
        };
        assert_eq!(
            format(&layout, &fields("derp", None, &[])),
            "[INFO] 10:00:00 - testderp\n"
        );
    }

    #[test]
    fn test_right_justified_width_fallback() {
        let layout = TextLayout {
            terminal_width: || None,
            ..layout(true)
        };
        let line = format(&layout, &fields("derp", None, &[]));
        assert_eq!(line.len(), FALLBACK_WIDTH + 1);
    }

    #[test]
    fn test_attrs_keep_field_whitespace() {
        let layout = TextLayout {
            template: "%s %s %s\n",
            ..layout(false)
        };
        let attrs = ["k=v".to_string()];
        let fields = TextFields {
            message: "  msg  ",
            ..fields("", None, &attrs)
        };
        assert_eq!(
            String::from_utf8(layout.format(&fields).unwrap()).unwrap(),
            "INFO 10:00:00   msg   k=v\n"
        );
    }

    #[test]
    fn test_right_justified_keeps_field_whitespace() {
        let layout = TextLayout {
            template: " %s|%s|%s \n",
            ..layout(true)
        };
        let fields = TextFields {
            message: "m ",
            ..fields("g", None, &[])
        };
        let line = String::from_utf8(layout.format(&fields).unwrap()).unwrap();
        // "INFO|10:00:00|m " is 16 columns
        assert_eq!(line, format!("INFO|10:00:00|m {}g\n", " ".repeat(80 - 16 - 1)));
    }

    #[test]
    fn test_right_justify_without_group() {
        assert_eq!(
            format(&layout(true), &fields("", None, &[])),
            "[INFO] 10:00:00 - test\n"
        );
    }
}
