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

use std::sync::Arc;

use crate::Attr;
use crate::Handler;
use crate::Level;
use crate::color::LevelColor;
use crate::color::Style;
use crate::color::default_style;
use crate::sink::SharedSink;
use crate::sink::Sink;
use crate::sink::Stderr;
use crate::sink::Stdout;
use crate::term::TerminalWidth;
use crate::term::default_terminal_width;
use crate::time::DEFAULT_TIME_FORMAT;

/// The default text line template: level, time and message.
pub const DEFAULT_TEXT_OUTPUT_FORMAT: &str = "[%s] %s - %s\n";

/// The default group line template: group and the rendered line.
pub const DEFAULT_GROUP_TEXT_OUTPUT_FORMAT: &str = "%s | %s";

/// A builder for configuring a [`Handler`].
///
/// Options apply in call order; a later call overrides an earlier one on the same option.
/// Templates and the time format are not validated here: a malformed one is reported by the
/// first [`Handler::handle`] call.
///
/// ## Examples
///
/// ```
/// use slogforth::Handler;
/// use slogforth::Level;
///
/// let handler = Handler::builder()
///     .level(Level::DEBUG)
///     .short_levels()
///     .color()
///     .pid()
///     .build();
/// assert!(handler.enabled(Level::DEBUG));
/// ```
#[must_use = "call `build` to create the handler"]
#[derive(Debug)]
pub struct HandlerBuilder {
    handler: Handler,
}

impl Default for HandlerBuilder {
    fn default() -> Self {
        Self {
            handler: Handler {
                json: false,
                stdout: vec![Arc::new(Stdout::default())],
                stderr: vec![Arc::new(Stderr::default())],
                time_format: DEFAULT_TIME_FORMAT.to_string(),
                text_output_format: DEFAULT_TEXT_OUTPUT_FORMAT.to_string(),
                group_text_output_format: DEFAULT_GROUP_TEXT_OUTPUT_FORMAT.to_string(),
                level: Level::INFO,
                color: false,
                colors: LevelColor::default(),
                short_levels: false,
                pid: false,
                line_info: false,
                line_info_verbose: false,
                group_right_justify: false,
                group: String::new(),
                group_filter: vec![],
                attrs: vec![],
                style: default_style,
                terminal_width: default_terminal_width,
            },
        }
    }
}

impl HandlerBuilder {
    /// Render records as one JSON object per line.
    pub fn json(mut self) -> Self {
        self.handler.json = true;
        self
    }

    /// Replace the normal sinks with a single sink. Default to [`Stdout`].
    pub fn stdout(mut self, sink: impl Sink) -> Self {
        self.handler.stdout = vec![Arc::new(sink)];
        self
    }

    /// Replace the normal sinks.
    ///
    /// A handler always has at least one normal sink: an empty list leaves the current sinks in
    /// place.
    pub fn stdout_sinks(mut self, sinks: impl IntoIterator<Item = SharedSink>) -> Self {
        let sinks = sinks.into_iter().collect::<Vec<_>>();
        if !sinks.is_empty() {
            self.handler.stdout = sinks;
        }
        self
    }

    /// Replace the error sinks with a single sink. Default to [`Stderr`].
    pub fn stderr(mut self, sink: impl Sink) -> Self {
        self.handler.stderr = vec![Arc::new(sink)];
        self
    }

    /// Replace the error sinks.
    ///
    /// A handler always has at least one error sink: an empty list leaves the current sinks in
    /// place.
    pub fn stderr_sinks(mut self, sinks: impl IntoIterator<Item = SharedSink>) -> Self {
        let sinks = sinks.into_iter().collect::<Vec<_>>();
        if !sinks.is_empty() {
            self.handler.stderr = sinks;
        }
        self
    }

    /// Set the `strftime` pattern for record times and time attributes. Default to `%H:%M:%S`.
    ///
    /// See [`jiff::fmt::strtime`] for the supported directives.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.handler.time_format = format.into();
        self
    }

    /// Set the text line template. Default to `"[%s] %s - %s\n"`.
    ///
    /// The template receives three fields: level, time and message. `%s` and `%v` take the
    /// next field, `%[n]s` takes field `n` (1-based) and `%%` is a literal percent sign. A
    /// directive may carry a width, optionally left-aligned with `-`, as in `%-5s`.
    pub fn text_output_format(mut self, format: impl Into<String>) -> Self {
        self.handler.text_output_format = format.into();
        self
    }

    /// Set the template applied around the line when a group is set. Default to `"%s | %s"`.
    ///
    /// The template receives two fields: the group name and the rendered line.
    pub fn group_text_output_format(mut self, format: impl Into<String>) -> Self {
        self.handler.group_text_output_format = format.into();
        self
    }

    /// Set the minimum level to render. Default to [`Level::INFO`].
    pub fn level(mut self, level: Level) -> Self {
        self.handler.level = level;
        self
    }

    /// Color the level name in text output.
    pub fn color(mut self) -> Self {
        self.handler.color = true;
        self
    }

    /// Customize the color of the trace log level. Default to `#C0C0C0`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn trace_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.trace = color.into();
        self
    }

    /// Customize the color of the debug log level. Default to `#FFE6FF`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn debug_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.debug = color.into();
        self
    }

    /// Customize the color of the info log level. Default to `#6666FF`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn info_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.info = color.into();
        self
    }

    /// Customize the color of the warn log level. Default to `#FFBB33`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn warn_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.warn = color.into();
        self
    }

    /// Customize the color of the error log level. Default to `#E60000`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn error_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.error = color.into();
        self
    }

    /// Customize the color of the fatal log level. Default to `#8B008B`.
    ///
    /// No effect unless [`color`](HandlerBuilder::color) is set.
    pub fn fatal_color(mut self, color: impl Into<String>) -> Self {
        self.handler.colors.fatal = color.into();
        self
    }

    /// Use three-letter level names such as `INF`.
    pub fn short_levels(mut self) -> Self {
        self.handler.short_levels = true;
        self
    }

    /// Prefix each line with the process id, or add a `pid` field in JSON output.
    pub fn pid(mut self) -> Self {
        self.handler.pid = true;
        self
    }

    /// Annotate each record with its call site under the `slog_info` key.
    ///
    /// The short form is `file.rs:42`; the verbose form is `module [src/file.rs:42]`.
    pub fn line_info(mut self, verbose: bool) -> Self {
        self.handler.line_info = true;
        self.handler.line_info_verbose = verbose;
        self
    }

    /// Align the group name to the right edge of the terminal instead of applying the group
    /// template.
    pub fn group_right_justify(mut self) -> Self {
        self.handler.group_right_justify = true;
        self
    }

    /// Replace the set of groups whose records are dropped.
    pub fn group_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handler.group_filter = names.into_iter().map(Into::into).collect();
        self
    }

    /// Bind attributes to every record.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.handler.attrs.extend(attrs);
        self
    }

    /// Set the function that styles the level name in color mode.
    ///
    /// Default to [`default_style`], which colors the foreground via [`colored`].
    pub fn style(mut self, style: Style) -> Self {
        self.handler.style = style;
        self
    }

    /// Set the function that reports the terminal width for right-justified groups.
    ///
    /// Default to [`default_terminal_width`]. When it returns `None`, 80 columns are assumed.
    pub fn terminal_width(mut self, terminal_width: TerminalWidth) -> Self {
        self.handler.terminal_width = terminal_width;
        self
    }

    /// Build the [`Handler`].
    pub fn build(self) -> Handler {
        self.handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let handler = HandlerBuilder::default().build();
        assert_eq!(handler.stdout.len(), 1);
        assert_eq!(handler.stderr.len(), 1);
        assert_eq!(handler.time_format, "%H:%M:%S");
        assert_eq!(handler.text_output_format, "[%s] %s - %s\n");
        assert_eq!(handler.group_text_output_format, "%s | %s");
        assert_eq!(handler.level, Level::INFO);
        assert_eq!(handler.colors, LevelColor::default());
        assert!(!handler.json && !handler.color && !handler.pid);
    }

    #[test]
    fn test_later_calls_override() {
        let handler = Handler::builder()
            .level(Level::DEBUG)
            .level(Level::WARN)
            .group_filter(["a", "b"])
            .group_filter(["c"])
            .line_info(true)
            .line_info(false)
            .build();
        assert_eq!(handler.level, Level::WARN);
        assert_eq!(handler.group_filter, vec!["c".to_string()]);
        assert!(handler.line_info);
        assert!(!handler.line_info_verbose);
    }

    #[test]
    fn test_sink_lists_are_replaced() {
        let sinks: Vec<SharedSink> = vec![Arc::new(Stdout::default()), Arc::new(Stdout::default())];
        let handler = Handler::builder().stdout_sinks(sinks).build();
        assert_eq!(handler.stdout.len(), 2);
        assert_eq!(handler.stderr.len(), 1);
    }

    #[test]
    fn test_empty_sink_lists_keep_current_sinks() {
        let handler = Handler::builder()
            .stdout_sinks(Vec::new())
            .stderr_sinks(Vec::new())
            .build();
        assert_eq!(handler.stdout.len(), 1);
        assert_eq!(handler.stderr.len(), 1);

        let sinks: Vec<SharedSink> = vec![Arc::new(Stderr::default()), Arc::new(Stderr::default())];
        let handler = Handler::builder()
            .stderr_sinks(sinks)
            .stderr_sinks(Vec::new())
            .build();
        assert_eq!(handler.stderr.len(), 2);
    }
}
