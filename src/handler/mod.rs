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

//! The record handler: configuration, derivation and rendering.

use crate::Attr;
use crate::Error;
use crate::ErrorKind;
use crate::Level;
use crate::Record;
use crate::color::LevelColor;
use crate::color::Style;
use crate::layout::RecordLine;
use crate::layout::TextFields;
use crate::layout::TextLayout;
use crate::sink::SharedSink;
use crate::sink::Sink;
use crate::term::TerminalWidth;
use crate::time::format_time;

pub use self::builder::DEFAULT_GROUP_TEXT_OUTPUT_FORMAT;
pub use self::builder::DEFAULT_TEXT_OUTPUT_FORMAT;
pub use self::builder::HandlerBuilder;

mod builder;

/// The attribute key of the call-site annotation.
pub const LINE_INFO_KEY: &str = "slog_info";

/// A handler renders log records as text or JSON and writes them to its sinks.
///
/// A handler is immutable once built. [`with_attrs`](Handler::with_attrs) and
/// [`with_group`](Handler::with_group) return derived handlers that share the parent's sinks
/// and leave the parent untouched, so a handler and its children can be used from many
/// threads at once.
///
/// Records at [`Level::ERROR`] and above go to the error sinks; all others go to the normal
/// sinks. Every sink in the selected list receives a copy of the line.
///
/// # Examples
///
/// ```
/// use slogforth::Attr;
/// use slogforth::Handler;
/// use slogforth::Record;
/// use slogforth::sink::Buffer;
///
/// let buffer = Buffer::default();
/// let handler = Handler::builder()
///     .stdout(buffer.clone())
///     .time_format("%Y")
///     .build()
///     .with_attrs([Attr::new("service", "api")]);
///
/// let record = Record::builder()
///     .time("2024-08-11T22:44:57+00:00[+00:00]".parse().unwrap())
///     .message("started")
///     .build();
/// handler.handle(&record).unwrap();
/// assert_eq!(buffer.contents_string(), "[INFO] 2024 - started service=api\n");
/// ```
#[derive(Clone, Debug)]
pub struct Handler {
    pub(crate) json: bool,
    pub(crate) stdout: Vec<SharedSink>,
    pub(crate) stderr: Vec<SharedSink>,
    pub(crate) time_format: String,
    pub(crate) text_output_format: String,
    pub(crate) group_text_output_format: String,
    pub(crate) level: Level,

    pub(crate) color: bool,
    pub(crate) colors: LevelColor,
    pub(crate) short_levels: bool,
    pub(crate) pid: bool,
    pub(crate) line_info: bool,
    pub(crate) line_info_verbose: bool,
    pub(crate) group_right_justify: bool,

    pub(crate) group: String,
    pub(crate) group_filter: Vec<String>,
    pub(crate) attrs: Vec<Attr>,

    // not part of the snapshot
    pub(crate) style: Style,
    pub(crate) terminal_width: TerminalWidth,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    /// Create a handler with the default configuration.
    pub fn new() -> Handler {
        HandlerBuilder::default().build()
    }

    /// Create a new builder.
    pub fn builder() -> HandlerBuilder {
        HandlerBuilder::default()
    }

    /// Whether records at the given level would be rendered.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Return a new handler with `attrs` appended to the bound attributes.
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Handler {
        let mut handler = self.clone();
        handler.attrs.extend(attrs);
        handler
    }

    /// Return a new handler whose group is `name`.
    ///
    /// Groups do not nest: the new name replaces the current one.
    pub fn with_group(&self, name: impl Into<String>) -> Handler {
        let mut handler = self.clone();
        handler.group = name.into();
        handler
    }

    /// The minimum level this handler renders.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The current group name, empty if none.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The bound attributes, in binding order.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Render and write a record to the sinks selected by its level.
    ///
    /// Nothing is written if the current group is filtered. Every selected sink is written even
    /// if an earlier one fails; the failures are then returned as a single [`ErrorKind::Io`]
    /// error with one source per failed sink.
    pub fn handle(&self, record: &Record) -> Result<(), Error> {
        let Some(bytes) = self.format(record)? else {
            return Ok(());
        };

        let sinks = if record.level() >= Level::ERROR {
            &self.stderr
        } else {
            &self.stdout
        };
        fan_out(sinks, "failed to write to sinks", |sink| sink.write(&bytes))
    }

    /// Flush every normal and error sink.
    pub fn flush(&self) -> Result<(), Error> {
        let sinks = self.stdout.iter().chain(&self.stderr).cloned().collect::<Vec<_>>();
        fan_out(&sinks, "failed to flush sinks", |sink| sink.flush())
    }

    /// Render a record without writing it.
    ///
    /// Returns `None` if the current group is filtered.
    pub fn format(&self, record: &Record) -> Result<Option<Vec<u8>>, Error> {
        if self.is_filtered() {
            return Ok(None);
        }

        let line_info = if self.line_info {
            self.line_info_attr(record)
        } else {
            None
        };
        let attrs = self
            .attrs
            .iter()
            .chain(record.attrs())
            .chain(line_info.as_ref());

        let time = format_time(record.time(), &self.time_format)?;
        let level = record.level().display_name(self.short_levels);
        let pid = self.pid.then(|| std::process::id().to_string());

        let bytes = if self.json {
            let attrs = attrs
                .map(|attr| -> Result<_, Error> {
                    Ok((attr.key(), attr.value().to_json(&self.time_format)?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            RecordLine {
                level: &level,
                time: &time,
                message: record.message(),
                group: &self.group,
                attrs,
                pid: pid.as_deref(),
            }
            .format()?
        } else {
            let attrs = attrs
                .map(|attr| attr.to_text(&self.time_format))
                .collect::<Result<Vec<_>, _>>()?;
            let level = if self.color {
                (self.style)(self.colors.token(record.level()), &level)
            } else {
                level.into_owned()
            };
            let layout = TextLayout {
                template: &self.text_output_format,
                group_template: &self.group_text_output_format,
                group_right_justify: self.group_right_justify,
                terminal_width: self.terminal_width,
            };
            layout.format(&TextFields {
                level: &level,
                time: &time,
                message: record.message(),
                group: &self.group,
                pid: pid.as_deref(),
                attrs: &attrs,
            })?
        };

        Ok(Some(bytes))
    }

    fn is_filtered(&self) -> bool {
        !self.group.is_empty() && self.group_filter.iter().any(|name| *name == self.group)
    }

    fn line_info_attr(&self, record: &Record) -> Option<Attr> {
        let file = record.file()?;
        let line = record.line().unwrap_or_default();
        let value = if self.line_info_verbose {
            let module = record.module_path().unwrap_or_default();
            format!("{module} [{file}:{line}]")
        } else {
            format!("{}:{line}", record.filename())
        };
        Some(Attr::new(LINE_INFO_KEY, value))
    }
}

fn fan_out(
    sinks: &[SharedSink],
    message: &str,
    op: impl Fn(&dyn Sink) -> Result<(), Error>,
) -> Result<(), Error> {
    let errors = sinks
        .iter()
        .filter_map(|sink| op(sink.as_ref()).err())
        .collect::<Vec<_>>();
    if errors.is_empty() {
        return Ok(());
    }

    let mut err = Error::new(ErrorKind::Io, message)
        .with_context("failed", errors.len())
        .with_context("sinks", sinks.len());
    for source in errors {
        err = err.with_source(source);
    }
    Err(err)
}
