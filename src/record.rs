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

//! Log record and its call site.

use std::borrow::Cow;
use std::panic::Location;

use jiff::Zoned;

use crate::Attr;
use crate::Level;

/// The payload of a log event, as supplied by the host front-end.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    time: Zoned,

    level: Level,
    message: Cow<'a, str>,

    // attributes attached at the call site
    attrs: Vec<Attr>,

    // the call site
    module_path: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,
}

impl<'a> Record<'a> {
    /// The observed time.
    pub fn time(&self) -> &Zoned {
        &self.time
    }

    /// The verbosity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attributes attached at the call site.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// The module path of the call site.
    pub fn module_path(&self) -> Option<&'a str> {
        self.module_path
    }

    /// The source file containing the call site.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The filename of the source file.
    pub fn filename(&self) -> Cow<'a, str> {
        self.file
            .map(std::path::Path::new)
            .and_then(std::path::Path::file_name)
            .map(std::ffi::OsStr::to_string_lossy)
            .unwrap_or_default()
    }

    /// The line containing the call site.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
///
/// # Examples
///
/// ```
/// use slogforth::Attr;
/// use slogforth::Level;
/// use slogforth::Record;
///
/// let record = Record::builder()
///     .level(Level::WARN)
///     .message("disk almost full")
///     .attr(Attr::new("free_mb", 12))
///     .build();
/// assert_eq!(record.level(), Level::WARN);
///
/// let here = Record::builder().caller().build();
/// assert_eq!(here.line(), Some(line!() - 1));
/// ```
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                time: Zoned::now(),
                level: Level::INFO,
                message: Cow::Borrowed(""),
                attrs: vec![],
                module_path: None,
                file: None,
                line: None,
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`time`](Record::time).
    pub fn time(mut self, time: Zoned) -> Self {
        self.record.time = time;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Append one call-site attribute.
    pub fn attr(mut self, attr: impl Into<Attr>) -> Self {
        self.record.attrs.push(attr.into());
        self
    }

    /// Append call-site attributes.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.record.attrs.extend(attrs);
        self
    }

    /// Set [`module_path`](Record::module_path).
    pub fn module_path(mut self, path: Option<&'a str>) -> Self {
        self.record.module_path = path;
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: Option<&'a str>) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: Option<u32>) -> Self {
        self.record.line = line;
        self
    }

    /// Set [`file`](Record::file) and [`line`](Record::line) to the location of the caller.
    #[track_caller]
    pub fn caller(mut self) -> Self {
        let location = Location::caller();
        self.record.file = Some(location.file());
        self.record.line = Some(location.line());
        self
    }

    /// Invoke the builder and return a `Record`
    pub fn build(self) -> Record<'a> {
        self.record
    }
}
