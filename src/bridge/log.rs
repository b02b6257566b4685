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

//! Bridge from the [`log`] crate facade.

use std::borrow::Cow;
use std::io::Write;

use crate::Attr;
use crate::Handler;
use crate::Level;
use crate::Record;
use crate::Value;

impl Handler {
    /// Install this handler as the [`log`] crate global logger.
    ///
    /// The global maximum level is set to the most verbose [`log::LevelFilter`] that this
    /// handler renders.
    ///
    /// # Errors
    ///
    /// Return an error if the log crate global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use slogforth::Handler;
    /// use slogforth::Level;
    ///
    /// Handler::builder().level(Level::DEBUG).build().apply().unwrap();
    /// log::debug!(attempt = 1; "connecting");
    /// ```
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = max_level(self.level);
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn max_level(level: Level) -> log::LevelFilter {
    if level <= Level::TRACE {
        log::LevelFilter::Trace
    } else if level <= Level::DEBUG {
        log::LevelFilter::Debug
    } else if level <= Level::INFO {
        log::LevelFilter::Info
    } else if level <= Level::WARN {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Error
    }
}

impl log::Log for Handler {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Handler::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !Handler::enabled(self, level) {
            return;
        }

        let args = record.args();
        let message = match args.as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(args.to_string()),
        };

        // key-values
        struct AttrVisitor {
            attrs: Vec<Attr>,
        }

        impl<'kvs> log::kv::VisitSource<'kvs> for AttrVisitor {
            fn visit_pair(
                &mut self,
                key: log::kv::Key<'kvs>,
                value: log::kv::Value<'kvs>,
            ) -> Result<(), log::kv::Error> {
                self.attrs.push(Attr::new(key.as_str(), convert_value(&value)));
                Ok(())
            }
        }

        let mut visitor = AttrVisitor { attrs: vec![] };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            handle_error(record, anyhow::Error::new(err));
            return;
        }

        let record_to_handle = Record::builder()
            .level(level)
            .message(message)
            .attrs(visitor.attrs)
            .module_path(record.module_path())
            .file(record.file())
            .line(record.line())
            .build();

        if let Err(err) = self.handle(&record_to_handle) {
            handle_error(record, anyhow::Error::new(err));
        }
    }

    fn flush(&self) {
        if let Err(err) = Handler::flush(self) {
            let _ = writeln!(std::io::stderr(), "Error flushing sinks: {err}");
        }
    }
}

fn convert_value(value: &log::kv::Value) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(n) = value.to_i64() {
        Value::Int64(n)
    } else if let Some(n) = value.to_u64() {
        Value::Uint64(n)
    } else if let Some(n) = value.to_f64() {
        Value::Float64(n)
    } else if let Some(s) = value.to_borrowed_str() {
        Value::String(s.to_string())
    } else {
        Value::from_display(value)
    }
}

fn handle_error(record: &log::Record, error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}
