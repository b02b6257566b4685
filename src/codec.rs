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

//! A JSON snapshot of a handler's configuration.
//!
//! The snapshot holds every option except the sinks and the style and terminal width
//! functions. Bound attributes are stored as `{"kind": ..., "value": ...}` with the value
//! always a string, so their kinds survive the trip:
//!
//! ```json
//! {
//!   "json": false,
//!   "level": "INFO",
//!   "time_format": "%H:%M:%S",
//!   "attrs": {
//!     "service": {"kind": "String", "value": "api"},
//!     "retries": {"kind": "Int64", "value": "3"}
//!   }
//! }
//! ```
//!
//! Attributes are written in binding order. A repeated key is written once per attribute and
//! read back as separate attributes.

use std::fmt;

use jiff::SignedDuration;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::ser::SerializeMap;

use crate::Attr;
use crate::Error;
use crate::ErrorKind;
use crate::Handler;
use crate::Kind;
use crate::Level;
use crate::Value;
use crate::color::LevelColor;
use crate::color::default_style;
use crate::sink::SharedSink;
use crate::term::default_terminal_width;
use crate::time::format_time;
use crate::time::parse_time;

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    json: bool,
    short_levels: bool,
    line_info: bool,
    line_info_verbose: bool,
    pid: bool,
    group_right_justify: bool,
    time_format: String,
    text_output_format: String,
    group_text_output_format: String,
    level: Level,
    color: bool,
    trace_color: String,
    debug_color: String,
    info_color: String,
    warn_color: String,
    error_color: String,
    fatal_color: String,
    group: String,
    group_filter: Vec<String>,
    attrs: StoredAttrs,
}

impl Default for Snapshot {
    fn default() -> Self {
        let handler = Handler::new();
        Snapshot {
            json: handler.json,
            short_levels: handler.short_levels,
            line_info: handler.line_info,
            line_info_verbose: handler.line_info_verbose,
            pid: handler.pid,
            group_right_justify: handler.group_right_justify,
            time_format: handler.time_format,
            text_output_format: handler.text_output_format,
            group_text_output_format: handler.group_text_output_format,
            level: handler.level,
            color: handler.color,
            trace_color: handler.colors.trace,
            debug_color: handler.colors.debug,
            info_color: handler.colors.info,
            warn_color: handler.colors.warn,
            error_color: handler.colors.error,
            fatal_color: handler.colors.fatal,
            group: handler.group,
            group_filter: handler.group_filter,
            attrs: StoredAttrs::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredValue {
    kind: Kind,
    value: String,
}

/// Attributes in binding order, written as a JSON object.
#[derive(Debug, Default)]
struct StoredAttrs(Vec<(String, StoredValue)>);

impl Serialize for StoredAttrs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StoredAttrs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StoredAttrsVisitor;

        impl<'de> de::Visitor<'de> for StoredAttrsVisitor {
            type Value = StoredAttrs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from attribute key to {\"kind\", \"value\"}")
            }

            fn visit_map<A>(self, mut access: A) -> Result<StoredAttrs, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut attrs = Vec::with_capacity(access.size_hint().unwrap_or_default());
                while let Some(entry) = access.next_entry::<String, StoredValue>()? {
                    attrs.push(entry);
                }
                Ok(StoredAttrs(attrs))
            }

            fn visit_unit<E: de::Error>(self) -> Result<StoredAttrs, E> {
                Ok(StoredAttrs::default())
            }
        }

        deserializer.deserialize_any(StoredAttrsVisitor)
    }
}

impl Handler {
    /// Encode the configuration of this handler as a JSON snapshot.
    ///
    /// The sinks, the style function and the terminal width function are not included. Time
    /// attributes are written with the handler's time format.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use slogforth::Attr;
    /// use slogforth::Handler;
    /// use slogforth::sink::Buffer;
    /// use slogforth::sink::SharedSink;
    ///
    /// let handler = Handler::builder().json().build().with_attrs([Attr::new("retries", 3)]);
    /// let snapshot = handler.to_json().unwrap();
    ///
    /// let sink: SharedSink = Arc::new(Buffer::default());
    /// let restored = Handler::from_json(&snapshot, vec![sink.clone()], vec![sink]).unwrap();
    /// assert_eq!(restored.attrs(), handler.attrs());
    /// ```
    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        let attrs = self
            .attrs
            .iter()
            .map(|attr| -> Result<_, Error> {
                let value = encode_value(attr.value(), &self.time_format)?;
                Ok((attr.key().to_string(), value))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let snapshot = Snapshot {
            json: self.json,
            short_levels: self.short_levels,
            line_info: self.line_info,
            line_info_verbose: self.line_info_verbose,
            pid: self.pid,
            group_right_justify: self.group_right_justify,
            time_format: self.time_format.clone(),
            text_output_format: self.text_output_format.clone(),
            group_text_output_format: self.group_text_output_format.clone(),
            level: self.level,
            color: self.color,
            trace_color: self.colors.trace.clone(),
            debug_color: self.colors.debug.clone(),
            info_color: self.colors.info.clone(),
            warn_color: self.colors.warn.clone(),
            error_color: self.colors.error.clone(),
            fatal_color: self.colors.fatal.clone(),
            group: self.group.clone(),
            group_filter: self.group_filter.clone(),
            attrs: StoredAttrs(attrs),
        };

        serde_json::to_vec(&snapshot).map_err(|err| {
            Error::new(ErrorKind::Encode, "failed to encode handler snapshot").with_source(err)
        })
    }

    /// Rebuild a handler from a snapshot made by [`to_json`](Handler::to_json).
    ///
    /// The given sinks become the normal and error sinks; each list must hold at least one
    /// sink. Options missing from the snapshot take their default values.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Decode`] error if the snapshot is not a valid JSON object of
    /// the expected shape or names an unknown attribute kind, and an [`ErrorKind::Convert`]
    /// error if a stored attribute value cannot be read back as its kind. Returns an
    /// [`ErrorKind::Decode`] error if either sink list is empty.
    pub fn from_json(
        bytes: &[u8],
        stdout: impl IntoIterator<Item = SharedSink>,
        stderr: impl IntoIterator<Item = SharedSink>,
    ) -> Result<Handler, Error> {
        let snapshot: Snapshot = serde_json::from_slice(bytes).map_err(|err| {
            Error::new(ErrorKind::Decode, "failed to decode handler snapshot").with_source(err)
        })?;

        let attrs = snapshot
            .attrs
            .0
            .into_iter()
            .map(|(key, stored)| -> Result<_, Error> {
                let value = decode_value(&stored, &snapshot.time_format)
                    .map_err(|err| err.with_context("key", &key))?;
                Ok(Attr::new(key, value))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let stdout = stdout.into_iter().collect::<Vec<_>>();
        let stderr = stderr.into_iter().collect::<Vec<_>>();
        for (name, sinks) in [("stdout", &stdout), ("stderr", &stderr)] {
            if sinks.is_empty() {
                return Err(Error::new(ErrorKind::Decode, "sink list is empty")
                    .with_context("sinks", name));
            }
        }

        Ok(Handler {
            json: snapshot.json,
            stdout,
            stderr,
            time_format: snapshot.time_format,
            text_output_format: snapshot.text_output_format,
            group_text_output_format: snapshot.group_text_output_format,
            level: snapshot.level,
            color: snapshot.color,
            colors: LevelColor {
                trace: snapshot.trace_color,
                debug: snapshot.debug_color,
                info: snapshot.info_color,
                warn: snapshot.warn_color,
                error: snapshot.error_color,
                fatal: snapshot.fatal_color,
            },
            short_levels: snapshot.short_levels,
            pid: snapshot.pid,
            line_info: snapshot.line_info,
            line_info_verbose: snapshot.line_info_verbose,
            group_right_justify: snapshot.group_right_justify,
            group: snapshot.group,
            group_filter: snapshot.group_filter,
            attrs,
            style: default_style,
            terminal_width: default_terminal_width,
        })
    }
}

fn encode_value(value: &Value, time_format: &str) -> Result<StoredValue, Error> {
    let encoded = match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Int64(n) => n.to_string(),
        Value::Uint64(n) => n.to_string(),
        Value::Float64(n) => n.to_string(),
        Value::Duration(d) => d.to_string(),
        Value::Time(t) => format_time(t, time_format)?,
        Value::Any(v) => v.to_string(),
    };
    Ok(StoredValue {
        kind: value.kind(),
        value: encoded,
    })
}

fn decode_value(stored: &StoredValue, time_format: &str) -> Result<Value, Error> {
    let raw = stored.value.as_str();
    Ok(match stored.kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Bool => Value::Bool(raw == "true"),
        Kind::Int64 => Value::Int64(raw.parse().map_err(|err| convert_error(stored, err))?),
        Kind::Uint64 => Value::Uint64(raw.parse().map_err(|err| convert_error(stored, err))?),
        Kind::Float64 => Value::Float64(raw.parse().map_err(|err| convert_error(stored, err))?),
        Kind::Duration => Value::Duration(
            raw.parse::<SignedDuration>()
                .map_err(|err| convert_error(stored, err))?,
        ),
        Kind::Time => Value::Time(parse_time(raw, time_format)?),
        Kind::Any => match serde_json::from_str(raw) {
            Ok(v) => Value::Any(v),
            Err(_) => Value::Any(serde_json::Value::String(raw.to_string())),
        },
    })
}

fn convert_error(stored: &StoredValue, err: impl Into<anyhow::Error>) -> Error {
    Error::new(ErrorKind::Convert, "stored value does not match its kind")
        .with_context("kind", format!("{:?}", stored.kind))
        .with_context("value", &stored.value)
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(kind: Kind, value: &str) -> Result<Value, Error> {
        let stored = StoredValue {
            kind,
            value: value.to_string(),
        };
        decode_value(&stored, "%H:%M:%S")
    }

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode(Kind::String, "x").unwrap(), Value::from("x"));
        assert_eq!(decode(Kind::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(decode(Kind::Bool, "yes").unwrap(), Value::Bool(false));
        assert_eq!(decode(Kind::Int64, "-3").unwrap(), Value::Int64(-3));
        assert_eq!(
            decode(Kind::Uint64, "18446744073709551615").unwrap(),
            Value::Uint64(u64::MAX)
        );
        assert_eq!(decode(Kind::Float64, "2.5").unwrap(), Value::Float64(2.5));
    }

    #[test]
    fn test_decode_any_falls_back_to_string() {
        assert_eq!(
            decode(Kind::Any, "[1,2]").unwrap(),
            Value::Any(serde_json::json!([1, 2]))
        );
        assert_eq!(
            decode(Kind::Any, "not json").unwrap(),
            Value::Any(serde_json::json!("not json"))
        );
    }

    #[test]
    fn test_decode_mismatch() {
        let err = decode(Kind::Float64, "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convert);
        assert_eq!(err.context("value"), Some("abc"));

        assert_eq!(decode(Kind::Int64, "1.5").unwrap_err().kind(), ErrorKind::Convert);
        assert_eq!(decode(Kind::Uint64, "-1").unwrap_err().kind(), ErrorKind::Convert);
        assert_eq!(decode(Kind::Duration, "soon").unwrap_err().kind(), ErrorKind::Convert);
        assert_eq!(decode(Kind::Time, "noon").unwrap_err().kind(), ErrorKind::Convert);
    }

    #[test]
    fn test_duration_round_trip() {
        let value = Value::from(SignedDuration::from_millis(-1500));
        let stored = encode_value(&value, "%H").unwrap();
        assert_eq!(stored.kind, Kind::Duration);
        assert_eq!(decode_value(&stored, "%H").unwrap(), value);
    }

    #[test]
    fn test_attrs_keep_order_and_duplicates() {
        let json = r#"{"b":{"kind":"Int64","value":"1"},"a":{"kind":"String","value":"x"},"b":{"kind":"Bool","value":"true"}}"#;
        let attrs: StoredAttrs = serde_json::from_str(json).unwrap();
        let keys = attrs.0.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["b", "a", "b"]);
        assert_eq!(serde_json::to_string(&attrs).unwrap(), json);
    }

    #[test]
    fn test_unknown_kind() {
        let json = br#"{"attrs":{"a":{"kind":"Complex128","value":"1"}}}"#;
        let err = Handler::from_json(json, sinks(), sinks()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    fn sinks() -> Vec<SharedSink> {
        vec![std::sync::Arc::new(crate::sink::Buffer::default())]
    }

    #[test]
    fn test_missing_options_take_defaults() {
        let handler = Handler::from_json(br#"{"json":true}"#, sinks(), sinks()).unwrap();
        assert!(handler.json);
        assert_eq!(handler.level, Level::INFO);
        assert_eq!(handler.time_format, "%H:%M:%S");
        assert_eq!(handler.colors, LevelColor::default());
    }

    #[test]
    fn test_structurally_invalid() {
        for bytes in [&b"\"x\""[..], b"{", b"{\"level\":true}", b"{\"attrs\":{\"a\":1}}"] {
            let err = Handler::from_json(bytes, sinks(), sinks()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "{}", String::from_utf8_lossy(bytes));
        }
    }

    #[test]
    fn test_sink_lists_must_not_be_empty() {
        let snapshot = Handler::new().to_json().unwrap();

        let err = Handler::from_json(&snapshot, Vec::new(), sinks()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.context("sinks"), Some("stdout"));

        let err = Handler::from_json(&snapshot, sinks(), Vec::new()).unwrap_err();
        assert_eq!(err.context("sinks"), Some("stderr"));

        assert!(Handler::from_json(&snapshot, sinks(), sinks()).is_ok());
    }
}
