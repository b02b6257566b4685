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

//! The module for typed key-value attributes.

use std::fmt;

use jiff::SignedDuration;
use jiff::Zoned;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::ErrorKind;
use crate::time::format_time;

/// The kind of an attribute [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// A UTF-8 string.
    String,
    /// A boolean.
    Bool,
    /// A signed 64-bit integer.
    Int64,
    /// An unsigned 64-bit integer.
    Uint64,
    /// A 64-bit float.
    Float64,
    /// A signed duration.
    Duration,
    /// A zoned timestamp.
    Time,
    /// An opaque JSON payload.
    Any,
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A UTF-8 string.
    String(String),
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int64(i64),
    /// An unsigned 64-bit integer.
    Uint64(u64),
    /// A 64-bit float.
    Float64(f64),
    /// A signed duration.
    Duration(SignedDuration),
    /// A zoned timestamp.
    Time(Zoned),
    /// An opaque JSON payload. A string payload renders unquoted in text output.
    Any(serde_json::Value),
}

impl Value {
    /// Return the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Bool,
            Value::Int64(_) => Kind::Int64,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::Duration(_) => Kind::Duration,
            Value::Time(_) => Kind::Time,
            Value::Any(_) => Kind::Any,
        }
    }

    /// Create an opaque value from anything that can be displayed, such as an error.
    pub fn from_display(value: impl fmt::Display) -> Value {
        Value::Any(serde_json::Value::String(value.to_string()))
    }

    /// Render the value for text output. Times use the given time format.
    pub(crate) fn to_text(&self, time_format: &str) -> Result<String, Error> {
        match self {
            Value::Time(time) => format_time(time, time_format),
            Value::Any(serde_json::Value::String(s)) => Ok(s.clone()),
            value => Ok(value.to_string()),
        }
    }

    /// Convert the value to a native JSON value. Times use the given time format.
    pub(crate) fn to_json(&self, time_format: &str) -> Result<serde_json::Value, Error> {
        Ok(match self {
            Value::String(s) => serde_json::Value::from(s.as_str()),
            Value::Bool(b) => serde_json::Value::from(*b),
            Value::Int64(n) => serde_json::Value::from(*n),
            Value::Uint64(n) => serde_json::Value::from(*n),
            Value::Float64(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    Error::new(ErrorKind::Encode, "float is not representable in JSON")
                        .with_context("value", n)
                })?,
            Value::Duration(d) => serde_json::Value::from(d.to_string()),
            Value::Time(time) => serde_json::Value::from(format_time(time, time_format)?),
            Value::Any(v) => v.clone(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Uint64(n) => write!(f, "{n}"),
            Value::Float64(n) => write!(f, "{n}"),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::Any(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Uint64(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Uint64(value as u64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float64(value.into())
    }
}

impl From<SignedDuration> for Value {
    fn from(value: SignedDuration) -> Self {
        Value::Duration(value)
    }
}

impl From<Zoned> for Value {
    fn from(value: Zoned) -> Self {
        Value::Time(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Any(value)
    }
}

/// A key-value attribute.
///
/// # Examples
///
/// ```
/// use slogforth::Attr;
///
/// let attr = Attr::new("retries", 3);
/// assert_eq!(attr.to_string(), "retries=3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: Value,
}

impl Attr {
    /// Create a new attribute.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Gets the key string.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Gets the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Render the attribute as `key=value` for text output.
    pub(crate) fn to_text(&self, time_format: &str) -> Result<String, Error> {
        Ok(format!("{}={}", self.key, self.value.to_text(time_format)?))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Attr
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
