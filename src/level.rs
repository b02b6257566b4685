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

//! Severity levels.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::Error;
use crate::ErrorKind;

/// The severity of a log record.
///
/// A level is a signed integer; larger is more severe. Six anchors carry display names:
///
/// | Level   | Value | Long    | Short |
/// |---------|-------|---------|-------|
/// | `TRACE` | -6    | `TRACE` | `TRC` |
/// | `DEBUG` | -4    | `DEBUG` | `DBG` |
/// | `INFO`  | 0     | `INFO`  | `INF` |
/// | `WARN`  | 4     | `WARN`  | `WRN` |
/// | `ERROR` | 8     | `ERROR` | `ERR` |
/// | `FATAL` | 10    | `FATAL` | `FTL` |
///
/// Any other value is legal and is displayed relative to the nearest anchor below it, e.g.
/// `INFO+2` or `TRACE-1`.
///
/// # Examples
///
/// ```
/// use slogforth::Level;
///
/// assert!(Level::TRACE < Level::DEBUG);
/// assert_eq!(Level::new(2).to_string(), "INFO+2");
/// assert_eq!(Level::FATAL.short_name(), "FTL");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

const ANCHORS: [(Level, &str, &str); 6] = [
    (Level::TRACE, "TRACE", "TRC"),
    (Level::DEBUG, "DEBUG", "DBG"),
    (Level::INFO, "INFO", "INF"),
    (Level::WARN, "WARN", "WRN"),
    (Level::ERROR, "ERROR", "ERR"),
    (Level::FATAL, "FATAL", "FTL"),
];

impl Level {
    /// Designates very low priority, often extremely verbose, information.
    pub const TRACE: Level = Level(Level::DEBUG.0 - 2);
    /// Designates lower priority information.
    pub const DEBUG: Level = Level(-4);
    /// Designates useful information.
    pub const INFO: Level = Level(0);
    /// Designates hazardous situations.
    pub const WARN: Level = Level(4);
    /// Designates very serious errors.
    pub const ERROR: Level = Level(8);
    /// Designates errors the process cannot recover from.
    pub const FATAL: Level = Level(Level::ERROR.0 + 2);

    /// Create a level from its integer value.
    pub const fn new(value: i32) -> Level {
        Level(value)
    }

    /// Return the integer value of the level.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Return the nearest anchor level at or below this level.
    ///
    /// Levels below [`Level::TRACE`] are anchored to it.
    pub fn anchor(self) -> Level {
        ANCHORS
            .iter()
            .rev()
            .find(|(anchor, _, _)| *anchor <= self)
            .map(|(anchor, _, _)| *anchor)
            .unwrap_or(Level::TRACE)
    }

    /// Return the long display name, e.g. `INFO` or `WARN+1`.
    pub fn name(self) -> Cow<'static, str> {
        self.display_name(false)
    }

    /// Return the short display name, e.g. `INF` or `WRN+1`.
    pub fn short_name(self) -> Cow<'static, str> {
        self.display_name(true)
    }

    /// Return the display name in its long or short form.
    pub fn display_name(self, short: bool) -> Cow<'static, str> {
        let anchor = self.anchor();
        let (_, long, abbr) = ANCHORS
            .iter()
            .find(|(level, _, _)| *level == anchor)
            .copied()
            .unwrap_or(ANCHORS[0]);
        let base = if short { abbr } else { long };

        let offset = self.0 - anchor.0;
        if offset == 0 {
            Cow::Borrowed(base)
        } else {
            Cow::Owned(format!("{base}{offset:+}"))
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(value)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        let malformed = || {
            Error::new(ErrorKind::Convert, "malformed level").with_context("level", s)
        };

        let s = s.trim();
        if let Ok(value) = s.parse::<i32>() {
            return Ok(Level(value));
        }

        let (name, offset) = match s.find(['+', '-']) {
            Some(pos) => {
                let offset = s[pos..].parse::<i32>().map_err(|err| malformed().with_source(err))?;
                (&s[..pos], offset)
            }
            None => (s, 0),
        };

        for (level, long, short) in ANCHORS {
            if name.eq_ignore_ascii_case(long) || name.eq_ignore_ascii_case(short) {
                return level
                    .0
                    .checked_add(offset)
                    .map(Level)
                    .ok_or_else(malformed);
            }
        }

        Err(malformed())
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LevelVisitor;

        impl de::Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a level name such as \"INFO\" or \"DEBUG-2\", or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Level, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Level, E> {
                i32::try_from(v).map(Level).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Level, E> {
                i32::try_from(v).map(Level).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

#[cfg(feature = "bridge-log")]
impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARN,
            log::Level::Info => Level::INFO,
            log::Level::Debug => Level::DEBUG,
            log::Level::Trace => Level::TRACE,
        }
    }
}
