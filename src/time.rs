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

//! Formatting and parsing of timestamps with `strftime`-style patterns.

use jiff::Zoned;
use jiff::civil::Date;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;

/// The default time format: wall clock time with second precision.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Format a zoned timestamp with the given `strftime` pattern.
pub(crate) fn format_time(time: &Zoned, format: &str) -> Result<String, Error> {
    strtime::format(format, time).map_err(|err| {
        Error::new(ErrorKind::Format, "failed to format time")
            .with_context("time_format", format)
            .with_source(err)
    })
}

/// Parse a timestamp previously rendered with [`format_time`].
///
/// Patterns without a date fall back to `0000-01-01`; patterns without an offset or time zone,
/// including Unix timestamps, are read as UTC.
pub(crate) fn parse_time(input: &str, format: &str) -> Result<Zoned, Error> {
    let convert_error = |err: jiff::Error| {
        Error::new(ErrorKind::Convert, "time does not match the time format")
            .with_context("time_format", format)
            .with_context("value", input)
            .with_source(err)
    };

    let tm = strtime::parse(format, input).map_err(convert_error)?;
    if tm.offset().is_none() && tm.iana_time_zone().is_none() {
        // e.g. `%s`: an instant without a zone
        if let Ok(timestamp) = tm.to_timestamp() {
            return Ok(timestamp.to_zoned(TimeZone::UTC));
        }
    }
    if let Ok(zoned) = tm.to_zoned() {
        return Ok(zoned);
    }

    let date = match tm.to_date() {
        Ok(date) => date,
        Err(_) => Date::new(0, 1, 1).map_err(convert_error)?,
    };
    let time = tm.to_time().map_err(convert_error)?;
    let tz = match tm.offset() {
        Some(offset) => TimeZone::fixed(offset),
        None => TimeZone::UTC,
    };
    date.to_datetime(time).to_zoned(tz).map_err(convert_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Zoned {
        "2024-08-11T22:44:57+08:00[+08:00]"
            .parse::<Zoned>()
            .unwrap()
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_time(&sample(), DEFAULT_TIME_FORMAT).unwrap(), "22:44:57");
    }

    #[test]
    fn test_format_malformed() {
        let err = format_time(&sample(), "%H:%").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.context("time_format"), Some("%H:%"));
    }

    #[test]
    fn test_parse_with_offset() {
        let format = "%Y-%m-%dT%H:%M:%S%:z";
        let rendered = format_time(&sample(), format).unwrap();
        let parsed = parse_time(&rendered, format).unwrap();
        assert_eq!(parsed.timestamp(), sample().timestamp());
    }

    #[test]
    fn test_parse_clock_only() {
        let parsed = parse_time("22:44:57", DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!(parsed.year(), 0);
        assert_eq!(parsed.hour(), 22);
        assert_eq!(parsed.time_zone(), &TimeZone::UTC);
    }

    #[test]
    fn test_parse_unix_timestamp() {
        let rendered = format_time(&sample(), "%s").unwrap();
        let parsed = parse_time(&rendered, "%s").unwrap();
        assert_eq!(parsed.timestamp(), sample().timestamp());
        assert_eq!(parsed.time_zone(), &TimeZone::UTC);
    }

    #[test]
    fn test_parse_mismatch() {
        let err = parse_time("yesterday", DEFAULT_TIME_FORMAT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convert);
    }
}
