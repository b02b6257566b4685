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

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::Error;
use crate::ErrorKind;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"level":"INFO","time":"22:44:57","message":"Hello info!"}
/// {"level":"WARN","time":"22:44:57","message":"Hello warn!","attrs":{"retries":3}}
/// {"level":"ERROR","time":"22:44:57","message":"Hello error!","group":"db","pid":"4242"}
/// ```
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RecordLine<'a> {
    pub level: &'a str,
    pub time: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub group: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_attrs")]
    pub attrs: Vec<(&'a str, serde_json::Value)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<&'a str>,
}

// Attributes in position order; a repeated key is written once per attribute.
fn serialize_attrs<S>(attrs: &[(&str, serde_json::Value)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(attrs.len()))?;
    for (key, value) in attrs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl RecordLine<'_> {
    pub(crate) fn format(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = serde_json::to_vec(self).map_err(|err| {
            Error::new(ErrorKind::Encode, "failed to encode record as JSON").with_source(err)
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line<'a>() -> RecordLine<'a> {
        RecordLine {
            level: "INFO",
            time: "10:00:00",
            message: "test",
            group: "",
            attrs: vec![],
            pid: None,
        }
    }

    #[test]
    fn test_minimal_line() {
        let bytes = line().format().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"level\":\"INFO\",\"time\":\"10:00:00\",\"message\":\"test\"}\n"
        );
    }

    #[test]
    fn test_attrs_keep_position_and_duplicates() {
        let record = RecordLine {
            attrs: vec![
                ("k", serde_json::json!("bound")),
                ("a", serde_json::json!(2)),
                ("k", serde_json::json!("call")),
            ],
            ..line()
        };
        assert_eq!(
            String::from_utf8(record.format().unwrap()).unwrap(),
            "{\"level\":\"INFO\",\"time\":\"10:00:00\",\"message\":\"test\",\"attrs\":{\"k\":\"bound\",\"a\":2,\"k\":\"call\"}}\n"
        );
    }

    #[test]
    fn test_full_line() {
        let attrs = vec![("n", serde_json::json!(1))];
        let record = RecordLine {
            group: "db",
            attrs,
            pid: Some("42"),
            ..line()
        };
        assert_eq!(
            String::from_utf8(record.format().unwrap()).unwrap(),
            "{\"level\":\"INFO\",\"time\":\"10:00:00\",\"message\":\"test\",\"group\":\"db\",\"attrs\":{\"n\":1},\"pid\":\"42\"}\n"
        );
    }
}
