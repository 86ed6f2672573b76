// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input and output status response parsing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::deduplicate_names;

/// Response to `get input status`.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::response::InputStatusResponse;
///
/// let json = r#"{
///     "comhead": "get input status",
///     "name": ["HDMI", "HDMI", "Cable"],
///     "inname": ["HDMI", "HDMI", "Cable"]
/// }"#;
/// let response: InputStatusResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.source_names().unwrap(), ["HDMI", "HDMI_1", "Cable"]);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InputStatusResponse {
    /// Echoed command identifier.
    #[serde(default)]
    comhead: Option<String>,

    /// Display name of each input, in port order.
    #[serde(default, deserialize_with = "lenient")]
    name: Option<Vec<String>>,

    /// Name of each input slot as referenced by `allsource`.
    #[serde(default, deserialize_with = "lenient")]
    inname: Option<Vec<String>>,
}

impl InputStatusResponse {
    /// Returns the echoed command identifier.
    #[must_use]
    pub fn comhead(&self) -> Option<&str> {
        self.comhead.as_deref()
    }

    /// Returns the raw input names as reported.
    #[must_use]
    pub fn raw_names(&self) -> Option<&[String]> {
        self.name.as_deref()
    }

    /// Returns the deduplicated source list.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `name` is absent or empty.
    pub fn source_names(&self) -> Result<Vec<String>, ParseError> {
        non_empty(self.name.as_deref(), "name").map(|names| deduplicate_names(names.to_vec()))
    }

    /// Returns the slot names used to resolve the current source.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `inname` is absent.
    pub fn slot_names(&self) -> Result<&[String], ParseError> {
        self.inname
            .as_deref()
            .ok_or_else(|| ParseError::MissingField("inname".to_string()))
    }
}

/// Response to `get output status`.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::response::OutputStatusResponse;
///
/// let json = r#"{"comhead": "get output status", "name": ["TV", "TV"], "allsource": [1, 2]}"#;
/// let response: OutputStatusResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.device_names().unwrap(), ["TV", "TV_1"]);
/// assert_eq!(response.routed_sources().unwrap(), [Some(1), Some(2)]);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputStatusResponse {
    /// Echoed command identifier.
    #[serde(default)]
    comhead: Option<String>,

    /// Display name of each output, in port order.
    #[serde(default, deserialize_with = "lenient")]
    name: Option<Vec<String>>,

    /// Wire number of the input routed to each output. Entries are kept raw
    /// so that one unrouted output does not hide the others.
    #[serde(default, deserialize_with = "lenient")]
    allsource: Option<Vec<Value>>,
}

impl OutputStatusResponse {
    /// Returns the echoed command identifier.
    #[must_use]
    pub fn comhead(&self) -> Option<&str> {
        self.comhead.as_deref()
    }

    /// Returns the raw output names as reported.
    #[must_use]
    pub fn raw_names(&self) -> Option<&[String]> {
        self.name.as_deref()
    }

    /// Returns the deduplicated device list.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `name` is absent or empty.
    pub fn device_names(&self) -> Result<Vec<String>, ParseError> {
        non_empty(self.name.as_deref(), "name").map(|names| deduplicate_names(names.to_vec()))
    }

    /// Returns the wire number of the input routed to each output.
    ///
    /// An entry that is not a port number (`null`, negative, text) is `None`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `allsource` is absent or not a
    /// list.
    pub fn routed_sources(&self) -> Result<Vec<Option<u32>>, ParseError> {
        self.allsource
            .as_deref()
            .map(|entries| entries.iter().map(port_number).collect())
            .ok_or_else(|| ParseError::MissingField("allsource".to_string()))
    }
}

fn port_number(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Deserializes a field, falling back to `None` when it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn non_empty<'a>(names: Option<&'a [String]>, field: &str) -> Result<&'a [String], ParseError> {
    match names {
        Some(names) if !names.is_empty() => Ok(names),
        _ => Err(ParseError::MissingField(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_names_are_deduplicated() {
        let response: InputStatusResponse =
            serde_json::from_str(r#"{"name": ["A", "B", "A", "A"]}"#).unwrap();
        assert_eq!(response.source_names().unwrap(), ["A", "B", "A_1", "A_2"]);
        assert_eq!(response.raw_names().unwrap(), ["A", "B", "A", "A"]);
    }

    #[test]
    fn empty_or_missing_names_fail() {
        let empty: InputStatusResponse = serde_json::from_str(r#"{"name": []}"#).unwrap();
        assert!(matches!(
            empty.source_names(),
            Err(ParseError::MissingField(ref f)) if f == "name"
        ));

        let missing: OutputStatusResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(missing.device_names(), Err(ParseError::MissingField(_))));
    }

    #[test]
    fn missing_routing_fields() {
        let output: OutputStatusResponse = serde_json::from_str(r#"{"name": ["TV"]}"#).unwrap();
        assert!(matches!(
            output.routed_sources(),
            Err(ParseError::MissingField(ref f)) if f == "allsource"
        ));

        let input: InputStatusResponse = serde_json::from_str(r#"{"name": ["A"]}"#).unwrap();
        assert!(matches!(
            input.slot_names(),
            Err(ParseError::MissingField(ref f)) if f == "inname"
        ));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let output: OutputStatusResponse = serde_json::from_str(
            r#"{"comhead": "get output status", "name": ["TV"], "allsource": [1], "hdcp": [0]}"#,
        )
        .unwrap();
        assert_eq!(output.comhead(), Some("get output status"));
        assert_eq!(output.routed_sources().unwrap(), [Some(1)]);
    }

    #[test]
    fn bad_routing_entries_keep_the_page() {
        let output: OutputStatusResponse = serde_json::from_str(
            r#"{"name": ["TV", "TV", "Projector"], "allsource": [1, null, -1]}"#,
        )
        .unwrap();
        assert_eq!(output.device_names().unwrap(), ["TV", "TV_1", "Projector"]);
        assert_eq!(output.routed_sources().unwrap(), [Some(1), None, None]);
    }

    #[test]
    fn malformed_field_is_missing_alone() {
        let output: OutputStatusResponse =
            serde_json::from_str(r#"{"name": ["TV"], "allsource": "1"}"#).unwrap();
        assert_eq!(output.device_names().unwrap(), ["TV"]);
        assert!(matches!(
            output.routed_sources(),
            Err(ParseError::MissingField(ref f)) if f == "allsource"
        ));

        let input: InputStatusResponse =
            serde_json::from_str(r#"{"name": [1, 2], "inname": ["A", "B"]}"#).unwrap();
        assert!(input.source_names().is_err());
        assert_eq!(input.slot_names().unwrap(), ["A", "B"]);
    }
}
