// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! General and video status response parsing.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::types::PowerState;

/// Response to `get status`.
///
/// Only `power` is interpreted; the remaining fields are kept as is.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::response::StatusResponse;
/// use nohassle_matrix::types::PowerState;
///
/// let json = r#"{"comhead": "get status", "power": 1, "mac": "00:11:22:33:44:55"}"#;
/// let response: StatusResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.power_state().unwrap(), PowerState::On);
/// assert_eq!(response.field("mac").unwrap(), "00:11:22:33:44:55");
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StatusResponse {
    /// Echoed command identifier, if the firmware sent one.
    #[serde(default)]
    comhead: Option<String>,

    /// Power flag, `0` or `1`. Some firmware sends it as a string.
    #[serde(default)]
    power: Option<Value>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl StatusResponse {
    /// Returns the echoed command identifier.
    #[must_use]
    pub fn comhead(&self) -> Option<&str> {
        self.comhead.as_deref()
    }

    /// Returns the matrix power state.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `power` is absent and
    /// `ParseError::InvalidValue` if it is neither 0 nor 1.
    pub fn power_state(&self) -> Result<PowerState, ParseError> {
        let invalid = |message: String| ParseError::InvalidValue {
            field: "power".to_string(),
            message,
        };

        match &self.power {
            None | Some(Value::Null) => Err(ParseError::MissingField("power".to_string())),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| invalid(format!("{n} is not an integer")))
                .and_then(|n| PowerState::from_num(n).map_err(|e| invalid(e.to_string()))),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid(format!("{s:?} is not 0 or 1")))
                .and_then(|n| PowerState::from_num(n).map_err(|e| invalid(e.to_string()))),
            Some(other) => Err(invalid(format!("unexpected value {other}"))),
        }
    }

    /// Returns any other field of the response.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// Response to `get videostatus`.
///
/// The video page is passed through untouched; no field of it drives any
/// derived state.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VideoStatusResponse {
    #[serde(default)]
    comhead: Option<String>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl VideoStatusResponse {
    /// Returns the echoed command identifier.
    #[must_use]
    pub fn comhead(&self) -> Option<&str> {
        self.comhead.as_deref()
    }

    /// Returns a field of the response.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns all fields except `comhead`.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
