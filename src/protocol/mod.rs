// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for instructions sent to the matrix.
//!
//! A [`Protocol`] performs exactly one request/response exchange. Retrying,
//! response validation and interpretation live in
//! [`MatrixController`](crate::MatrixController), so every transport gets the
//! same behavior.
//!
//! # Protocols
//!
//! - [`HttpClient`]: JSON over HTTP POST to `/cgi-bin/instr`

#[cfg(feature = "http")]
mod http;
mod retry;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};
pub use retry::RetryPolicy;

use serde_json::Value;

use crate::command::Instruction;
use crate::error::{ParseError, ProtocolError};

/// Response to one instruction.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw JSON response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Checks that this response is a JSON object answering `instruction`.
    ///
    /// A `comhead` that differs from the instruction's is always rejected.
    /// A missing `comhead` is rejected only when the instruction requires
    /// an echo.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidBody` if the body is not a JSON object
    /// and `ProtocolError::CommandMismatch` if the echo check fails.
    pub fn verify(&self, instruction: &Instruction) -> Result<(), ProtocolError> {
        let value: Value = serde_json::from_str(&self.body)
            .map_err(|e| ProtocolError::InvalidBody(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ProtocolError::InvalidBody(
                "expected a JSON object".to_string(),
            ));
        };

        match fields.get("comhead") {
            Some(Value::String(comhead)) if comhead == instruction.comhead() => Ok(()),
            None if !instruction.echo_required() => Ok(()),
            other => Err(ProtocolError::CommandMismatch {
                expected: instruction.comhead().to_string(),
                actual: other.map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string)),
            }),
        }
    }
}

/// Trait for transports that can deliver instructions to the matrix.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Sends one instruction and returns the raw response.
    ///
    /// Implementations must not retry; a failure is reported as is.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails or the device answers
    /// with a non-success status.
    async fn send_instruction(
        &self,
        instruction: &Instruction,
    ) -> Result<CommandResponse, ProtocolError>;
}
