// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the matrix library.
//!
//! Every device-side problem surfaces as one of these values instead of a
//! panic. Callers should read any `Err` from a query as "this value is
//! currently unknown", never as "off" or "empty".

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during a single request/response exchange.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while interpreting a structurally valid response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Every attempt to deliver an instruction failed.
    #[error("'{command}' failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// The command identifier that was sent.
        command: String,
        /// How many attempts were made.
        attempts: u32,
        /// The failure of the final attempt.
        #[source]
        last: ProtocolError,
    },
}

impl Error {
    /// Returns true if the device could not be reached or never answered
    /// with a matching response.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. } | Self::Protocol(_))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An index does not address an entry of the list it refers to.
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the list being indexed.
        len: usize,
    },

    /// An invalid power state value was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An index base other than 0 or 1 was requested.
    #[error("invalid index base {0}, expected 0 or 1")]
    InvalidIndexBase(u8),
}

/// Errors raised by one request/response exchange with the matrix.
///
/// All of these count as a failed attempt and are retried.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device answered with a status other than 200.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The response body was not a JSON object.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The response echoed a different command than the one sent.
    #[error("expected response to '{expected}', got {actual:?}")]
    CommandMismatch {
        /// The command identifier that was sent.
        expected: String,
        /// The identifier found in the response, if any.
        actual: Option<String>,
    },
}

/// Errors related to interpreting matrix responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON did not match the expected response shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing (or empty) in the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field is present but holds an unusable value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
