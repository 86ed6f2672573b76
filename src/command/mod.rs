// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Matrix command definitions.
//!
//! This module provides typed representations of the instructions understood
//! by the matrix controller's `/cgi-bin/instr` endpoint.
//!
//! # Available Commands
//!
//! | Command Type | `comhead` | Extra fields |
//! |-------------|-----------|--------------|
//! | [`StatusCommand::Status`] | `get status` | - |
//! | [`StatusCommand::VideoStatus`] | `get videostatus` | - |
//! | [`StatusCommand::InputStatus`] | `get input status` | - |
//! | [`StatusCommand::OutputStatus`] | `get output status` | - |
//! | [`PowerCommand`] | `set poweronoff` | `power: 0\|1` |
//! | [`VideoSwitchCommand`] | `video switch` | `source: [source, output]` |
//!
//! # Instruction Structure
//!
//! Every request body is a JSON object carrying the command identifier
//! (`comhead`), a fixed `language` code and the command-specific fields:
//!
//! ```
//! use nohassle_matrix::command::{Command, PowerCommand};
//! use nohassle_matrix::types::PowerState;
//!
//! let instruction = PowerCommand::new(PowerState::On).to_instruction();
//! assert_eq!(
//!     instruction.to_json(),
//!     serde_json::json!({"comhead": "set poweronoff", "language": 0, "power": 1})
//! );
//! ```

mod power;
mod status;
mod switch;

pub use power::PowerCommand;
pub use status::StatusCommand;
pub use switch::VideoSwitchCommand;

use serde::Serialize;
use serde_json::{Map, Value};

/// A command that can be sent to the matrix.
pub trait Command {
    /// Returns the command identifier, sent as `comhead`.
    fn comhead(&self) -> &'static str;

    /// Returns the command-specific fields of the request body.
    fn fields(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Returns true if a response only counts when it echoes this command's
    /// `comhead`.
    ///
    /// A response that carries a *different* `comhead` is always rejected;
    /// this only decides whether a response without one is acceptable.
    fn echo_required(&self) -> bool {
        false
    }

    /// Builds the wire instruction for this command.
    fn to_instruction(&self) -> Instruction {
        Instruction {
            comhead: self.comhead().to_string(),
            language: Instruction::LANGUAGE,
            fields: self.fields(),
            echo_required: self.echo_required(),
        }
    }
}

/// A single request body, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    comhead: String,
    language: u8,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip)]
    echo_required: bool,
}

impl Instruction {
    /// Language code sent with every instruction.
    pub const LANGUAGE: u8 = 0;

    /// Returns the command identifier.
    #[must_use]
    pub fn comhead(&self) -> &str {
        &self.comhead
    }

    /// Returns the command-specific fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns true if responses must echo the command identifier.
    #[must_use]
    pub fn echo_required(&self) -> bool {
        self.echo_required
    }

    /// Serializes the instruction into its JSON body.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("comhead".to_string(), Value::from(self.comhead.as_str()));
        body.insert("language".to_string(), Value::from(self.language));
        body.extend(self.fields.clone());
        Value::Object(body)
    }

    /// Serializes the instruction into the bytes of an HTTP body.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
