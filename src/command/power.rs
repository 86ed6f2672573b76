// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power control command.

use serde_json::{Map, Value};

use crate::command::Command;
use crate::types::PowerState;

/// Command to switch the whole matrix on or off.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::command::{Command, PowerCommand};
///
/// let cmd = PowerCommand::on();
/// assert_eq!(cmd.comhead(), "set poweronoff");
/// assert_eq!(cmd.fields()["power"], 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommand {
    state: PowerState,
}

impl PowerCommand {
    /// Creates a command setting the given state.
    #[must_use]
    pub const fn new(state: PowerState) -> Self {
        Self { state }
    }

    /// Creates a command to power the matrix on.
    #[must_use]
    pub const fn on() -> Self {
        Self::new(PowerState::On)
    }

    /// Creates a command to power the matrix off.
    #[must_use]
    pub const fn off() -> Self {
        Self::new(PowerState::Off)
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }
}

impl Command for PowerCommand {
    fn comhead(&self) -> &'static str {
        "set poweronoff"
    }

    fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("power".to_string(), Value::from(self.state.as_num()));
        fields
    }
}
