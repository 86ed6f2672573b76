// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Video routing command.

use serde_json::{Map, Value};

use crate::command::Command;

/// Command to route one input to one output.
///
/// Both numbers are wire port numbers. The firmware expects the payload as
/// `[source, output]`, source first; swapping them routes the wrong port.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::command::{Command, VideoSwitchCommand};
///
/// let cmd = VideoSwitchCommand::new(3, 1);
/// assert_eq!(cmd.fields()["source"], serde_json::json!([3, 1]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSwitchCommand {
    source: u32,
    output: u32,
}

impl VideoSwitchCommand {
    /// Creates a command routing input `source` to output `output`.
    #[must_use]
    pub const fn new(source: u32, output: u32) -> Self {
        Self { source, output }
    }

    /// Returns the wire number of the input.
    #[must_use]
    pub const fn source(&self) -> u32 {
        self.source
    }

    /// Returns the wire number of the output.
    #[must_use]
    pub const fn output(&self) -> u32 {
        self.output
    }
}

impl Command for VideoSwitchCommand {
    fn comhead(&self) -> &'static str {
        "video switch"
    }

    fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(
            "source".to_string(),
            Value::Array(vec![Value::from(self.source), Value::from(self.output)]),
        );
        fields
    }
}
