// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status query commands.

use crate::command::Command;

/// Command to query one of the matrix status pages.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::command::{Command, StatusCommand};
///
/// assert_eq!(StatusCommand::OutputStatus.comhead(), "get output status");
/// assert!(StatusCommand::OutputStatus.echo_required());
/// assert!(!StatusCommand::Status.echo_required());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCommand {
    /// General status, including power.
    Status,
    /// Video-layer status.
    VideoStatus,
    /// Input names and the name routed to each output.
    InputStatus,
    /// Output names and the input routed to each output.
    OutputStatus,
}

impl StatusCommand {
    /// Returns all status commands for iteration.
    #[must_use]
    pub const fn all_types() -> &'static [Self] {
        &[
            Self::Status,
            Self::VideoStatus,
            Self::InputStatus,
            Self::OutputStatus,
        ]
    }
}

impl Command for StatusCommand {
    fn comhead(&self) -> &'static str {
        match self {
            Self::Status => "get status",
            Self::VideoStatus => "get videostatus",
            Self::InputStatus => "get input status",
            Self::OutputStatus => "get output status",
        }
    }

    // The port pages are the ones the firmware has been seen to mix up.
    fn echo_required(&self) -> bool {
        matches!(self, Self::InputStatus | Self::OutputStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comheads() {
        assert_eq!(StatusCommand::Status.comhead(), "get status");
        assert_eq!(StatusCommand::VideoStatus.comhead(), "get videostatus");
        assert_eq!(StatusCommand::InputStatus.comhead(), "get input status");
        assert_eq!(StatusCommand::OutputStatus.comhead(), "get output status");
    }

    #[test]
    fn status_queries_have_no_fields() {
        for cmd in StatusCommand::all_types() {
            assert!(cmd.fields().is_empty());
        }
    }

    #[test]
    fn only_port_pages_require_echo() {
        let strict: Vec<_> = StatusCommand::all_types()
            .iter()
            .filter(|cmd| cmd.echo_required())
            .collect();
        assert_eq!(
            strict,
            [&StatusCommand::InputStatus, &StatusCommand::OutputStatus]
        );
    }
}
