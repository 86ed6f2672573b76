// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time snapshots of the matrix.
//!
//! A [`MatrixState`] is built from one poll of the status, output and input
//! pages. It is never updated incrementally: to observe a routing change,
//! take a new snapshot with
//! [`MatrixController::refresh`](crate::MatrixController::refresh).
//!
//! # Examples
//!
//! ```
//! use nohassle_matrix::state::MatrixState;
//! use nohassle_matrix::types::{DeviceIndex, IndexBase, PowerState};
//!
//! let output = serde_json::from_str(r#"{"name": ["TV", "TV"], "allsource": [1, 2]}"#).unwrap();
//! let input = serde_json::from_str(
//!     r#"{"name": ["Blu-ray", "Apple TV"], "inname": ["Blu-ray", "Apple TV"]}"#,
//! )
//! .unwrap();
//!
//! let state = MatrixState::from_parts(Some(PowerState::On), Some(output), Some(input), IndexBase::One);
//! let tv = state.output(DeviceIndex::new(1)).unwrap();
//! assert_eq!(tv.name(), "TV_1");
//! assert_eq!(tv.media_title(state.power()), "Apple TV on TV_1");
//! ```

use crate::response::{InputStatusResponse, OutputStatusResponse, resolve_current_source};
use crate::types::{DeviceIndex, IndexBase, PowerState, SourceIndex};

/// Placeholder shown for values that could not be determined.
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Title shown while the matrix is off.
pub const POWERED_OFF_TEXT: &str = "Powered Off";

/// Snapshot of the whole matrix.
///
/// `None` always means *unknown*: the page could not be fetched or lacked
/// the field. It never stands for "off" or "no ports".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixState {
    power: Option<PowerState>,
    devices: Option<Vec<String>>,
    sources: Option<Vec<String>>,
    outputs: Vec<OutputState>,
}

impl MatrixState {
    /// Builds a snapshot from pages fetched in the same poll.
    #[must_use]
    pub fn from_parts(
        power: Option<PowerState>,
        output: Option<OutputStatusResponse>,
        input: Option<InputStatusResponse>,
        base: IndexBase,
    ) -> Self {
        let devices = output.as_ref().and_then(|o| o.device_names().ok());
        let sources = input.as_ref().and_then(|i| i.source_names().ok());

        let outputs = devices
            .iter()
            .flatten()
            .enumerate()
            .map(|(position, name)| {
                let index = DeviceIndex::new(position);
                let current_source = match (&output, &input) {
                    (Some(o), Some(i)) => resolve_current_source(o, i, index, base).ok(),
                    _ => None,
                };
                OutputState {
                    index,
                    name: name.clone(),
                    current_source,
                }
            })
            .collect();

        Self {
            power,
            devices,
            sources,
            outputs,
        }
    }

    /// Returns the power state, if known.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns whether the matrix is on, if known.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.power.map(|p| p.is_on())
    }

    /// Returns the deduplicated device list, if known.
    #[must_use]
    pub fn devices(&self) -> Option<&[String]> {
        self.devices.as_deref()
    }

    /// Returns the deduplicated source list, if known.
    #[must_use]
    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    /// Returns every output, in device order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputState] {
        &self.outputs
    }

    /// Returns one output.
    #[must_use]
    pub fn output(&self, index: DeviceIndex) -> Option<&OutputState> {
        self.outputs.get(index.position())
    }

    /// Looks up a source by its deduplicated name.
    #[must_use]
    pub fn source_index(&self, name: &str) -> Option<SourceIndex> {
        self.sources
            .as_ref()?
            .iter()
            .position(|s| s == name)
            .map(SourceIndex::new)
    }
}

/// Snapshot of one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputState {
    index: DeviceIndex,
    name: String,
    current_source: Option<String>,
}

impl OutputState {
    /// Returns the position of this output in the device list.
    #[must_use]
    pub fn index(&self) -> DeviceIndex {
        self.index
    }

    /// Returns the deduplicated display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the routed input, if known.
    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        self.current_source.as_deref()
    }

    /// Returns a one-line description of what this output shows.
    ///
    /// `"Powered Off"` while the matrix is off, otherwise
    /// `"<source> on <output>"`, with `"Unknown"` for an unresolved source.
    #[must_use]
    pub fn media_title(&self, power: Option<PowerState>) -> String {
        if power == Some(PowerState::Off) {
            return POWERED_OFF_TEXT.to_string();
        }
        format!(
            "{} on {}",
            self.current_source.as_deref().unwrap_or(UNKNOWN_TEXT),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(json: &str) -> Option<OutputStatusResponse> {
        Some(serde_json::from_str(json).unwrap())
    }

    fn input(json: &str) -> Option<InputStatusResponse> {
        Some(serde_json::from_str(json).unwrap())
    }

    fn full_state() -> MatrixState {
        MatrixState::from_parts(
            Some(PowerState::On),
            output(r#"{"name": ["TV", "TV"], "allsource": [1, 2]}"#),
            input(r#"{"name": ["Blu-ray", "Apple TV"], "inname": ["Blu-ray", "Apple TV"]}"#),
            IndexBase::One,
        )
    }

    #[test]
    fn full_snapshot() {
        let state = full_state();
        assert_eq!(state.is_on(), Some(true));
        assert_eq!(state.devices().unwrap(), ["TV", "TV_1"]);
        assert_eq!(state.sources().unwrap(), ["Blu-ray", "Apple TV"]);
        assert_eq!(state.outputs().len(), 2);
        assert_eq!(
            state.output(DeviceIndex::new(0)).unwrap().current_source(),
            Some("Blu-ray")
        );
        assert_eq!(
            state.output(DeviceIndex::new(1)).unwrap().current_source(),
            Some("Apple TV")
        );
    }

    #[test]
    fn source_lookup_by_name() {
        let state = full_state();
        assert_eq!(state.source_index("Apple TV"), Some(SourceIndex::new(1)));
        assert_eq!(state.source_index("VCR"), None);
    }

    #[test]
    fn missing_input_page_leaves_sources_unknown() {
        let state = MatrixState::from_parts(
            None,
            output(r#"{"name": ["TV"], "allsource": [1]}"#),
            None,
            IndexBase::One,
        );
        assert_eq!(state.power(), None);
        assert_eq!(state.sources(), None);
        assert_eq!(state.devices().unwrap(), ["TV"]);
        assert_eq!(state.outputs()[0].current_source(), None);
    }

    #[test]
    fn missing_output_page_has_no_outputs() {
        let state = MatrixState::from_parts(
            Some(PowerState::Off),
            None,
            input(r#"{"name": ["Blu-ray"], "inname": ["Blu-ray"]}"#),
            IndexBase::One,
        );
        assert_eq!(state.devices(), None);
        assert!(state.outputs().is_empty());
        assert_eq!(state.is_on(), Some(false));
    }

    #[test]
    fn media_title_variants() {
        let state = full_state();
        let tv = state.output(DeviceIndex::new(0)).unwrap();
        assert_eq!(tv.media_title(Some(PowerState::On)), "Blu-ray on TV");
        assert_eq!(tv.media_title(None), "Blu-ray on TV");
        assert_eq!(tv.media_title(Some(PowerState::Off)), "Powered Off");

        let unresolved = OutputState {
            index: DeviceIndex::new(3),
            name: "Projector".to_string(),
            current_source: None,
        };
        assert_eq!(unresolved.media_title(None), "Unknown on Projector");
        assert_eq!(unresolved.index(), DeviceIndex::new(3));
    }
}
