// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Current-source resolution.
//!
//! The output page says *which* input slot feeds an output (`allsource`),
//! the input page says what that slot is *called* (`inname`). The two pages
//! must come from the same poll for the answer to mean anything.

use crate::error::{Error, ParseError, ValueError};
use crate::response::{InputStatusResponse, OutputStatusResponse};
use crate::types::{DeviceIndex, IndexBase};

/// Resolves the display name of the input currently routed to `device`.
///
/// # Errors
///
/// Returns an error, never a fallback name, when:
/// - `allsource` or `inname` is missing (`Error::Parse`)
/// - `device` has no `allsource` entry (`Error::Value`)
/// - the `allsource` entry for `device` is not a port number, or lies below
///   the index base (`Error::Parse`)
/// - the routed slot has no `inname` entry (`Error::Value`)
///
/// # Examples
///
/// ```
/// use nohassle_matrix::response::{
///     resolve_current_source, InputStatusResponse, OutputStatusResponse,
/// };
/// use nohassle_matrix::types::{DeviceIndex, IndexBase};
///
/// let output: OutputStatusResponse =
///     serde_json::from_str(r#"{"name": ["TV", "TV"], "allsource": [1, 2]}"#).unwrap();
/// let input: InputStatusResponse = serde_json::from_str(
///     r#"{"name": ["Blu-ray", "Apple TV"], "inname": ["Blu-ray", "Apple TV"]}"#,
/// )
/// .unwrap();
///
/// let source = resolve_current_source(&output, &input, DeviceIndex::new(1), IndexBase::One);
/// assert_eq!(source.unwrap(), "Apple TV");
/// ```
pub fn resolve_current_source(
    output: &OutputStatusResponse,
    input: &InputStatusResponse,
    device: DeviceIndex,
    base: IndexBase,
) -> Result<String, Error> {
    let routed = output.routed_sources()?;
    let wire_slot = routed
        .get(device.position())
        .copied()
        .ok_or(ValueError::IndexOutOfRange {
            index: device.position(),
            len: routed.len(),
        })?
        .ok_or_else(|| ParseError::InvalidValue {
            field: "allsource".to_string(),
            message: format!("output {device} has no routed input"),
        })?;

    let slot = base
        .from_wire(wire_slot)
        .ok_or_else(|| ParseError::InvalidValue {
            field: "allsource".to_string(),
            message: format!("slot {wire_slot} is not a valid {base} input"),
        })?;

    let names = input.slot_names()?;
    names.get(slot).cloned().ok_or_else(|| {
        ValueError::IndexOutOfRange {
            index: slot,
            len: names.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(json: &str) -> OutputStatusResponse {
        serde_json::from_str(json).unwrap()
    }

    fn input(json: &str) -> InputStatusResponse {
        serde_json::from_str(json).unwrap()
    }

    fn scenario() -> (OutputStatusResponse, InputStatusResponse) {
        (
            output(r#"{"name": ["TV", "TV"], "allsource": [1, 2]}"#),
            input(r#"{"name": ["Blu-ray", "Apple TV"], "inname": ["Blu-ray", "Apple TV"]}"#),
        )
    }

    #[test]
    fn one_based_slots() {
        let (out, inp) = scenario();
        let resolve = |d| resolve_current_source(&out, &inp, DeviceIndex::new(d), IndexBase::One);
        assert_eq!(resolve(0).unwrap(), "Blu-ray");
        assert_eq!(resolve(1).unwrap(), "Apple TV");
    }

    #[test]
    fn zero_based_slots() {
        let out = output(r#"{"allsource": [1, 0]}"#);
        let inp = input(r#"{"inname": ["Blu-ray", "Apple TV"]}"#);
        let resolve = |d| resolve_current_source(&out, &inp, DeviceIndex::new(d), IndexBase::Zero);
        assert_eq!(resolve(0).unwrap(), "Apple TV");
        assert_eq!(resolve(1).unwrap(), "Blu-ray");
    }

    #[test]
    fn device_out_of_range() {
        let (out, inp) = scenario();
        let err = resolve_current_source(&out, &inp, DeviceIndex::new(2), IndexBase::One)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn slot_out_of_range() {
        let out = output(r#"{"allsource": [3]}"#);
        let inp = input(r#"{"inname": ["Blu-ray", "Apple TV"]}"#);
        let err = resolve_current_source(&out, &inp, DeviceIndex::new(0), IndexBase::One)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn unrouted_slot_under_one_based() {
        let out = output(r#"{"allsource": [0]}"#);
        let inp = input(r#"{"inname": ["Blu-ray"]}"#);
        let err = resolve_current_source(&out, &inp, DeviceIndex::new(0), IndexBase::One)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn bad_entry_only_affects_its_device() {
        let out = output(r#"{"name": ["TV", "TV", "Projector"], "allsource": [2, null, -1]}"#);
        let inp = input(r#"{"inname": ["Blu-ray", "Apple TV"]}"#);
        let resolve = |d| resolve_current_source(&out, &inp, DeviceIndex::new(d), IndexBase::One);

        assert_eq!(out.device_names().unwrap(), ["TV", "TV_1", "Projector"]);
        assert_eq!(resolve(0).unwrap(), "Apple TV");
        assert!(matches!(
            resolve(1),
            Err(Error::Parse(ParseError::InvalidValue { ref field, .. })) if field == "allsource"
        ));
        assert!(matches!(resolve(2), Err(Error::Parse(ParseError::InvalidValue { .. }))));
    }

    #[test]
    fn missing_fields() {
        let inp = input(r#"{"inname": ["Blu-ray"]}"#);
        let err = resolve_current_source(
            &output(r#"{"name": ["TV"]}"#),
            &inp,
            DeviceIndex::new(0),
            IndexBase::One,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));

        let err = resolve_current_source(
            &output(r#"{"allsource": [1]}"#),
            &input(r#"{"name": ["Blu-ray"]}"#),
            DeviceIndex::new(0),
            IndexBase::One,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(ref f)) if f == "inname"));
    }
}
