// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device (output) and source (input) addressing.
//!
//! Callers address outputs and inputs by their position in the deduplicated
//! name lists, starting at 0. The firmware numbers ports from 1 in both the
//! `video switch` payload and the `allsource` field of `get output status`.
//! [`IndexBase`] captures that convention in one place.

use std::fmt;

use serde::Deserialize;

use crate::error::ValueError;

/// Numbering convention of port numbers on the wire.
///
/// The default, [`IndexBase::One`], matches the firmware observed in the
/// field: `allsource = [1, 2]` means output 0 shows input 0 and output 1
/// shows input 1.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::types::IndexBase;
///
/// assert_eq!(IndexBase::default(), IndexBase::One);
/// assert_eq!(IndexBase::One.to_wire(0), 1);
/// assert_eq!(IndexBase::One.from_wire(1), Some(0));
/// assert_eq!(IndexBase::One.from_wire(0), None);
/// assert_eq!(IndexBase::Zero.from_wire(0), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum IndexBase {
    /// Ports are numbered from 0.
    Zero,
    /// Ports are numbered from 1.
    #[default]
    One,
}

impl IndexBase {
    /// Returns the number of the first port.
    #[must_use]
    pub const fn offset(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Converts a 0-based list position to a wire port number.
    #[must_use]
    pub fn to_wire(self, position: usize) -> u32 {
        u32::try_from(position)
            .unwrap_or(u32::MAX)
            .saturating_add(self.offset())
    }

    /// Converts a wire port number to a 0-based list position.
    ///
    /// Returns `None` when the number lies below the first port, e.g. `0`
    /// under 1-based numbering (the firmware's "nothing routed").
    #[must_use]
    pub fn from_wire(self, number: u32) -> Option<usize> {
        number
            .checked_sub(self.offset())
            .and_then(|n| usize::try_from(n).ok())
    }
}

impl TryFrom<u8> for IndexBase {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(ValueError::InvalidIndexBase(other)),
        }
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-based", self.offset())
    }
}

/// Position of an output (a "device" attached to the matrix) in the
/// deduplicated device list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DeviceIndex(usize);

impl DeviceIndex {
    /// Creates a device index from a 0-based list position.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the 0-based list position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.0
    }

    /// Returns the port number sent to the firmware.
    #[must_use]
    pub fn wire(&self, base: IndexBase) -> u32 {
        base.to_wire(self.0)
    }
}

impl From<usize> for DeviceIndex {
    fn from(position: usize) -> Self {
        Self(position)
    }
}

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an input (a "source") in the deduplicated source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SourceIndex(usize);

impl SourceIndex {
    /// Creates a source index from a 0-based list position.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the 0-based list position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.0
    }

    /// Returns the port number sent to the firmware.
    #[must_use]
    pub fn wire(&self, base: IndexBase) -> u32 {
        base.to_wire(self.0)
    }
}

impl From<usize> for SourceIndex {
    fn from(position: usize) -> Self {
        Self(position)
    }
}

impl fmt::Display for SourceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_round_trip_positions() {
        assert_eq!(IndexBase::One.to_wire(0), 1);
        assert_eq!(IndexBase::One.to_wire(7), 8);
        assert_eq!(IndexBase::One.from_wire(8), Some(7));
    }

    #[test]
    fn one_based_zero_is_unrouted() {
        assert_eq!(IndexBase::One.from_wire(0), None);
    }

    #[test]
    fn zero_based_is_identity() {
        assert_eq!(IndexBase::Zero.to_wire(3), 3);
        assert_eq!(IndexBase::Zero.from_wire(3), Some(3));
    }

    #[test]
    fn index_base_from_u8() {
        assert_eq!(IndexBase::try_from(0).unwrap(), IndexBase::Zero);
        assert_eq!(IndexBase::try_from(1).unwrap(), IndexBase::One);
        assert_eq!(
            IndexBase::try_from(2).unwrap_err(),
            ValueError::InvalidIndexBase(2)
        );
    }

    #[test]
    fn index_base_deserialize() {
        let base: IndexBase = serde_json::from_str("0").unwrap();
        assert_eq!(base, IndexBase::Zero);
        assert!(serde_json::from_str::<IndexBase>("5").is_err());
    }

    #[test]
    fn device_and_source_wire_numbers() {
        assert_eq!(DeviceIndex::new(2).wire(IndexBase::One), 3);
        assert_eq!(SourceIndex::new(2).wire(IndexBase::Zero), 2);
        assert_eq!(DeviceIndex::from(4).to_string(), "4");
    }
}
