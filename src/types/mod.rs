// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for matrix control.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state of the whole matrix
//! - [`DeviceIndex`] - Position of an output in the device list
//! - [`SourceIndex`] - Position of an input in the source list
//! - [`IndexBase`] - Whether the firmware numbers ports from 0 or 1
//! - [`deduplicate_names`] - Makes port display names unique

mod index;
mod names;
mod power;

pub use index::{DeviceIndex, IndexBase, SourceIndex};
pub use names::deduplicate_names;
pub use power::PowerState;
