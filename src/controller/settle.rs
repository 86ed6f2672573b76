// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settle delays after power changes.

use std::time::Duration;

use crate::types::PowerState;

/// How long to wait after a successful power change before status reads can
/// be trusted.
///
/// The matrix needs a few seconds to bring its ports up after power-on.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use nohassle_matrix::controller::PowerSettle;
/// use nohassle_matrix::types::PowerState;
///
/// let settle = PowerSettle::default();
/// assert_eq!(settle.after(PowerState::On), Duration::from_secs(5));
/// assert_eq!(settle.after(PowerState::Off), Duration::from_secs(2));
///
/// assert_eq!(PowerSettle::none().after(PowerState::On), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSettle {
    on: Duration,
    off: Duration,
}

impl PowerSettle {
    /// Default delay after power-on.
    pub const DEFAULT_ON: Duration = Duration::from_secs(5);
    /// Default delay after power-off.
    pub const DEFAULT_OFF: Duration = Duration::from_secs(2);

    /// Creates settle delays for power-on and power-off.
    #[must_use]
    pub const fn new(on: Duration, off: Duration) -> Self {
        Self { on, off }
    }

    /// No settle delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Returns the delay to apply after switching to `state`.
    #[must_use]
    pub const fn after(&self, state: PowerState) -> Duration {
        match state {
            PowerState::On => self.on,
            PowerState::Off => self.off,
        }
    }
}

impl Default for PowerSettle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ON, Self::DEFAULT_OFF)
    }
}
