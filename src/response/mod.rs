// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for matrix JSON responses.
//!
//! Each status page gets its own typed record. Fields the firmware may omit
//! are optional, and the accessors turn an absent field into a
//! [`ParseError::MissingField`](crate::error::ParseError::MissingField)
//! instead of a silent default.

mod ports;
mod routing;
mod status;

pub use ports::{InputStatusResponse, OutputStatusResponse};
pub use routing::resolve_current_source;
pub use status::{StatusResponse, VideoStatusResponse};
