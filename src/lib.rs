// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `NoHassle` Matrix - A Rust library to control HDMI matrix switches.
//!
//! This library provides an async API to the JSON instruction endpoint of
//! HDMI matrix switches (`POST /cgi-bin/instr`).
//!
//! # Supported Features
//!
//! - **Status queries**: Power, video, input and output status pages
//! - **Routing**: Send any input to any output, by index or by name
//! - **Power control**: Switch the whole matrix on and off
//! - **Snapshots**: One-call poll of power, outputs and routed sources
//!
//! # Quick Start
//!
//! ```no_run
//! use nohassle_matrix::{DeviceIndex, MatrixController};
//!
//! #[tokio::main]
//! async fn main() -> nohassle_matrix::Result<()> {
//!     let matrix = MatrixController::http("192.168.1.60").build()?;
//!
//!     // Output names, deduplicated ("TV", "TV_1", ...)
//!     let devices = matrix.get_devices().await?;
//!     println!("outputs: {devices:?}");
//!
//!     // Route the input called "Apple TV" to the first output
//!     matrix.select_source(DeviceIndex::new(0), "Apple TV").await?;
//!
//!     let source = matrix.current_source(DeviceIndex::new(0)).await?;
//!     println!("now showing {source}");
//!     Ok(())
//! }
//! ```
//!
//! # Unknown Is Not Off
//!
//! Queries return `Err` whenever the answer cannot be determined: the matrix
//! is unreachable, a response echoes the wrong command, or a field is
//! missing. Callers must treat `Err` as *unknown*, never as a default value.
//! The only exception is [`MatrixController::get_device_count`], which
//! reports 0.
//!
//! # Retries
//!
//! Every instruction is attempted up to three times, one second apart, by
//! default. See [`protocol::RetryPolicy`].

pub mod command;
#[cfg(feature = "http")]
pub mod config;
pub mod controller;
pub mod error;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use command::{Command, Instruction, PowerCommand, StatusCommand, VideoSwitchCommand};
#[cfg(feature = "http")]
pub use config::MatrixConfig;
#[cfg(feature = "http")]
pub use controller::MatrixControllerBuilder;
pub use controller::{MatrixController, PowerSettle, SelectOutcome};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{CommandResponse, Protocol, RetryPolicy};
pub use response::{InputStatusResponse, OutputStatusResponse, StatusResponse, VideoStatusResponse};
pub use state::{MatrixState, OutputState};
pub use types::{DeviceIndex, IndexBase, PowerState, SourceIndex};
