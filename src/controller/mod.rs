// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level controller for an HDMI matrix.
//!
//! [`MatrixController`] is the only point of contact with the matrix. It owns
//! nothing but the host address and its settings; every query is a fresh
//! round-trip, so the device stays the single source of truth.
//!
//! # Failure Semantics
//!
//! Transport failures, non-200 answers, unparseable bodies and responses
//! echoing the wrong command are retried according to the
//! [`RetryPolicy`]. A missing field in a valid response is not retried.
//! Either way the caller gets an `Err`, which stands for *unknown*:
//!
//! ```no_run
//! use nohassle_matrix::MatrixController;
//!
//! # async fn example() -> nohassle_matrix::Result<()> {
//! let matrix = MatrixController::http("192.168.1.60").build()?;
//!
//! match matrix.are_devices_powered_on().await {
//!     Ok(true) => println!("on"),
//!     Ok(false) => println!("off"),
//!     Err(e) => println!("unknown: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod builder;
mod settle;

#[cfg(feature = "http")]
pub use builder::MatrixControllerBuilder;
pub use settle::PowerSettle;

use std::sync::Arc;

use crate::command::{Command, Instruction, PowerCommand, StatusCommand, VideoSwitchCommand};
use crate::error::{Error, Result};
use crate::protocol::{CommandResponse, Protocol, RetryPolicy};
use crate::response::{
    InputStatusResponse, OutputStatusResponse, StatusResponse, VideoStatusResponse,
    resolve_current_source,
};
use crate::state::MatrixState;
use crate::types::{DeviceIndex, IndexBase, PowerState, SourceIndex};

/// Outcome of [`MatrixController::select_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The source was routed to the device.
    Routed(SourceIndex),
    /// No source carries the requested name; nothing was sent.
    UnknownSource,
}

/// Controller for one HDMI matrix.
///
/// # Type Parameter
///
/// `P` is the transport. Use [`MatrixController::http`] for the real device
/// or [`MatrixController::new`] with any other [`Protocol`].
#[derive(Debug)]
pub struct MatrixController<P: Protocol> {
    protocol: Arc<P>,
    host: String,
    retry: RetryPolicy,
    settle: PowerSettle,
    index_base: IndexBase,
}

impl<P: Protocol> Clone for MatrixController<P> {
    fn clone(&self) -> Self {
        Self {
            protocol: Arc::clone(&self.protocol),
            host: self.host.clone(),
            retry: self.retry,
            settle: self.settle,
            index_base: self.index_base,
        }
    }
}

impl<P: Protocol> MatrixController<P> {
    /// Creates a controller over `protocol` with default settings.
    ///
    /// `host` identifies the matrix in logs and derived identifiers.
    pub fn new(protocol: P, host: impl Into<String>) -> Self {
        Self {
            protocol: Arc::new(protocol),
            host: host.into(),
            retry: RetryPolicy::default(),
            settle: PowerSettle::default(),
            index_base: IndexBase::default(),
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the power settle delays.
    #[must_use]
    pub fn with_power_settle(mut self, settle: PowerSettle) -> Self {
        self.settle = settle;
        self
    }

    /// Sets the port numbering convention.
    #[must_use]
    pub fn with_index_base(mut self, index_base: IndexBase) -> Self {
        self.index_base = index_base;
        self
    }

    /// Returns the host address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the power settle delays.
    #[must_use]
    pub fn power_settle(&self) -> PowerSettle {
        self.settle
    }

    /// Returns the port numbering convention.
    #[must_use]
    pub fn index_base(&self) -> IndexBase {
        self.index_base
    }

    // ========== Instructions ==========

    /// Sends a command using the controller's retry policy.
    ///
    /// # Errors
    ///
    /// Returns `Error::RetriesExhausted` if no attempt got a matching response.
    pub async fn send_command<C: Command>(&self, command: &C) -> Result<CommandResponse> {
        self.send_instruction(&command.to_instruction()).await
    }

    /// Sends an instruction using the controller's retry policy.
    ///
    /// # Errors
    ///
    /// Returns `Error::RetriesExhausted` if no attempt got a matching response.
    pub async fn send_instruction(&self, instruction: &Instruction) -> Result<CommandResponse> {
        self.send_instruction_with(instruction, self.retry).await
    }

    /// Sends an instruction, retrying failed attempts as `policy` allows.
    ///
    /// Returns the first response that is a JSON object answering this
    /// instruction. The delay between attempts is an async sleep, so
    /// dropping the future cancels the remaining attempts.
    ///
    /// # Errors
    ///
    /// Returns `Error::RetriesExhausted` carrying the last attempt's failure.
    pub async fn send_instruction_with(
        &self,
        instruction: &Instruction,
        policy: RetryPolicy,
    ) -> Result<CommandResponse> {
        let command = instruction.comhead();
        let max_attempts = policy.max_attempts();
        let mut attempt = 1;

        loop {
            let result = match self.protocol.send_instruction(instruction).await {
                Ok(response) => response.verify(instruction).map(|()| response),
                Err(e) => Err(e),
            };

            match result {
                Ok(response) => {
                    tracing::debug!(command, attempt, max_attempts, "Instruction succeeded");
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        command,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Instruction attempt failed"
                    );

                    if !policy.should_retry(attempt) {
                        tracing::error!(
                            host = %self.host,
                            command,
                            attempts = max_attempts,
                            "Failed to send instruction"
                        );
                        return Err(Error::RetriesExhausted {
                            command: command.to_string(),
                            attempts: max_attempts,
                            last: e,
                        });
                    }

                    tokio::time::sleep(policy.delay()).await;
                    attempt += 1;
                }
            }
        }
    }

    // ========== Status Pages ==========

    /// Fetches `get status`.
    ///
    /// # Errors
    ///
    /// Returns error if the instruction fails or the body has the wrong shape.
    pub async fn get_status(&self) -> Result<StatusResponse> {
        self.query(StatusCommand::Status).await
    }

    /// Fetches `get videostatus`.
    ///
    /// # Errors
    ///
    /// Returns error if the instruction fails or the body has the wrong shape.
    pub async fn get_video_status(&self) -> Result<VideoStatusResponse> {
        self.query(StatusCommand::VideoStatus).await
    }

    /// Fetches `get input status`.
    ///
    /// # Errors
    ///
    /// Returns error if the instruction fails, including when the response
    /// does not echo `get input status`.
    pub async fn get_input_status(&self) -> Result<InputStatusResponse> {
        self.query(StatusCommand::InputStatus).await
    }

    /// Fetches `get output status`.
    ///
    /// # Errors
    ///
    /// Returns error if the instruction fails, including when the response
    /// does not echo `get output status`.
    pub async fn get_output_status(&self) -> Result<OutputStatusResponse> {
        self.query(StatusCommand::OutputStatus).await
    }

    async fn query<T: serde::de::DeserializeOwned>(&self, command: StatusCommand) -> Result<T> {
        let response = self.send_command(&command).await?;
        let parsed = response.parse().map_err(Error::Parse);
        if let Err(e) = &parsed {
            tracing::error!(command = command.comhead(), error = %e, "Malformed status page");
        }
        parsed
    }

    // ========== Devices and Sources ==========

    /// Returns the deduplicated output names; the position is the device index.
    ///
    /// # Errors
    ///
    /// Returns error if the output page cannot be fetched or has no names.
    pub async fn get_devices(&self) -> Result<Vec<String>> {
        let devices = self
            .get_output_status()
            .await
            .and_then(|status| status.device_names().map_err(Error::Parse));

        match &devices {
            Ok(names) => tracing::debug!(?names, "Devices retrieved"),
            Err(e) => tracing::warn!(error = %e, "No devices found or failed to retrieve devices"),
        }
        devices
    }

    /// Returns the deduplicated input names; the position is the source index.
    ///
    /// # Errors
    ///
    /// Returns error if the input page cannot be fetched or has no names.
    pub async fn get_sources(&self) -> Result<Vec<String>> {
        let sources = self
            .get_input_status()
            .await
            .and_then(|status| status.source_names().map_err(Error::Parse));

        match &sources {
            Ok(names) => tracing::debug!(?names, "Sources retrieved"),
            Err(e) => tracing::warn!(error = %e, "No sources found or failed to retrieve sources"),
        }
        sources
    }

    /// Returns the number of outputs, or 0 when they cannot be determined.
    pub async fn get_device_count(&self) -> usize {
        self.get_devices().await.map_or(0, |devices| devices.len())
    }

    // ========== Routing ==========

    /// Routes `source` to `device`.
    ///
    /// Both indices are list positions, not wire numbers. The payload is
    /// `"source": [source + base, device + base]` where `base` is the
    /// controller's [`IndexBase`] offset. With the default 1-based numbering,
    /// `set_device_source(DeviceIndex::new(0), SourceIndex::new(2))` sends
    /// `[3, 1]`; with [`IndexBase::Zero`] it sends `[2, 0]`.
    ///
    /// # Errors
    ///
    /// Returns error if the instruction fails.
    pub async fn set_device_source(
        &self,
        device: DeviceIndex,
        source: SourceIndex,
    ) -> Result<CommandResponse> {
        let command = VideoSwitchCommand::new(
            source.wire(self.index_base),
            device.wire(self.index_base),
        );
        tracing::debug!(
            host = %self.host,
            device = %device,
            source = %source,
            "Setting device source"
        );
        self.send_command(&command).await
    }

    /// Returns the name of the source currently shown on `device`.
    ///
    /// Fetches the output page, then the input page, and resolves
    /// `inname[allsource[device]]`.
    ///
    /// # Errors
    ///
    /// Returns error if either page cannot be fetched, a field is missing or
    /// an index is out of range. No fallback source is ever substituted.
    pub async fn current_source(&self, device: DeviceIndex) -> Result<String> {
        let output = self.get_output_status().await?;
        let input = self.get_input_status().await?;
        resolve_current_source(&output, &input, device, self.index_base)
    }

    /// Routes the source called `source_name` to `device`.
    ///
    /// If the matrix reports being off, it is powered on for the switch and
    /// powered off again afterwards. If its power state is unknown, power is
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns error if the source list cannot be fetched or the switch
    /// instruction fails. An unknown name is not an error: it is logged,
    /// nothing is sent and [`SelectOutcome::UnknownSource`] is returned.
    pub async fn select_source(
        &self,
        device: DeviceIndex,
        source_name: &str,
    ) -> Result<SelectOutcome> {
        let sources = self.get_sources().await?;
        let Some(position) = sources.iter().position(|s| s == source_name) else {
            tracing::warn!(source = source_name, ?sources, "Unknown source");
            return Ok(SelectOutcome::UnknownSource);
        };
        let source = SourceIndex::new(position);

        let restore_off = match self.are_devices_powered_on().await {
            Ok(on) => !on,
            Err(e) => {
                tracing::warn!(error = %e, "Power state unknown, routing without toggling power");
                false
            }
        };

        if restore_off {
            self.power_on_devices().await;
        }
        let routed = self.set_device_source(device, source).await;
        if restore_off {
            self.power_off_devices().await;
        }

        routed.map(|_| SelectOutcome::Routed(source))
    }

    // ========== Power ==========

    /// Returns the matrix power state.
    ///
    /// # Errors
    ///
    /// Returns error if the status page cannot be fetched or has no valid
    /// `power` field.
    pub async fn power_state(&self) -> Result<PowerState> {
        let state = self
            .get_status()
            .await
            .and_then(|status| status.power_state().map_err(Error::Parse));
        if let Err(e) = &state {
            tracing::error!(error = %e, "Failed to retrieve power state");
        }
        state
    }

    /// Returns true if the matrix is on and false if it is off.
    ///
    /// # Errors
    ///
    /// Returns error when the state is unknown; an unreachable matrix is
    /// never reported as off.
    pub async fn are_devices_powered_on(&self) -> Result<bool> {
        self.power_state().await.map(|state| state.is_on())
    }

    /// Powers the matrix on, then waits for the power-on settle delay.
    ///
    /// Best effort: a failure is logged and the settle delay is skipped.
    pub async fn power_on_devices(&self) {
        self.apply_power(PowerState::On).await;
    }

    /// Powers the matrix off, then waits for the power-off settle delay.
    ///
    /// Best effort: a failure is logged and the settle delay is skipped.
    pub async fn power_off_devices(&self) {
        self.apply_power(PowerState::Off).await;
    }

    async fn apply_power(&self, state: PowerState) {
        tracing::debug!(host = %self.host, %state, "Setting power");

        match self.send_command(&PowerCommand::new(state)).await {
            Ok(response) => {
                tracing::info!(%state, body = response.body(), "Power command sent");
                let settle = self.settle.after(state);
                if !settle.is_zero() {
                    tokio::time::sleep(settle).await;
                }
            }
            Err(e) => tracing::error!(%state, error = %e, "Failed to send power command"),
        }
    }

    // ========== Snapshots ==========

    /// Returns true if the matrix answers `get status`.
    pub async fn is_reachable(&self) -> bool {
        self.get_status().await.is_ok()
    }

    /// Polls power, outputs and inputs once and returns a consistent snapshot.
    ///
    /// A page that cannot be fetched only makes its own part unknown.
    pub async fn refresh(&self) -> MatrixState {
        let power = self.power_state().await.ok();
        let output = self.get_output_status().await.ok();
        let input = self.get_input_status().await.ok();
        MatrixState::from_parts(power, output, input, self.index_base)
    }

    // ========== Identifiers ==========

    /// Returns a stable identifier for an output of this matrix.
    #[must_use]
    pub fn output_unique_id(&self, device: DeviceIndex) -> String {
        format!("{}-output-{device}", self.host)
    }

    /// Returns a stable identifier for the matrix power switch.
    #[must_use]
    pub fn power_switch_unique_id(&self) -> String {
        format!("{}-power-switch", self.host)
    }
}
