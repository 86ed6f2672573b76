// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP controller builder.

use std::time::Duration;

use crate::controller::{MatrixController, PowerSettle};
use crate::error::{Error, Result};
use crate::protocol::{HttpClient, HttpConfig, RetryPolicy};
use crate::types::IndexBase;

impl MatrixController<HttpClient> {
    /// Starts building a controller for the matrix at `host`.
    #[must_use]
    pub fn http(host: impl Into<String>) -> MatrixControllerBuilder {
        MatrixControllerBuilder::new(HttpConfig::new(host))
    }

    /// Starts building a controller from a full HTTP configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> MatrixControllerBuilder {
        MatrixControllerBuilder::new(config)
    }
}

/// Builder for HTTP-based matrix controllers.
///
/// This builder can be created in two ways:
/// - `MatrixController::http("host")` - Simple host string
/// - `MatrixController::http_config(HttpConfig::new("host").with_port(8080))` - Advanced configuration
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use nohassle_matrix::MatrixController;
/// use nohassle_matrix::protocol::RetryPolicy;
///
/// # async fn example() -> nohassle_matrix::Result<()> {
/// // Offline: no request is sent
/// let matrix = MatrixController::http("192.168.1.60").build()?;
///
/// // Fail fast when the matrix does not answer
/// let matrix = MatrixController::http("192.168.1.60")
///     .with_timeout(Duration::from_secs(3))
///     .with_retry_policy(RetryPolicy::new().with_max_attempts(1))
///     .build_and_probe()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MatrixControllerBuilder {
    config: HttpConfig,
    retry: RetryPolicy,
    settle: PowerSettle,
    index_base: IndexBase,
}

impl MatrixControllerBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            retry: RetryPolicy::default(),
            settle: PowerSettle::default(),
            index_base: IndexBase::default(),
        }
    }

    /// Sets the HTTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
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

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the controller without contacting the matrix.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<MatrixController<HttpClient>> {
        let host = self.config.host().to_string();
        let client = self.config.into_client().map_err(Error::Protocol)?;

        Ok(MatrixController::new(client, host)
            .with_retry_policy(self.retry)
            .with_power_settle(self.settle)
            .with_index_base(self.index_base))
    }

    /// Builds the controller and checks that the matrix answers `get status`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or the matrix does
    /// not answer within the retry policy.
    pub async fn build_and_probe(self) -> Result<MatrixController<HttpClient>> {
        let controller = self.build()?;
        controller.get_status().await?;
        tracing::info!(host = %controller.host(), "Matrix reachable");
        Ok(controller)
    }
}
