// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deserializable controller settings.
//!
//! [`MatrixConfig`] lets a host application keep the matrix settings in its
//! own configuration file. Every field except `host` is optional and falls
//! back to the same default the builder uses.
//!
//! # Examples
//!
//! ```
//! use nohassle_matrix::config::MatrixConfig;
//!
//! let config: MatrixConfig = serde_json::from_str(r#"{
//!     "host": "192.168.1.60",
//!     "attempts": 5,
//!     "index_base": 0
//! }"#).unwrap();
//!
//! assert_eq!(config.host, "192.168.1.60");
//! assert_eq!(config.attempts, 5);
//! assert_eq!(config.port, 80);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::controller::{MatrixController, MatrixControllerBuilder, PowerSettle};
use crate::protocol::{HttpConfig, RetryPolicy};
use crate::types::IndexBase;

/// Controller settings, as read from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    /// Matrix hostname or IP address.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Attempts per instruction.
    pub attempts: u32,
    /// Delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Wait after power-on in milliseconds.
    pub power_on_settle_ms: u64,
    /// Wait after power-off in milliseconds.
    pub power_off_settle_ms: u64,
    /// Port numbering used on the wire (0 or 1).
    pub index_base: IndexBase,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: HttpConfig::DEFAULT_PORT,
            timeout_ms: millis(HttpConfig::DEFAULT_TIMEOUT),
            attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: millis(RetryPolicy::DEFAULT_DELAY),
            power_on_settle_ms: millis(PowerSettle::DEFAULT_ON),
            power_off_settle_ms: millis(PowerSettle::DEFAULT_OFF),
            index_base: IndexBase::default(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl MatrixConfig {
    /// Returns the HTTP transport settings.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.host.clone())
            .with_port(self.port)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(self.attempts)
            .with_delay(Duration::from_millis(self.retry_delay_ms))
    }

    /// Returns the power settle delays.
    #[must_use]
    pub fn power_settle(&self) -> PowerSettle {
        PowerSettle::new(
            Duration::from_millis(self.power_on_settle_ms),
            Duration::from_millis(self.power_off_settle_ms),
        )
    }

    /// Turns these settings into a controller builder.
    #[must_use]
    pub fn into_builder(self) -> MatrixControllerBuilder {
        let retry = self.retry_policy();
        let settle = self.power_settle();
        MatrixController::http_config(self.http_config())
            .with_retry_policy(retry)
            .with_power_settle(settle)
            .with_index_base(self.index_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builder() {
        let config: MatrixConfig = serde_json::from_str(r#"{"host": "matrix.local"}"#).unwrap();
        assert_eq!(config.port, 80);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.power_settle(), PowerSettle::default());
        assert_eq!(config.index_base, IndexBase::One);
    }

    #[test]
    fn explicit_values() {
        let config: MatrixConfig = serde_json::from_str(
            r#"{
                "host": "10.0.0.5",
                "port": 8080,
                "timeout_ms": 1500,
                "attempts": 1,
                "retry_delay_ms": 0,
                "power_on_settle_ms": 0,
                "power_off_settle_ms": 250,
                "index_base": 0
            }"#,
        )
        .unwrap();

        let http = config.http_config();
        assert_eq!(http.port(), 8080);
        assert_eq!(http.timeout(), Duration::from_millis(1500));
        assert_eq!(config.retry_policy().max_attempts(), 1);
        assert_eq!(config.retry_policy().delay(), Duration::ZERO);
        assert_eq!(
            config.power_settle(),
            PowerSettle::new(Duration::ZERO, Duration::from_millis(250))
        );
        assert_eq!(config.index_base, IndexBase::Zero);
    }

    #[test]
    fn zero_attempts_still_sends_once() {
        let config: MatrixConfig =
            serde_json::from_str(r#"{"host": "matrix.local", "attempts": 0}"#).unwrap();
        assert_eq!(config.retry_policy().max_attempts(), 1);
    }

    #[test]
    fn invalid_index_base_is_rejected() {
        let result = serde_json::from_str::<MatrixConfig>(r#"{"host": "m", "index_base": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<MatrixConfig>(r#"{"host": "m", "hostname": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn into_builder_carries_settings() {
        let config: MatrixConfig =
            serde_json::from_str(r#"{"host": "matrix.local", "attempts": 2, "index_base": 0}"#)
                .unwrap();

        let matrix = config.into_builder().build().unwrap();
        assert_eq!(matrix.host(), "matrix.local");
        assert_eq!(matrix.retry_policy().max_attempts(), 2);
        assert_eq!(matrix.index_base(), IndexBase::Zero);
    }
}
