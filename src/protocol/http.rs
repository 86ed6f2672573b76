// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the matrix controller.

use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use crate::command::Instruction;
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the matrix's HTTP endpoint.
///
/// HTTP is stateless - each instruction is an independent request.
///
/// # Examples
///
/// ```
/// use nohassle_matrix::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.endpoint(), "http://192.168.1.60:8080/cgi-bin/instr");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Path of the instruction endpoint.
    pub const INSTRUCTION_PATH: &'static str = "/cgi-bin/instr";
    /// Content type of every request body.
    pub const CONTENT_TYPE: &'static str = "application/json; charset=utf-8";

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// The host may carry an explicit `host:port` and an `http://` prefix.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self
            .host
            .trim_start_matches("http://")
            .trim_end_matches('/');
        if self.port == Self::DEFAULT_PORT {
            format!("http://{host}")
        } else {
            format!("http://{host}:{}", self.port)
        }
    }

    /// Builds the full URL of the instruction endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url(), Self::INSTRUCTION_PATH)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            endpoint: self.endpoint(),
            client,
        })
    }
}

// ============================================================================
// HttpClient - One POST per instruction
// ============================================================================

/// HTTP client for the matrix's JSON instruction endpoint.
///
/// # Examples
///
/// ```no_run
/// use nohassle_matrix::command::{Command, StatusCommand};
/// use nohassle_matrix::protocol::{HttpConfig, Protocol};
///
/// # async fn example() -> nohassle_matrix::Result<()> {
/// let client = HttpConfig::new("192.168.1.60").into_client()?;
/// let response = client
///     .send_instruction(&StatusCommand::Status.to_instruction())
///     .await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    endpoint: String,
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the URL instructions are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Protocol for HttpClient {
    async fn send_instruction(
        &self,
        instruction: &Instruction,
    ) -> Result<CommandResponse, ProtocolError> {
        let body = instruction
            .to_bytes()
            .map_err(|e| ProtocolError::InvalidBody(e.to_string()))?;

        tracing::debug!(
            url = %self.endpoint,
            command = instruction.comhead(),
            "Sending HTTP instruction"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HttpConfig::CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() != StatusCode::OK {
            return Err(ProtocolError::UnexpectedStatus(response.status().as_u16()));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(CommandResponse::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.60");
        assert_eq!(config.host(), "192.168.1.60");
        assert_eq!(config.port(), 80);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_base_url() {
        assert_eq!(
            HttpConfig::new("192.168.1.60").base_url(),
            "http://192.168.1.60"
        );
        assert_eq!(
            HttpConfig::new("192.168.1.60").with_port(8080).base_url(),
            "http://192.168.1.60:8080"
        );
    }

    #[test]
    fn http_config_accepts_scheme_and_embedded_port() {
        let config = HttpConfig::new("http://127.0.0.1:4321/");
        assert_eq!(config.endpoint(), "http://127.0.0.1:4321/cgi-bin/instr");
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::new("matrix.local").with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn http_config_into_client() {
        let client = HttpConfig::new("matrix.local").into_client().unwrap();
        assert_eq!(client.endpoint(), "http://matrix.local/cgi-bin/instr");
    }

    #[test]
    fn http_config_empty_host() {
        let result = HttpConfig::new("  ").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }
}
