// File: http_probe.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult, ValidationCheck};
use crate::response::{decode_lossy, ResponseHead, HTTP_VERSION};
use crate::transport::exchange;
use log::debug;

/// Sends one `GET` and checks the response status code.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    host: String,
    port: u16,
    path: String,
    expected_status: u16,
    config: ProbeConfig,
}

impl HttpProbe {
    pub fn new(host: &str, port: u16, path: &str, expected_status: u16) -> Self {
        HttpProbe {
            host: host.to_string(),
            port,
            path: path.to_string(),
            expected_status,
            config: ProbeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    pub fn request(&self) -> String {
        build_request(&self.host, self.port, &self.path)
    }

    /// Returns the observed status code on success.
    pub async fn run(&self) -> ProbeResult<i64> {
        let request = self.request();
        let raw = exchange(&self.host, self.port, request.as_bytes(), &self.config).await?;
        let response = decode_lossy(&raw);
        debug!("Received {} bytes from {}:{}", raw.len(), self.host, self.port);
        validate_status(&response, self.expected_status)
    }
}

pub fn build_request(host: &str, port: u16, path: &str) -> String {
    format!(
        "GET {} HTTP/1.1\r\nHost: {}:{}\r\nConnection: close\r\n\r\n",
        path, host, port
    )
}

/// Checks, in order: the `HTTP/1.1` prefix, a numeric status token, and that
/// the status equals `expected`.
pub fn validate_status(response: &str, expected: u16) -> ProbeResult<i64> {
    let status_line = ResponseHead::parse(response).status_line;

    if !response.starts_with(HTTP_VERSION) {
        return Err(ProbeError::Protocol(format!(
            "invalid HTTP response: {}",
            status_line.as_str()
        )));
    }

    let status = status_line.status_code().ok_or_else(|| {
        ProbeError::Protocol(format!(
            "unable to parse status from '{}'",
            status_line.as_str()
        ))
    })?;

    if status != i64::from(expected) {
        return Err(ProbeError::Validation {
            check: ValidationCheck::Status,
            expected: expected.to_string(),
            observed: Some(status.to_string()),
        });
    }

    Ok(status)
}
