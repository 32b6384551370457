// File: ws_handshake.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult, ValidationCheck};
use crate::response::{decode_lossy, ResponseHead};
use crate::transport::exchange;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use rand::RngCore;
use sha1::{Digest, Sha1};

/// Appended to the client key before hashing (RFC 6455, section 1.3).
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";
pub const WS_VERSION: &str = "13";
pub const KEY_LEN: usize = 16;
pub const ACCEPT_HEADER: &str = "sec-websocket-accept";

/// The base64 form of 16 key bytes, as sent in `Sec-WebSocket-Key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeKey(String);

impl HandshakeKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        HandshakeKey(STANDARD.encode(bytes))
    }

    /// Accepts only standard base64 that decodes to exactly 16 bytes.
    pub fn from_encoded(encoded: &str) -> Option<Self> {
        match STANDARD.decode(encoded) {
            Ok(decoded) if decoded.len() == KEY_LEN => Some(HandshakeKey(encoded.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn accept_value(&self) -> String {
        compute_accept(&self.0)
    }
}

/// base64(SHA-1(key ++ GUID)).
pub fn compute_accept(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    STANDARD.encode(hasher.finalize())
}

pub trait KeySource {
    fn next_key(&mut self) -> HandshakeKey;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeySource;

impl KeySource for RandomKeySource {
    fn next_key(&mut self) -> HandshakeKey {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        HandshakeKey::from_bytes(bytes)
    }
}

/// Always yields the same key.
#[derive(Debug, Clone)]
pub struct FixedKeySource(pub HandshakeKey);

impl KeySource for FixedKeySource {
    fn next_key(&mut self) -> HandshakeKey {
        self.0.clone()
    }
}

pub fn build_upgrade_request(host: &str, port: u16, path: &str, key: &HandshakeKey) -> String {
    format!(
        "GET {} HTTP/1.1\r\n\
         Host: {}:{}\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Key: {}\r\n\
         Sec-WebSocket-Version: {}\r\n\
         \r\n",
        path,
        host,
        port,
        key.as_str(),
        WS_VERSION
    )
}

/// The status line only has to contain `101` somewhere; the accept header
/// must match exactly. The status check runs first.
pub fn validate_handshake(response: &str, expected_accept: &str) -> ProbeResult<()> {
    let head = ResponseHead::parse(response);

    if !head.status_line.as_str().contains("101") {
        return Err(ProbeError::Validation {
            check: ValidationCheck::Upgrade,
            expected: "101".to_string(),
            observed: Some(head.status_line.as_str().to_string()),
        });
    }

    match head.headers.get(ACCEPT_HEADER) {
        Some(accept) if accept == expected_accept => Ok(()),
        observed => Err(ProbeError::Validation {
            check: ValidationCheck::AcceptHeader,
            expected: expected_accept.to_string(),
            observed: observed.map(str::to_string),
        }),
    }
}

/// Performs one WebSocket opening handshake and checks the server's answer.
#[derive(Debug, Clone)]
pub struct WebSocketProbe<K = RandomKeySource> {
    host: String,
    port: u16,
    path: String,
    config: ProbeConfig,
    keys: K,
}

impl WebSocketProbe<RandomKeySource> {
    pub fn new(host: &str, port: u16, path: &str) -> Self {
        WebSocketProbe {
            host: host.to_string(),
            port,
            path: path.to_string(),
            config: ProbeConfig::default(),
            keys: RandomKeySource,
        }
    }
}

impl<K: KeySource> WebSocketProbe<K> {
    pub fn with_config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_key_source<S: KeySource>(self, keys: S) -> WebSocketProbe<S> {
        WebSocketProbe {
            host: self.host,
            port: self.port,
            path: self.path,
            config: self.config,
            keys,
        }
    }

    /// Draws the next key and builds the upgrade request carrying it.
    pub fn request(&mut self) -> (HandshakeKey, String) {
        let key = self.keys.next_key();
        let request = build_upgrade_request(&self.host, self.port, &self.path, &key);
        (key, request)
    }

    /// Returns the verified accept value on success.
    pub async fn run(&mut self) -> ProbeResult<String> {
        let (key, request) = self.request();
        let expected_accept = key.accept_value();
        debug!(
            "Handshake key {} expects accept {}",
            key.as_str(),
            expected_accept
        );

        let raw = exchange(&self.host, self.port, request.as_bytes(), &self.config).await?;
        let response = decode_lossy(&raw);

        validate_handshake(&response, &expected_accept)?;
        Ok(expected_accept)
    }
}
