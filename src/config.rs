// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023
// - Volker Schwaberow <volker@schwaberow.de>

use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;
pub const DEFAULT_MAX_HEADER_BYTES: usize = 65536;

/// Limits applied to a single probe invocation.
///
/// `read_timeout` is cumulative: it bounds the whole read sequence, not each
/// individual read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    connect_timeout: Duration,
    read_timeout: Duration,
    read_chunk_size: usize,
    max_header_bytes: usize,
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }

    pub fn set_connect_timeout(&mut self, connect_timeout: Duration) {
        self.connect_timeout = connect_timeout;
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn set_read_timeout(&mut self, read_timeout: Duration) {
        self.read_timeout = read_timeout;
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn set_read_chunk_size(&mut self, read_chunk_size: usize) {
        self.read_chunk_size = read_chunk_size.max(1);
    }

    pub fn read_chunk_size(&self) -> usize {
        self.read_chunk_size
    }

    pub fn set_max_header_bytes(&mut self, max_header_bytes: usize) {
        self.max_header_bytes = max_header_bytes;
    }

    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new()
    }
}
