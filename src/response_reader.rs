// File: response_reader.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult};
use log::{debug, trace};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::Instant;

pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Offset of the first `\r\n\r\n` in `buffer`, if any.
pub fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}

/// Accumulates reads until the header terminator shows up or the peer closes.
///
/// The whole buffer is rescanned after every read so a terminator split across
/// two reads is still found. No read is issued once the terminator is present.
/// A peer close returns whatever was received, possibly nothing. The read
/// timeout is a single deadline for the whole sequence.
pub async fn read_until_terminator<R>(reader: &mut R, config: &ProbeConfig) -> ProbeResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let started = Instant::now();
    let deadline = started + config.read_timeout();
    let mut buffer = Vec::new();
    let mut chunk = vec![0u8; config.read_chunk_size()];

    loop {
        let n = match tokio::time::timeout_at(deadline, reader.read(&mut chunk)).await {
            Ok(result) => result?,
            Err(_) => {
                debug!(
                    "Read deadline hit with {} bytes and no terminator",
                    buffer.len()
                );
                return Err(ProbeError::Timeout {
                    elapsed: started.elapsed(),
                });
            }
        };

        if n == 0 {
            debug!("Peer closed connection after {} bytes", buffer.len());
            return Ok(buffer);
        }

        buffer.extend_from_slice(&chunk[..n]);
        trace!("Read {} bytes, {} accumulated", n, buffer.len());

        if let Some(offset) = find_terminator(&buffer) {
            debug!("Header terminator found at offset {}", offset);
            return Ok(buffer);
        }

        if buffer.len() > config.max_header_bytes() {
            return Err(ProbeError::Protocol(format!(
                "response header exceeds {} bytes without terminator",
                config.max_header_bytes()
            )));
        }
    }
}
