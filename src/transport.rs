// File: transport.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult};
use crate::response_reader::read_until_terminator;
use log::{debug, trace};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream};

/// A single outbound TCP connection owned by one probe invocation.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    target: String,
}

impl Connection {
    /// Resolves `host` and tries each address in turn. The whole attempt,
    /// resolution included, is bounded by `connect_timeout`.
    pub async fn open(host: &str, port: u16, connect_timeout: Duration) -> ProbeResult<Self> {
        let target = format!("{}:{}", host, port);
        debug!("Connecting to {}", target);

        let stream = connect_within(&target, connect_timeout, connect_any(host, port)).await?;

        Ok(Self { stream, target })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn send(&mut self, bytes: &[u8]) -> ProbeResult<()> {
        trace!("Sending {} bytes to {}", bytes.len(), self.target);
        self.stream.write_all(bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    pub async fn read_response(&mut self, config: &ProbeConfig) -> ProbeResult<Vec<u8>> {
        read_until_terminator(&mut self.stream, config).await
    }

    /// Consumes the connection, so it can be closed at most once.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            trace!("Shutdown of {} reported: {}", self.target, e);
        }
        debug!("Closed connection to {}", self.target);
    }
}

/// Maps a failed or overdue connect attempt to `ProbeError::Connection`.
async fn connect_within<F, T>(target: &str, connect_timeout: Duration, connect: F) -> ProbeResult<T>
where
    F: Future<Output = io::Result<T>>,
{
    match tokio::time::timeout(connect_timeout, connect).await {
        Ok(Ok(connected)) => Ok(connected),
        Ok(Err(e)) => Err(ProbeError::connection(target, e)),
        Err(_) => Err(ProbeError::connection(
            target,
            format!("timed out after {} ms", connect_timeout.as_millis()),
        )),
    }
}

async fn connect_any(host: &str, port: u16) -> io::Result<TcpStream> {
    let mut last_error = None;
    for addr in lookup_host((host, port)).await? {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                trace!("Connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}

/// Opens a connection, sends `request`, reads the response header block and
/// closes the connection whatever the outcome of the send and read.
pub async fn exchange(
    host: &str,
    port: u16,
    request: &[u8],
    config: &ProbeConfig,
) -> ProbeResult<Vec<u8>> {
    let mut connection = Connection::open(host, port, config.connect_timeout()).await?;

    let result = match connection.send(request).await {
        Ok(()) => connection.read_response(config).await,
        Err(e) => Err(e),
    };

    connection.close().await;
    result
}
