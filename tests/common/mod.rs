// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the server does once its response chunks are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Half-close the write side so the client sees EOF.
    Shutdown,
    /// Keep the connection open and silent.
    HoldOpen,
}

#[derive(Debug, Default)]
pub struct ServerLog {
    pub request: Vec<u8>,
    pub client_closed: bool,
}

impl ServerLog {
    pub fn request_text(&self) -> String {
        String::from_utf8_lossy(&self.request).into_owned()
    }
}

pub struct CannedServer {
    pub port: u16,
    handle: JoinHandle<ServerLog>,
}

impl CannedServer {
    /// Waits for the single connection to finish and returns what was seen.
    pub async fn finish(self) -> ServerLog {
        self.handle.await.expect("canned server panicked")
    }
}

/// Accepts one connection on 127.0.0.1, reads the request header block, then
/// writes the chunks produced by `respond` one by one.
pub async fn serve_once<F>(respond: F, ending: Ending) -> CannedServer
where
    F: FnOnce(&str) -> Vec<Vec<u8>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut log = ServerLog::default();
        let mut chunk = [0u8; 1024];

        while !log.request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                log.client_closed = true;
                return log;
            }
            log.request.extend_from_slice(&chunk[..n]);
        }

        for part in respond(&log.request_text()) {
            if stream.write_all(&part).await.is_err() {
                log.client_closed = true;
                return log;
            }
            stream.flush().await.ok();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        if ending == Ending::Shutdown {
            stream.shutdown().await.ok();
        }

        let drained = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => continue,
                }
            }
        })
        .await;
        log.client_closed = drained.is_ok();
        log
    });

    CannedServer { port, handle }
}

/// Serves one fixed response split into the given pieces.
pub async fn serve_chunks(chunks: &[&[u8]], ending: Ending) -> CannedServer {
    let owned: Vec<Vec<u8>> = chunks.iter().map(|c| c.to_vec()).collect();
    serve_once(move |_| owned, ending).await
}

/// Returns the value of `name` from a raw request, matching the name exactly.
pub fn request_header(request: &str, name: &str) -> Option<String> {
    request.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key == name).then(|| value.trim().to_string())
    })
}

/// A port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
