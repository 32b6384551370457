// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::time::Duration;

use crate::config::ProbeConfig;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(long = "no-color", help = "Disable colored output", global = true)]
    pub no_color: bool,

    #[arg(
        long = "connect-timeout",
        default_value_t = 2000,
        global = true,
        help = "Connect timeout in milliseconds"
    )]
    pub connect_timeout: u64,

    #[arg(
        long = "read-timeout",
        default_value_t = 2000,
        global = true,
        help = "Total time allowed for reading the response headers, in milliseconds"
    )]
    pub read_timeout: u64,

    #[arg(long = "max-header-bytes", default_value_t = 65536, global = true)]
    pub max_header_bytes: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a GET and check the status code
    Http(HttpArgs),
    /// Perform a WebSocket upgrade and check Sec-WebSocket-Accept
    Ws(TargetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(long)]
    pub host: String,

    #[arg(long)]
    pub port: u16,

    #[arg(long)]
    pub path: String,
}

#[derive(Args, Debug, Clone)]
pub struct HttpArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long = "expect-status")]
    pub expect_status: u16,
}

impl Cli {
    pub fn probe_config(&self) -> ProbeConfig {
        let mut config = ProbeConfig::new();
        config.set_connect_timeout(Duration::from_millis(self.connect_timeout));
        config.set_read_timeout(Duration::from_millis(self.read_timeout));
        config.set_max_header_bytes(self.max_header_bytes);
        config
    }

    /// Unknown level names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}
