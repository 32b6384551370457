// File: response.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::HashMap;

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Decodes response bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_lossy(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Response header fields keyed by trimmed, lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.fields
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    line: String,
}

impl StatusLine {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn has_http11_prefix(&self) -> bool {
        self.line.starts_with(HTTP_VERSION)
    }

    /// The second whitespace-delimited field, unparsed.
    pub fn status_token(&self) -> Option<&str> {
        self.line.split_whitespace().nth(1)
    }

    /// Any integer is accepted, including negative or out-of-range codes.
    pub fn status_code(&self) -> Option<i64> {
        self.status_token()?.parse().ok()
    }
}

/// Status line plus header fields of a decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status_line: StatusLine,
    pub headers: Headers,
}

impl ResponseHead {
    /// Splits on line terminators, takes the first line as the status line and
    /// reads `name: value` lines until the first blank one. Lines without a
    /// colon are skipped; repeated names keep the last value.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

        let status_line = StatusLine::new(lines.next().unwrap_or(""));
        let mut headers = Headers::new();

        for line in lines {
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name, value);
            }
        }

        Self {
            status_line,
            headers,
        }
    }
}
