// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    Connection,
    Timeout,
    Protocol,
    Validation,
    Io,
}

/// Which response check a `ProbeError::Validation` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCheck {
    Status,
    Upgrade,
    AcceptHeader,
}

#[derive(Debug)]
pub enum ProbeError {
    Connection { target: String, reason: String },
    Timeout { elapsed: Duration },
    Protocol(String),
    Validation {
        check: ValidationCheck,
        expected: String,
        observed: Option<String>,
    },
    Io(std::io::Error),
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            Self::Connection { .. } => ProbeErrorKind::Connection,
            Self::Timeout { .. } => ProbeErrorKind::Timeout,
            Self::Protocol(_) => ProbeErrorKind::Protocol,
            Self::Validation { .. } => ProbeErrorKind::Validation,
            Self::Io(_) => ProbeErrorKind::Io,
        }
    }

    pub(crate) fn connection(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Connection {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { target, reason } => {
                write!(f, "failed to connect to {}: {}", target, reason)
            }
            Self::Timeout { elapsed } => write!(
                f,
                "timed out after {} ms waiting for response headers",
                elapsed.as_millis()
            ),
            Self::Protocol(msg) => write!(f, "{}", msg),
            Self::Validation {
                check: ValidationCheck::Status,
                expected,
                observed,
            } => write!(
                f,
                "expected status {}, got {}",
                expected,
                observed.as_deref().unwrap_or("<missing>")
            ),
            Self::Validation {
                check: ValidationCheck::Upgrade,
                expected,
                observed,
            } => write!(
                f,
                "expected {} response, got '{}'",
                expected,
                observed.as_deref().unwrap_or("")
            ),
            Self::Validation {
                check: ValidationCheck::AcceptHeader,
                expected,
                observed,
            } => write!(
                f,
                "invalid Sec-WebSocket-Accept: expected {} got {}",
                expected,
                observed.as_deref().unwrap_or("<missing>")
            ),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mismatch_message() {
        let err = ProbeError::Validation {
            check: ValidationCheck::Status,
            expected: "200".to_string(),
            observed: Some("404".to_string()),
        };
        assert_eq!(err.to_string(), "expected status 200, got 404");
        assert_eq!(err.kind(), ProbeErrorKind::Validation);
    }

    #[test]
    fn test_accept_mismatch_reports_missing_value() {
        let err = ProbeError::Validation {
            check: ValidationCheck::AcceptHeader,
            expected: "abc=".to_string(),
            observed: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid Sec-WebSocket-Accept: expected abc= got <missing>"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let err: ProbeError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(err.kind(), ProbeErrorKind::Io);
        assert!(err.source().is_some());
    }
}
