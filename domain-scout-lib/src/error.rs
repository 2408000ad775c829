//! Error handling for the domain candidate pipeline.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways candidate generation can fail, from invalid input to storage outages.
//! Note that availability resolution deliberately does *not* surface most of
//! these to callers; the resolver degrades through its cascade instead.

use std::fmt;

/// Main error type for domain candidate operations.
#[derive(Debug, Clone)]
pub enum ScoutError {
    /// The query produced no usable keywords
    EmptyQuery,

    /// Invalid domain name format
    InvalidDomain { domain: String, reason: String },

    /// Malformed filter set (bad price range, unknown extension, etc.)
    InvalidFilter { reason: String },

    /// Network-related errors (connection, DNS transport, etc.)
    Network {
        message: String,
        source: Option<String>,
    },

    /// Registry lookup API errors
    Lookup {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// The registry lookup API rejected the request for rate reasons
    RateLimited { service: String },

    /// Presence probe errors (DNS or HTTP reachability)
    Probe { domain: String, message: String },

    /// Result store failures; fatal to a generation call
    Storage { message: String },

    /// Configuration errors (invalid settings, unreadable file, etc.)
    Config { message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl ScoutError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid filter error.
    pub fn invalid_filter<R: Into<String>>(reason: R) -> Self {
        Self::InvalidFilter {
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new registry lookup error.
    pub fn lookup<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new registry lookup error with HTTP status code.
    pub fn lookup_with_status<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new presence probe error.
    pub fn probe<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Probe {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new storage error.
    pub fn storage<M: Into<String>>(message: M) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is an input validation failure.
    ///
    /// Input errors are rejected synchronously and never reach the
    /// resolution pipeline; the HTTP layer maps them to 4xx responses.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::InvalidDomain { .. } | Self::InvalidFilter { .. }
        )
    }

    /// Check if this error indicates the domain is definitely available.
    ///
    /// Some registry lookup failures (a 404 for the domain record) actually
    /// indicate availability rather than an error condition.
    pub fn indicates_available(&self) -> bool {
        matches!(
            self,
            Self::Lookup {
                status_code: Some(404),
                ..
            }
        )
    }
}

impl fmt::Display for ScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => {
                write!(f, "Query contains no usable keywords")
            }
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::InvalidFilter { reason } => {
                write!(f, "Invalid filters: {}", reason)
            }
            Self::Network { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Lookup {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Lookup error for '{}' (HTTP {}): {}", domain, code, message)
                } else {
                    write!(f, "Lookup error for '{}': {}", domain, message)
                }
            }
            Self::RateLimited { service } => {
                write!(f, "Rate limited by {}", service)
            }
            Self::Probe { domain, message } => {
                write!(f, "Probe error for '{}': {}", domain, message)
            }
            Self::Storage { message } => {
                write!(f, "Storage error: {}", message)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoutError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
