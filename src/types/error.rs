//! Error types for the utility billing engine
//!
//! This module defines all error types that can cross the store boundary.
//!
//! # Error Categories
//!
//! - **I/O errors**: backing file unreadable or unwritable
//! - **Parse errors**: malformed record in a backing file
//! - **Validation failures**: duplicate username/email at registration
//! - **Unknown service**: a service name that matches no known kind where
//!   one is required (tariff updates)
//!
//! Expected conditions are deliberately NOT errors: a lookup miss returns
//! `Option::None`, and a bill whose utility-type string resolves to no
//! known service degrades to a zero price with a logged warning. Nothing in
//! this crate panics past the store boundary.

use thiserror::Error;

/// Main error type for the billing engine
///
/// Each variant carries enough context to diagnose the failure from the
/// message alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    /// I/O error while reading or writing a backing file
    ///
    /// The in-memory state is NOT rolled back when a write fails; the store
    /// stays ahead of the disk until the next successful save.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed record in a backing file
    ///
    /// Recoverable during loads: the offending line is skipped and loading
    /// continues with the next one.
    #[error("parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Registration rejected: the username is already taken
    #[error("username '{username}' already exists")]
    DuplicateUsername {
        /// The username that is already registered
        username: String,
    },

    /// Registration rejected: the email is already taken
    #[error("email address '{email}' already exists")]
    DuplicateEmail {
        /// The email address that is already registered
        email: String,
    },

    /// A service name matched none of the known kinds
    ///
    /// Raised only where a resolved service is required, such as tariff
    /// updates. Bill pricing never raises this; it degrades to zero.
    #[error("unknown service '{name}' (expected electricity, gas or water)")]
    UnknownService {
        /// The unrecognized service name
        name: String,
    },

    /// Login rejected: no customer matches the supplied credentials
    #[error("invalid username or password")]
    InvalidCredentials,
}

// Conversion from io::Error to BillingError
impl From<std::io::Error> for BillingError {
    fn from(error: std::io::Error) -> Self {
        BillingError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BillingError
impl From<csv::Error> for BillingError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        BillingError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BillingError {
    /// Create a Parse error
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        BillingError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username(username: &str) -> Self {
        BillingError::DuplicateUsername {
            username: username.to_string(),
        }
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email(email: &str) -> Self {
        BillingError::DuplicateEmail {
            email: email.to_string(),
        }
    }

    /// Create an UnknownService error
    pub fn unknown_service(name: &str) -> Self {
        BillingError::UnknownService {
            name: name.to_string(),
        }
    }
}
