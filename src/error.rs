//! Error types for GNTP
//!
//! Every failure in the codec is one of three kinds. Each kind maps to a
//! fixed `Error-Code`/`Error-Description` pair so a receiver can always
//! answer a bad message with a protocol-level `-ERROR` response.

use thiserror::Error;

use crate::message::ErrorResponse;

/// Result type alias using GntpError
pub type Result<T> = std::result::Result<T, GntpError>;

/// Unified error type for GNTP operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GntpError {
    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    /// Malformed info line, missing header, bad resource length, unknown type
    #[error("Parse error: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Authentication Errors
    // -------------------------------------------------------------------------
    /// Missing or invalid password / key hash
    #[error("Auth error: {0}")]
    Auth(String),

    // -------------------------------------------------------------------------
    // Feature Errors
    // -------------------------------------------------------------------------
    /// Requested feature (e.g. hash algorithm) is not implemented
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// `Error-Code` sent for authorization failures
pub const ERROR_CODE_AUTH: u16 = 400;

/// `Error-Code` sent for parse failures and unsupported features
pub const ERROR_CODE_INTERNAL: u16 = 500;

impl GntpError {
    /// Numeric code used in the `Error-Code` header
    pub fn error_code(&self) -> u16 {
        match self {
            GntpError::Parse(_) => ERROR_CODE_INTERNAL,
            GntpError::Auth(_) => ERROR_CODE_AUTH,
            GntpError::Unsupported(_) => ERROR_CODE_INTERNAL,
        }
    }

    /// Human readable text used in the `Error-Description` header
    pub fn error_description(&self) -> &'static str {
        match self {
            GntpError::Parse(_) => "Error parsing the message",
            GntpError::Auth(_) => "Error with authorization",
            GntpError::Unsupported(_) => "Currently unsupported",
        }
    }

    /// Build the `-ERROR` message a receiver should send back for this failure
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.error_description())
    }
}
