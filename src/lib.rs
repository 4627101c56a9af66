//! # GNTP
//!
//! Codec for the Growl Notification Transport Protocol:
//! - Info line parsing/formatting (version, type, encryption, key hash)
//! - `Key: value` header blocks
//! - Binary resources embedded by exact byte length
//! - Salted key-hash password authentication (MD5, SHA1, SHA256, SHA512)
//! - Typed REGISTER / NOTIFY / SUBSCRIBE / -OK / -ERROR messages
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                            │
//! │              (peek message type → variant decode)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Message Model & Validator                  │
//! │     Register │ Notify │ Subscribe │ OkResponse │ ErrorResponse│
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!     ┌──────────┬──────┴─────┬──────────────┐
//!     ▼          ▼            ▼              ▼
//! ┌────────┐ ┌─────────┐ ┌──────────┐ ┌─────────────┐
//! │  Info  │ │ Headers │ │ Resource │ │    Auth     │
//! │  line  │ │  block  │ │ extractor│ │ (key hash)  │
//! └────────┘ └─────────┘ └──────────┘ └─────────────┘
//! ```
//!
//! The codec performs no I/O. Sending bytes and reading replies is left to
//! the caller's transport.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod message;
pub mod dispatch;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GntpError, Result};
pub use config::Config;
pub use dispatch::parse_gntp;
pub use message::{ErrorResponse, Message, Notify, OkResponse, Register, Subscribe};
pub use protocol::{HashAlgorithm, HeaderMap, MessageType, ProtocolInfo, Resource};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GNTP version written into outgoing info lines
pub const PROTOCOL_VERSION: &str = "1.0";
