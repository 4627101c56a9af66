//! Dispatcher
//!
//! Routes a raw buffer to the decoder for its declared message type.

use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::error::{GntpError, Result};
use crate::message::{ErrorResponse, Message, Notify, OkResponse, Register, Subscribe};
use crate::protocol::MessageType;

fn message_type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i-u)^GNTP/\d+\.\d+ (REGISTER|NOTIFY|SUBSCRIBE|-OK|-ERROR)")
            .expect("message type pattern is valid")
    })
}

/// Message type declared by `raw`, read from the start of the info line only
pub fn peek_message_type(raw: &[u8]) -> Result<MessageType> {
    let caps = message_type_regex()
        .captures(raw)
        .ok_or_else(|| GntpError::Parse("INVALID_GNTP_INFO".to_string()))?;

    let token = std::str::from_utf8(&caps[1])
        .map_err(|_| GntpError::Parse("INVALID_GNTP_INFO".to_string()))?;
    token.parse()
}

/// Decode any GNTP message
///
/// `password` is checked for REGISTER, NOTIFY and SUBSCRIBE; responses are
/// never authenticated.
pub fn parse_gntp(raw: &[u8], password: Option<&str>) -> Result<Message> {
    let message_type = peek_message_type(raw)?;
    tracing::trace!(%message_type, len = raw.len(), "Dispatching message");

    let message = match message_type {
        MessageType::Register => Register::decode(raw, password)?.into(),
        MessageType::Notify => Notify::decode(raw, password)?.into(),
        MessageType::Subscribe => Subscribe::decode(raw, password)?.into(),
        MessageType::Ok => OkResponse::decode(raw)?.into(),
        MessageType::Error => ErrorResponse::decode(raw)?.into(),
    };

    Ok(message)
}

impl Message {
    /// Decode any GNTP message, see [`parse_gntp`]
    pub fn decode(raw: &[u8], password: Option<&str>) -> Result<Self> {
        parse_gntp(raw, password)
    }
}
