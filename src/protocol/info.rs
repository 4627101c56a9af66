//! Info line codec
//!
//! The first line of every message:
//!
//! ```text
//! GNTP/<version> <TYPE> <ENC-ALGO>[:<IV>]|NONE[ <HASH-ALGO>:<KEYHASH>.<SALT>]\r\n
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{GntpError, Result};
use crate::PROTOCOL_VERSION;

use super::EOL;

/// Diagnostic carried by the ParseError for a malformed info line
pub const ERROR_PARSING_INFO_LINE: &str = "ERROR_PARSING_INFO_LINE";

/// Message type token of the info line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Register,
    Notify,
    Subscribe,
    Ok,
    Error,
}

impl MessageType {
    /// Wire token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Register => "REGISTER",
            MessageType::Notify => "NOTIFY",
            MessageType::Subscribe => "SUBSCRIBE",
            MessageType::Ok => "-OK",
            MessageType::Error => "-ERROR",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = GntpError;

    /// Case-insensitive match against the wire tokens
    fn from_str(token: &str) -> Result<Self> {
        [
            MessageType::Register,
            MessageType::Notify,
            MessageType::Subscribe,
            MessageType::Ok,
            MessageType::Error,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(token))
        .ok_or_else(|| GntpError::Parse(format!("INVALID_GNTP_MESSAGE: {}", token)))
    }
}

/// Encryption clause. The iv can only exist alongside an algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encryption {
    pub algorithm: String,
    pub iv: Option<String>,
}

/// Key hash clause. Algorithm, hash and salt always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHash {
    pub algorithm: String,
    pub hash: String,
    pub salt: String,
}

/// Protocol metadata carried by the info line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolInfo {
    pub version: String,
    pub message_type: MessageType,
    /// `None` is written as the literal `NONE`
    pub encryption: Option<Encryption>,
    pub key_hash: Option<KeyHash>,
}

impl ProtocolInfo {
    /// Info for an unauthenticated, unencrypted message
    pub fn new(message_type: MessageType) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            message_type,
            encryption: None,
            key_hash: None,
        }
    }

    pub fn encryption_algorithm_id(&self) -> Option<&str> {
        self.encryption.as_ref().map(|e| e.algorithm.as_str())
    }

    pub fn iv_value(&self) -> Option<&str> {
        self.encryption.as_ref().and_then(|e| e.iv.as_deref())
    }

    pub fn key_hash_algorithm_id(&self) -> Option<&str> {
        self.key_hash.as_ref().map(|k| k.algorithm.as_str())
    }

    pub fn key_hash(&self) -> Option<&str> {
        self.key_hash.as_ref().map(|k| k.hash.as_str())
    }

    pub fn salt(&self) -> Option<&str> {
        self.key_hash.as_ref().map(|k| k.salt.as_str())
    }
}

fn info_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^GNTP/(?P<version>\d+\.\d+) (?P<type>REGISTER|NOTIFY|SUBSCRIBE|-OK|-ERROR) (?P<enc>[A-Z0-9]+)(?::(?P<iv>[A-F0-9]+))? ?(?:(?P<hashalgo>[A-Z0-9]+):(?P<keyhash>[A-F0-9]+)\.(?P<salt>[A-F0-9]+))?\r\n",
        )
        .expect("info line pattern is valid")
    })
}

/// Parse the info line at the start of `raw`
pub fn parse_info(raw: &[u8]) -> Result<ProtocolInfo> {
    // Only the first line has to be text; resources later on may be binary.
    let end = raw
        .windows(EOL.len())
        .position(|w| w == EOL)
        .map(|pos| pos + EOL.len())
        .ok_or_else(|| GntpError::Parse(ERROR_PARSING_INFO_LINE.to_string()))?;
    let line = std::str::from_utf8(&raw[..end])
        .map_err(|_| GntpError::Parse(ERROR_PARSING_INFO_LINE.to_string()))?;

    let caps = info_line_regex()
        .captures(line)
        .ok_or_else(|| GntpError::Parse(ERROR_PARSING_INFO_LINE.to_string()))?;

    let message_type: MessageType = caps["type"].parse()?;

    let encryption = match &caps["enc"] {
        enc if enc.eq_ignore_ascii_case("NONE") => None,
        enc => Some(Encryption {
            algorithm: enc.to_string(),
            iv: caps.name("iv").map(|m| m.as_str().to_string()),
        }),
    };

    let key_hash = match (caps.name("hashalgo"), caps.name("keyhash"), caps.name("salt")) {
        (Some(algorithm), Some(hash), Some(salt)) => Some(KeyHash {
            algorithm: algorithm.as_str().to_string(),
            hash: hash.as_str().to_string(),
            salt: salt.as_str().to_string(),
        }),
        _ => None,
    };

    Ok(ProtocolInfo {
        version: caps["version"].to_string(),
        message_type,
        encryption,
        key_hash,
    })
}

/// Format the info line, without its trailing line terminator
pub fn format_info(info: &ProtocolInfo) -> String {
    let mut line = format!("GNTP/{} {}", info.version, info.message_type);

    match &info.encryption {
        Some(Encryption { algorithm, iv: Some(iv) }) => {
            line.push_str(&format!(" {}:{}", algorithm, iv));
        }
        Some(Encryption { algorithm, iv: None }) => {
            line.push(' ');
            line.push_str(algorithm);
        }
        None => line.push_str(" NONE"),
    }

    if let Some(key_hash) = &info.key_hash {
        line.push_str(&format!(
            " {}:{}.{}",
            key_hash.algorithm, key_hash.hash, key_hash.salt
        ));
    }

    line
}
