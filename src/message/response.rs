//! Response messages
//!
//! `-OK` and `-ERROR` answer a request. Neither carries authentication.

use crate::error::Result;
use crate::protocol::{
    decode_frame, encode_frame, require_headers, HeaderMap, MessageType, ProtocolInfo, Resource,
};

/// Headers every OK response must carry
pub const OK_REQUIRED_HEADERS: &[&str] = &["Response-Action"];

/// Headers every error response must carry
pub const ERROR_REQUIRED_HEADERS: &[&str] = &["Error-Code", "Error-Description"];

/// Outcome carried by a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// Request accepted; holds the `Response-Action`
    Accepted(&'a str),

    /// Request rejected; holds `Error-Code` and `Error-Description`
    Rejected { code: &'a str, description: &'a str },
}

/// Positive response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OkResponse {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
}

super::impl_headers!(OkResponse);

impl OkResponse {
    /// Response acknowledging `action` (e.g. `REGISTER`, `NOTIFY`)
    pub fn new(action: impl Into<String>) -> Self {
        let action: String = action.into();
        let mut headers = HeaderMap::new();
        headers.insert("Response-Action", action);

        Self {
            info: ProtocolInfo::new(MessageType::Ok),
            headers,
        }
    }

    pub fn action(&self) -> Option<&str> {
        self.headers.get("Response-Action")
    }

    pub fn reply(&self) -> Reply<'_> {
        Reply::Accepted(self.action().unwrap_or_default())
    }

    pub fn validate(&self) -> Result<()> {
        require_headers(&self.headers, OK_REQUIRED_HEADERS, "Response")
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        tracing::debug!(action = self.action().unwrap_or_default(), "Encoding -OK");

        encode_frame(
            &self.info,
            &self.headers,
            std::iter::empty::<&HeaderMap>(),
            std::iter::empty::<&Resource>(),
        )
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        let frame = decode_frame(raw, MessageType::Ok, None, false)?;

        let ok = Self {
            info: frame.info,
            headers: frame.headers,
        };
        ok.validate()?;

        tracing::debug!(action = ok.action().unwrap_or_default(), "Decoded -OK");
        Ok(ok)
    }
}

/// Negative response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
}

super::impl_headers!(ErrorResponse);

impl ErrorResponse {
    pub fn new(code: u16, description: impl Into<String>) -> Self {
        let description: String = description.into();
        let mut headers = HeaderMap::new();
        headers.insert("Error-Code", code);
        headers.insert("Error-Description", description);

        Self {
            info: ProtocolInfo::new(MessageType::Error),
            headers,
        }
    }

    /// `Error-Code` and `Error-Description` as sent
    pub fn error(&self) -> (&str, &str) {
        (
            self.headers.get("Error-Code").unwrap_or_default(),
            self.headers.get("Error-Description").unwrap_or_default(),
        )
    }

    /// `Error-Code` as a number, if it is one
    pub fn code(&self) -> Option<u16> {
        self.headers.get("Error-Code")?.parse().ok()
    }

    pub fn reply(&self) -> Reply<'_> {
        let (code, description) = self.error();
        Reply::Rejected { code, description }
    }

    pub fn validate(&self) -> Result<()> {
        require_headers(&self.headers, ERROR_REQUIRED_HEADERS, "Error")
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        tracing::debug!(code = self.error().0, "Encoding -ERROR");

        encode_frame(
            &self.info,
            &self.headers,
            std::iter::empty::<&HeaderMap>(),
            std::iter::empty::<&Resource>(),
        )
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        let frame = decode_frame(raw, MessageType::Error, None, false)?;

        let error = Self {
            info: frame.info,
            headers: frame.headers,
        };
        error.validate()?;

        tracing::debug!(code = error.error().0, "Decoded -ERROR");
        Ok(error)
    }
}
