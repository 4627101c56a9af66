//! SUBSCRIBE message

use crate::error::Result;
use crate::protocol::{
    decode_frame, encode_frame, require_headers, HeaderMap, MessageType, ProtocolInfo, Resource,
};

/// Headers every subscription must carry
pub const SUBSCRIBE_REQUIRED_HEADERS: &[&str] = &["Subscriber-ID", "Subscriber-Name"];

/// Request to receive notifications forwarded from a remote machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscribe {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
}

super::impl_headers!(Subscribe);
super::impl_password!(Subscribe);

impl Subscribe {
    pub fn new(subscriber_id: impl Into<String>, subscriber_name: impl Into<String>) -> Self {
        let subscriber_id: String = subscriber_id.into();
        let subscriber_name: String = subscriber_name.into();

        let mut headers = HeaderMap::new();
        headers.insert("Subscriber-ID", subscriber_id);
        headers.insert("Subscriber-Name", subscriber_name);

        Self {
            info: ProtocolInfo::new(MessageType::Subscribe),
            headers,
        }
    }

    /// Port the subscriber listens on for forwarded notifications
    pub fn set_port(&mut self, port: u16) {
        self.headers.insert("Subscriber-Port", port);
    }

    pub fn validate(&self) -> Result<()> {
        require_headers(&self.headers, SUBSCRIBE_REQUIRED_HEADERS, "Subscription")
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        tracing::debug!("Encoding SUBSCRIBE");

        encode_frame(
            &self.info,
            &self.headers,
            std::iter::empty::<&HeaderMap>(),
            std::iter::empty::<&Resource>(),
        )
    }

    /// Decode a subscription, verifying its key hash against `password`
    pub fn decode(raw: &[u8], password: Option<&str>) -> Result<Self> {
        let frame = decode_frame(raw, MessageType::Subscribe, password, true)?;

        let subscribe = Self {
            info: frame.info,
            headers: frame.headers,
        };
        subscribe.validate()?;

        tracing::debug!(
            subscriber = subscribe.headers.get("Subscriber-ID").unwrap_or_default(),
            "Decoded SUBSCRIBE"
        );

        Ok(subscribe)
    }
}
