//! NOTIFY message

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{GntpError, Result};
use crate::protocol::{
    decode_frame, encode_frame, extract_resource, parse_headers, require_headers, HeaderMap,
    MessageType, ProtocolInfo, Resource,
};

/// Headers every notification must carry
pub const NOTIFY_REQUIRED_HEADERS: &[&str] =
    &["Application-Name", "Notification-Name", "Notification-Title"];

/// A single notification sent by a registered application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notify {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
    /// Embedded resources by identifier
    pub resources: BTreeMap<String, Resource>,
}

super::impl_headers!(Notify);
super::impl_password!(Notify);

impl Notify {
    pub fn new(
        application_name: impl Into<String>,
        notification_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let application_name: String = application_name.into();
        let notification_name: String = notification_name.into();
        let title: String = title.into();

        let mut headers = HeaderMap::new();
        headers.insert("Application-Name", application_name);
        headers.insert("Notification-Name", notification_name);
        headers.insert("Notification-Title", title);

        Self {
            info: ProtocolInfo::new(MessageType::Notify),
            headers,
            resources: BTreeMap::new(),
        }
    }

    /// Body text of the notification
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        self.headers.insert("Notification-Text", text);
    }

    /// Icon URL, or a resource URL returned by [`Notify::add_resource`]
    pub fn set_icon(&mut self, icon: impl Into<String>) {
        let icon: String = icon.into();
        self.headers.insert("Notification-Icon", icon);
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.headers
            .insert("Notification-Sticky", if sticky { "True" } else { "False" });
    }

    /// Priority from -2 (very low) to 2 (emergency)
    pub fn set_priority(&mut self, priority: i8) -> Result<()> {
        if !(-2..=2).contains(&priority) {
            return Err(GntpError::Parse(format!(
                "INVALID_PRIORITY Expected -2..=2 Received {}",
                priority
            )));
        }
        self.headers.insert("Notification-Priority", priority);
        Ok(())
    }

    /// Embed a binary resource and return the URL that references it
    pub fn add_resource(&mut self, data: impl Into<Bytes>) -> String {
        let resource = Resource::new(data);
        let url = resource.url();
        self.resources.insert(resource.identifier.clone(), resource);
        url
    }

    pub fn validate(&self) -> Result<()> {
        require_headers(&self.headers, NOTIFY_REQUIRED_HEADERS, "Notification")
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        tracing::debug!(
            notification = self.headers.get("Notification-Name").unwrap_or_default(),
            resources = self.resources.len(),
            "Encoding NOTIFY"
        );

        encode_frame(
            &self.info,
            &self.headers,
            std::iter::empty::<&HeaderMap>(),
            self.resources.values(),
        )
    }

    /// Decode a notification, verifying its key hash against `password`
    pub fn decode(raw: &[u8], password: Option<&str>) -> Result<Self> {
        let frame = decode_frame(raw, MessageType::Notify, password, true)?;

        let mut resources = BTreeMap::new();
        for block in frame.blocks {
            let headers = parse_headers(block);
            if headers.has_value("Identifier") {
                let resource = extract_resource(raw, block, headers)?;
                resources.insert(resource.identifier.clone(), resource);
            }
        }

        let notify = Self {
            info: frame.info,
            headers: frame.headers,
            resources,
        };
        notify.validate()?;

        tracing::debug!(
            notification = notify.headers.get("Notification-Name").unwrap_or_default(),
            resources = notify.resources.len(),
            "Decoded NOTIFY"
        );

        Ok(notify)
    }
}
