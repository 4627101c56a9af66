//! REGISTER message
//!
//! Announces an application and the notification types it may send. Each
//! notification type travels in its own header block after the main headers.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::{
    decode_frame, encode_frame, extract_resource, parse_headers, require_headers, HeaderMap,
    MessageType, ProtocolInfo, Resource,
};

/// Headers every registration must carry
pub const REGISTER_REQUIRED_HEADERS: &[&str] = &["Application-Name", "Notifications-Count"];

/// Headers every notification descriptor must carry
pub const NOTIFICATION_REQUIRED_HEADERS: &[&str] = &["Notification-Name"];

/// One registrable notification type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationDescriptor {
    pub headers: HeaderMap,
}

impl NotificationDescriptor {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        let name: String = name.into();
        let mut headers = HeaderMap::new();
        headers.insert("Notification-Name", name);
        headers.insert("Notification-Enabled", if enabled { "True" } else { "False" });
        Self { headers }
    }

    pub fn name(&self) -> Option<&str> {
        self.headers.get("Notification-Name")
    }

    /// Whether the receiver should enable this type by default
    pub fn enabled(&self) -> bool {
        self.headers
            .get("Notification-Enabled")
            .map(|v| {
                ["true", "yes", "1"]
                    .iter()
                    .any(|t| v.eq_ignore_ascii_case(t))
            })
            .unwrap_or(false)
    }
}

/// A GNTP registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
    pub notifications: Vec<NotificationDescriptor>,
    /// Embedded resources by identifier
    pub resources: BTreeMap<String, Resource>,
}

super::impl_headers!(Register);
super::impl_password!(Register);

impl Register {
    /// Registration for `application_name` with no notifications yet
    pub fn new(application_name: impl Into<String>) -> Self {
        let application_name: String = application_name.into();
        let mut headers = HeaderMap::new();
        headers.insert("Application-Name", application_name);
        headers.insert("Notifications-Count", 0);

        Self {
            info: ProtocolInfo::new(MessageType::Register),
            headers,
            notifications: Vec::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Registration advertising `notifications`, enabling those in `defaults`
    ///
    /// Every notification is enabled when `defaults` is empty.
    pub fn with_notifications<S: AsRef<str>>(
        application_name: impl Into<String>,
        notifications: &[S],
        defaults: &[S],
    ) -> Self {
        let mut register = Self::new(application_name);
        for name in notifications {
            let name = name.as_ref();
            let enabled = defaults.is_empty() || defaults.iter().any(|d| d.as_ref() == name);
            register.add_notification(name, enabled);
        }
        register
    }

    /// Add a notification type and update `Notifications-Count`
    pub fn add_notification(&mut self, name: impl Into<String>, enabled: bool) {
        self.notifications
            .push(NotificationDescriptor::new(name, enabled));
        self.headers
            .insert("Notifications-Count", self.notifications.len());
    }

    /// Embed a binary resource and return the URL that references it
    pub fn add_resource(&mut self, data: impl Into<Bytes>) -> String {
        let resource = Resource::new(data);
        let url = resource.url();
        self.resources.insert(resource.identifier.clone(), resource);
        url
    }

    pub fn validate(&self) -> Result<()> {
        require_headers(&self.headers, REGISTER_REQUIRED_HEADERS, "Registration")?;
        for notice in &self.notifications {
            require_headers(&notice.headers, NOTIFICATION_REQUIRED_HEADERS, "Notification")?;
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.validate()?;
        tracing::debug!(
            notifications = self.notifications.len(),
            resources = self.resources.len(),
            "Encoding REGISTER"
        );

        encode_frame(
            &self.info,
            &self.headers,
            self.notifications.iter().map(|n| &n.headers),
            self.resources.values(),
        )
    }

    /// Decode a registration, verifying its key hash against `password`
    pub fn decode(raw: &[u8], password: Option<&str>) -> Result<Self> {
        let frame = decode_frame(raw, MessageType::Register, password, true)?;

        let mut register = Self {
            info: frame.info,
            headers: frame.headers,
            notifications: Vec::new(),
            resources: BTreeMap::new(),
        };

        for block in frame.blocks {
            let headers = parse_headers(block);
            if headers.has_value("Notification-Name") {
                register.notifications.push(NotificationDescriptor { headers });
            } else if headers.has_value("Identifier") {
                let resource = extract_resource(raw, block, headers)?;
                register
                    .resources
                    .insert(resource.identifier.clone(), resource);
            } else {
                tracing::trace!(len = block.len(), "Skipping unrecognized block");
            }
        }

        register.validate()?;
        tracing::debug!(
            notifications = register.notifications.len(),
            resources = register.resources.len(),
            "Decoded REGISTER"
        );

        Ok(register)
    }
}
