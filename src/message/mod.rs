//! Message Module
//!
//! Typed GNTP messages. Each variant owns its info line, its header map and
//! whatever extra structure it carries, and checks its own required headers
//! before encoding and after decoding.
//!
//! | Variant      | Required headers                                   |
//! |--------------|----------------------------------------------------|
//! | `REGISTER`   | Application-Name, Notifications-Count              |
//! | `NOTIFY`     | Application-Name, Notification-Name, Notification-Title |
//! | `SUBSCRIBE`  | Subscriber-ID, Subscriber-Name                     |
//! | `-OK`        | Response-Action                                    |
//! | `-ERROR`     | Error-Code, Error-Description                      |

mod notify;
mod register;
mod response;
mod subscribe;

pub use notify::Notify;
pub use register::{NotificationDescriptor, Register};
pub use response::{ErrorResponse, OkResponse, Reply};
pub use subscribe::Subscribe;

use crate::error::Result;
use crate::protocol::{HeaderMap, MessageType, ProtocolInfo};

/// Header-level builder calls shared by every variant
macro_rules! impl_headers {
    ($variant:ty) => {
        impl $variant {
            /// Set a header, replacing any previous value
            pub fn add_header(&mut self, key: impl Into<String>, value: impl std::fmt::Display) {
                self.headers.insert(key, value);
            }

            /// Attach the `Origin-*` headers from `config`
            pub fn add_origin_info(&mut self, config: &$crate::config::Config) {
                self.headers.add_origin_info(config);
            }

            /// Use the configured protocol version and origin headers
            pub fn apply_config(&mut self, config: &$crate::config::Config) {
                self.info.version = config.protocol_version.clone();
                self.headers.add_origin_info(config);
            }
        }
    };
}

/// Password handling for variants that carry authentication
macro_rules! impl_password {
    ($variant:ty) => {
        impl $variant {
            /// Attach a key hash derived from `password`; `None` or `""` clears it
            pub fn set_password(
                &mut self,
                password: Option<&str>,
                algorithm: $crate::protocol::HashAlgorithm,
            ) {
                $crate::protocol::issue(&mut self.info, password, algorithm);
            }

            /// Attach a key hash using the algorithm configured in `config`
            pub fn set_password_with(
                &mut self,
                config: &$crate::config::Config,
                password: Option<&str>,
            ) {
                self.set_password(password, config.hash_algorithm);
            }
        }
    };
}

pub(crate) use impl_headers;
pub(crate) use impl_password;

/// Any GNTP message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Register(Register),
    Notify(Notify),
    Subscribe(Subscribe),
    Ok(OkResponse),
    Error(ErrorResponse),
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        self.info().message_type
    }

    pub fn info(&self) -> &ProtocolInfo {
        match self {
            Message::Register(m) => &m.info,
            Message::Notify(m) => &m.info,
            Message::Subscribe(m) => &m.info,
            Message::Ok(m) => &m.info,
            Message::Error(m) => &m.info,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            Message::Register(m) => &m.headers,
            Message::Notify(m) => &m.headers,
            Message::Subscribe(m) => &m.headers,
            Message::Ok(m) => &m.headers,
            Message::Error(m) => &m.headers,
        }
    }

    /// Check the variant's required headers
    pub fn validate(&self) -> Result<()> {
        match self {
            Message::Register(m) => m.validate(),
            Message::Notify(m) => m.validate(),
            Message::Subscribe(m) => m.validate(),
            Message::Ok(m) => m.validate(),
            Message::Error(m) => m.validate(),
        }
    }

    /// Validate and encode to wire bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Message::Register(m) => m.encode(),
            Message::Notify(m) => m.encode(),
            Message::Subscribe(m) => m.encode(),
            Message::Ok(m) => m.encode(),
            Message::Error(m) => m.encode(),
        }
    }

    /// Outcome of a response message; `None` for requests
    pub fn reply(&self) -> Option<Reply<'_>> {
        match self {
            Message::Ok(m) => Some(m.reply()),
            Message::Error(m) => Some(m.reply()),
            _ => None,
        }
    }
}

impl From<Register> for Message {
    fn from(message: Register) -> Self {
        Message::Register(message)
    }
}

impl From<Notify> for Message {
    fn from(message: Notify) -> Self {
        Message::Notify(message)
    }
}

impl From<Subscribe> for Message {
    fn from(message: Subscribe) -> Self {
        Message::Subscribe(message)
    }
}

impl From<OkResponse> for Message {
    fn from(message: OkResponse) -> Self {
        Message::Ok(message)
    }
}

impl From<ErrorResponse> for Message {
    fn from(message: ErrorResponse) -> Self {
        Message::Error(message)
    }
}
