//! Protocol Module
//!
//! Leaf codecs for the GNTP wire format.
//!
//! ## Message Layout
//! ```text
//! GNTP/<version> <TYPE> <ENC-ALGO>[:<IV>]|NONE[ <HASH-ALGO>:<KEYHASH>.<SALT>]
//! <Header-Key>: <value>
//! ...
//! <blank line>
//! [notification / resource blocks, each ending in a blank line]
//! <blank line>
//! ```
//!
//! All line terminators are CRLF.

mod auth;
mod codec;
mod headers;
mod info;
mod resource;

pub use auth::{issue, key_hash_from_seed, verify, HashAlgorithm};
pub use codec::{decode_frame, encode_frame, require_headers, split_blocks, Frame};
pub use headers::{check_header_syntax, format_headers, parse_headers, HeaderMap};
pub use info::{
    format_info, parse_info, Encryption, KeyHash, MessageType, ProtocolInfo,
    ERROR_PARSING_INFO_LINE,
};
pub use resource::{encode_resource, extract_resource, Resource, RESOURCE_URL_PREFIX};

/// Line terminator
pub const EOL: &[u8] = b"\r\n";

/// Line terminator as text
pub const EOL_STR: &str = "\r\n";

/// Terminator of a block (end of last line plus a blank line)
pub const BLOCK_SEPARATOR: &[u8] = b"\r\n\r\n";
