//! Resource extractor
//!
//! A resource is a binary payload embedded after its own header block:
//!
//! ```text
//! Identifier: <id>\r\n
//! Length: <n>\r\n
//! \r\n
//! <n raw bytes>\r\n
//! \r\n
//! ```
//!
//! The payload is located by searching the raw message for the header block
//! followed by a blank line and taking exactly `Length` bytes after it. The
//! first match wins, so a block whose text also appears earlier in the buffer
//! resolves to the earlier position.

use bytes::Bytes;
use md5::{Digest, Md5};

use crate::error::{GntpError, Result};

use super::headers::{format_headers, HeaderMap};
use super::{BLOCK_SEPARATOR, EOL_STR};

/// Scheme prefix used by headers that reference an embedded resource
pub const RESOURCE_URL_PREFIX: &str = "x-growl-resource://";

/// A named binary payload carried inside a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub identifier: String,
    /// Headers of the resource block (`Identifier`, `Length`, ...)
    pub headers: HeaderMap,
    /// Owned copy of the payload; `data.len()` always equals `Length`
    pub data: Bytes,
}

impl Resource {
    /// Wrap a payload, naming it by the MD5 hex digest of its bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let identifier = hex::encode(Md5::digest(&data));

        let mut headers = HeaderMap::new();
        headers.insert("Identifier", &identifier);
        headers.insert("Length", data.len());

        Self {
            identifier,
            headers,
            data,
        }
    }

    /// URL used to reference this resource from another header
    pub fn url(&self) -> String {
        format!("{}{}", RESOURCE_URL_PREFIX, self.identifier)
    }
}

/// Slice the payload described by `block` out of `raw`
///
/// `block` is the resource header block exactly as it appears in `raw`
/// (without its terminating blank line) and `headers` is its parsed form.
pub fn extract_resource(raw: &[u8], block: &[u8], headers: HeaderMap) -> Result<Resource> {
    let identifier = headers
        .get("Identifier")
        .ok_or_else(|| GntpError::Parse("Missing Resource Header: Identifier".to_string()))?
        .to_string();

    let length_text = headers
        .get("Length")
        .ok_or_else(|| GntpError::Parse("Missing Resource Header: Length".to_string()))?;
    let length: usize = length_text.parse().map_err(|_| {
        GntpError::Parse(format!("INVALID_DATA_LENGTH Invalid length: {}", length_text))
    })?;

    let mut needle = Vec::with_capacity(block.len() + BLOCK_SEPARATOR.len());
    needle.extend_from_slice(block);
    needle.extend_from_slice(BLOCK_SEPARATOR);

    let start = find(raw, &needle)
        .map(|pos| pos + needle.len())
        .ok_or_else(|| {
            GntpError::Parse(format!("INVALID_RESOURCE Identifier not found: {}", identifier))
        })?;

    let available = raw.len() - start;
    if available < length {
        return Err(GntpError::Parse(format!(
            "INVALID_DATA_LENGTH Expected: {} Received {}",
            length, available
        )));
    }

    tracing::trace!(identifier = %identifier, length, offset = start, "Extracted resource");

    Ok(Resource {
        identifier,
        headers,
        data: Bytes::copy_from_slice(&raw[start..start + length]),
    })
}

/// Append one resource block, including its payload and trailing blank line
pub fn encode_resource(resource: &Resource, out: &mut Vec<u8>) {
    out.extend_from_slice(format_headers(&resource.headers).as_bytes());
    out.extend_from_slice(EOL_STR.as_bytes());
    out.extend_from_slice(&resource.data);
    out.extend_from_slice(EOL_STR.as_bytes());
}

/// Position of the first occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
