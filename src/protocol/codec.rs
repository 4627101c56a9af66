//! Frame codec
//!
//! Shared encode/decode steps used by every message variant. A frame is the
//! info line, the main header block, and any number of further blocks, each
//! block ending in a blank line.

use crate::error::{GntpError, Result};

use super::auth;
use super::headers::{check_header_syntax, format_headers, parse_headers, HeaderMap};
use super::info::{format_info, parse_info, MessageType, ProtocolInfo};
use super::resource::{encode_resource, Resource};
use super::{BLOCK_SEPARATOR, EOL_STR};

/// A decoded frame still borrowing its trailing blocks from the raw buffer
#[derive(Debug)]
pub struct Frame<'a> {
    pub info: ProtocolInfo,
    pub headers: HeaderMap,
    /// Non-blank blocks after the main header block, in wire order
    pub blocks: Vec<&'a [u8]>,
}

/// Split `raw` on blank lines
pub fn split_blocks(raw: &[u8]) -> Vec<&[u8]> {
    let mut blocks = Vec::new();
    let mut rest = raw;

    while let Some(pos) = rest
        .windows(BLOCK_SEPARATOR.len())
        .position(|w| w == BLOCK_SEPARATOR)
    {
        blocks.push(&rest[..pos]);
        rest = &rest[pos + BLOCK_SEPARATOR.len()..];
    }
    blocks.push(rest);

    blocks
}

/// Decode the info line and main header block of `raw`
///
/// When `authenticate` is set the key hash is verified against `password`
/// before any header is read.
pub fn decode_frame<'a>(
    raw: &'a [u8],
    expected: MessageType,
    password: Option<&str>,
    authenticate: bool,
) -> Result<Frame<'a>> {
    let info = parse_info(raw)?;
    if info.message_type != expected {
        return Err(GntpError::Parse(format!(
            "INVALID_MESSAGE_TYPE Expected: {} Received {}",
            expected, info.message_type
        )));
    }

    if authenticate {
        auth::verify(&info, password)?;
    }

    let mut parts = split_blocks(raw).into_iter();
    let headers = parts.next().map(parse_headers).unwrap_or_default();
    let blocks = parts
        .filter(|part| !part.iter().all(u8::is_ascii_whitespace))
        .collect();

    Ok(Frame {
        info,
        headers,
        blocks,
    })
}

/// Encode a full frame
///
/// `blocks` are written after the main headers, then each resource. Every
/// header is checked first so that builder input cannot add lines or blocks.
pub fn encode_frame<'a>(
    info: &ProtocolInfo,
    headers: &HeaderMap,
    blocks: impl IntoIterator<Item = &'a HeaderMap>,
    resources: impl IntoIterator<Item = &'a Resource>,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    check_header_syntax(headers, "Message")?;
    out.extend_from_slice(format_info(info).as_bytes());
    out.extend_from_slice(EOL_STR.as_bytes());
    out.extend_from_slice(format_headers(headers).as_bytes());

    for block in blocks {
        check_header_syntax(block, "Notification")?;
        out.extend_from_slice(EOL_STR.as_bytes());
        out.extend_from_slice(format_headers(block).as_bytes());
    }

    for resource in resources {
        check_header_syntax(&resource.headers, "Resource")?;
        out.extend_from_slice(EOL_STR.as_bytes());
        encode_resource(resource, &mut out);
    }

    out.extend_from_slice(EOL_STR.as_bytes());
    Ok(out)
}

/// Fail with a ParseError naming the first required header that is missing
pub fn require_headers(headers: &HeaderMap, required: &[&str], context: &str) -> Result<()> {
    match required.iter().find(|name| !headers.has_value(name)) {
        Some(missing) => Err(GntpError::Parse(format!(
            "Missing {} Header: {}",
            context, missing
        ))),
        None => Ok(()),
    }
}
