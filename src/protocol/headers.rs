//! Header block codec
//!
//! A header block is a run of `Key: value` lines, each ending in CRLF.
//! Lines that do not have that shape are skipped, and a later duplicate
//! key replaces an earlier one.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{GntpError, Result};

use super::EOL_STR;

/// Mapping from header name to value. Names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: BTreeMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any previous value for the same name
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.entries.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True when the header exists with a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attach the `Origin-*` headers describing the sender
    pub fn add_origin_info(&mut self, config: &Config) {
        let origin = &config.origin;
        self.insert("Origin-Machine-Name", &origin.machine_name);
        self.insert("Origin-Software-Name", &origin.software_name);
        self.insert("Origin-Software-Version", &origin.software_version);
        self.insert("Origin-Platform-Name", &origin.platform_name);
        self.insert("Origin-Platform-Version", &origin.platform_version);
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

fn header_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([\w-]+):(.+)$").expect("header pattern is valid"))
}

fn header_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w-]+$").expect("header key pattern is valid"))
}

/// Fail with a ParseError on the first header that would not parse back as written
///
/// Keys must match `[\w-]+`. Values may not contain CR or LF and may not
/// start or end with whitespace, since the parser trims both ends.
pub fn check_header_syntax(headers: &HeaderMap, context: &str) -> Result<()> {
    for (key, value) in headers.iter() {
        if !header_key_regex().is_match(key) {
            return Err(GntpError::Parse(format!(
                "INVALID_HEADER_NAME {} Header: {:?}",
                context, key
            )));
        }
        if value.contains(['\r', '\n']) || value.trim() != value {
            return Err(GntpError::Parse(format!(
                "INVALID_HEADER_VALUE {} Header: {}",
                context, key
            )));
        }
    }
    Ok(())
}

/// Parse a header block into a map
///
/// Non-UTF-8 bytes are replaced rather than rejected, since a block may sit
/// next to raw resource data.
pub fn parse_headers(block: &[u8]) -> HeaderMap {
    let text = String::from_utf8_lossy(block);
    let re = header_line_regex();

    let mut headers = HeaderMap::new();
    for line in text.split(EOL_STR) {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        headers.insert(caps[1].trim(), caps[2].trim());
    }
    headers
}

/// Format a map as `Key: value` lines, each terminated by CRLF
pub fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(key, value)| format!("{}: {}{}", key, value, EOL_STR))
        .collect()
}
