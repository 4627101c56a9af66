//! Password authenticator
//!
//! Outgoing messages carry `<ALGO>:<KEYHASH>.<SALT>` in the info line:
//!
//! ```text
//! salt     = H(seed)            (hex, and raw bytes)
//! key      = H(password ++ salt_bytes)
//! key_hash = H(key)             (hex)
//! ```
//!
//! Incoming messages are always checked with MD5, whatever algorithm the
//! sender named. Peers in the wild rely on that behaviour.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{GntpError, Result};

use super::info::{KeyHash, ProtocolInfo};

/// Digest used to derive the key hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Name used in the info line
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Raw digest of `data`
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = GntpError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "MD5" => Ok(HashAlgorithm::Md5),
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            other => Err(GntpError::Unsupported(format!("INVALID HASH \"{}\"", other))),
        }
    }
}

/// Wall-clock seed in `ctime` layout, e.g. `Sat Oct 17 09:30:00 2026`
fn salt_seed() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Derive the key hash for `password` from an explicit seed
pub fn key_hash_from_seed(password: &str, algorithm: HashAlgorithm, seed: &[u8]) -> KeyHash {
    let salt_bytes = algorithm.digest(seed);

    let mut key_basis = Vec::with_capacity(password.len() + salt_bytes.len());
    key_basis.extend_from_slice(password.as_bytes());
    key_basis.extend_from_slice(&salt_bytes);

    let key = algorithm.digest(&key_basis);

    KeyHash {
        algorithm: algorithm.as_str().to_string(),
        hash: hex::encode_upper(algorithm.digest(&key)),
        salt: hex::encode_upper(&salt_bytes),
    }
}

/// Attach (or clear) the key hash of an outgoing message
///
/// An empty or absent password removes any key hash from `info`.
pub fn issue(info: &mut ProtocolInfo, password: Option<&str>, algorithm: HashAlgorithm) {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => {
            let seed = salt_seed();
            info.key_hash = Some(key_hash_from_seed(password, algorithm, seed.as_bytes()));
        }
        None => info.key_hash = None,
    }
}

/// Check an incoming message's key hash against `password`
///
/// A message without a key hash needs no password. Otherwise both sides must
/// be present and the MD5-derived hash must match.
pub fn verify(info: &ProtocolInfo, password: Option<&str>) -> Result<()> {
    let password = password.filter(|p| !p.is_empty());

    let (key_hash, password) = match (&info.key_hash, password) {
        (None, None) => return Ok(()),
        (None, Some(_)) => return Err(GntpError::Auth("Invalid keyHash".to_string())),
        (Some(_), None) => return Err(GntpError::Auth("Missing password".to_string())),
        (Some(key_hash), Some(password)) => (key_hash, password),
    };

    let salt_bytes = hex::decode(&key_hash.salt)
        .map_err(|_| GntpError::Auth(format!("Invalid salt: {}", key_hash.salt)))?;

    let mut key_basis = Vec::with_capacity(password.len() + salt_bytes.len());
    key_basis.extend_from_slice(password.as_bytes());
    key_basis.extend_from_slice(&salt_bytes);

    let key = Md5::digest(&key_basis);
    let candidate = hex::encode(Md5::digest(key));

    if !candidate.eq_ignore_ascii_case(&key_hash.hash) {
        tracing::warn!(algorithm = %key_hash.algorithm, "Key hash mismatch");
        return Err(GntpError::Auth("Invalid Hash".to_string()));
    }

    Ok(())
}
