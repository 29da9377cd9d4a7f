//! Short code derivation
//!
//! A short code is the first 8 lowercase hex characters of the SHA-256
//! digest of the target URL. Identical URLs always map to the same code,
//! so no counter or sequence allocator is needed.

use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Number of hex characters kept from the digest.
pub const SHORT_CODE_LEN: usize = 8;

/// Identifier under which a URL mapping is stored.
///
/// Codes are not globally unique: two different URLs sharing a digest
/// prefix derive the same code and overwrite each other in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Derives the short code for `url`.
    ///
    /// Pure and deterministic; accepts any string, including an empty one.
    pub fn derive(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        let mut hex = format!("{:x}", digest);
        hex.truncate(SHORT_CODE_LEN);
        Self(hex)
    }

    /// Wraps a code taken from a request path.
    ///
    /// No format check is done here: a code that was never derived simply
    /// isn't present in the store.
    pub fn from_raw(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full short URL under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
