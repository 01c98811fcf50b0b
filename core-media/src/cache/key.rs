//! Cache key derivation

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Map key derived from a source URL.
///
/// Distinct URLs may collapse to the same key once padding and the `+`/`/`
/// symbols are filtered out; such collisions are not detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Standard base64 of the URL's UTF-8 bytes, keeping only `[A-Za-z0-9]`.
///
/// Accepts any string, including the empty one.
pub fn derive_key(url: &str) -> CacheKey {
    let encoded = STANDARD.encode(url.as_bytes());
    CacheKey(
        encoded
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect(),
    )
}
