//! Request-identity cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request: SHA-256 over method and URL.
///
/// Only GET requests are ever stored, but the method is part of the key
/// so that identity is explicit rather than assumed.
pub fn request_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
