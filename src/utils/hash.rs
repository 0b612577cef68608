//! Short URL hash derivation.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const HASH_LEN: usize = 8;

/// Derives the short URL hash of an already normalized URL.
///
/// The hash is the first [`HASH_LEN`] hex characters of the SHA-256 digest, so
/// the same target always maps to the same short URL.
pub fn short_hash(normalized_url: &str) -> String {
    let digest = Sha256::digest(normalized_url.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_LEN);
    encoded
}

/// Whether `candidate` has the shape of a hash produced by [`short_hash`].
pub fn is_valid_hash(candidate: &str) -> bool {
    candidate.len() == HASH_LEN && candidate.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
