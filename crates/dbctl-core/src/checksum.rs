//! SHA-256 content hash for change log entries.

use sha2::{Digest, Sha256};

/// Compute the hex-encoded SHA-256 digest of raw script bytes
pub fn compute_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{:x}", result)
}
