use sha1::{Digest, Sha1};

/// Hex-encoded SHA1 of an in-memory upload body
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
