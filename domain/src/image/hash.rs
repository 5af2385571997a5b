//! Content hashes and the seen-hash set

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// SHA-256 digest of an image's encoded data
///
/// Used only to recognise a generation the user has already been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// 64 lowercase hex characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex characters, for display
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for ContentHash {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(value, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.to_hex()
    }
}

/// Hashes of every image accepted since the prompt last changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenHashes {
    hashes: HashSet<ContentHash>,
}

impl SeenHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.hashes.contains(hash)
    }

    /// Returns false if the hash was already present
    pub fn insert(&mut self, hash: ContentHash) -> bool {
        self.hashes.insert(hash)
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentHash> {
        self.hashes.iter()
    }

    pub fn is_superset(&self, other: &SeenHashes) -> bool {
        self.hashes.is_superset(&other.hashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let hash = ContentHash::of(b"abc");
        assert_eq!(
            hash.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash.short(), "ba7816bf8f01");
    }

    #[test]
    fn test_hex_string_conversion() {
        let hash = ContentHash::of(b"abc");
        let parsed = ContentHash::try_from(hash.to_hex()).unwrap();
        assert_eq!(parsed, hash);
        assert!(ContentHash::try_from("zz".to_string()).is_err());
    }

    #[test]
    fn test_seen_hashes_insert_reports_new_entries() {
        let mut seen = SeenHashes::new();
        let hash = ContentHash::of(b"image");
        assert!(seen.insert(hash));
        assert!(!seen.insert(hash));
        assert!(seen.contains(&hash));
        assert_eq!(seen.len(), 1);

        seen.clear();
        assert!(seen.is_empty());
    }

    #[test]
    fn test_superset() {
        let mut small = SeenHashes::new();
        small.insert(ContentHash::of(b"a"));
        let mut big = small.clone();
        big.insert(ContentHash::of(b"b"));
        assert!(big.is_superset(&small));
        assert!(!small.is_superset(&big));
    }
}
