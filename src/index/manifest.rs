use std::io;

use serde::{Deserialize, Serialize};

/// Manifest describing the committed segment generation
///
/// The manifest is the single source of truth for what is committed: a
/// segment directory not referenced here does not exist as far as readers
/// are concerned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentManifest {
    /// Manifest format version (for format upgrades)
    pub version: u32,
    /// Committed generation; segment files live in `segment_<generation>/`
    pub generation: u64,
    /// Live documents in the committed segment
    pub doc_count: u64,
    /// Unix timestamp of the last commit
    pub updated_at: u64,
}

impl SegmentManifest {
    /// Current manifest format version
    pub const VERSION: u32 = 1;

    pub fn new(generation: u64, doc_count: u64) -> Self {
        Self {
            version: Self::VERSION,
            generation,
            doc_count,
            updated_at: current_timestamp(),
        }
    }

    /// Serialize the manifest to JSON
    pub fn to_json(&self) -> io::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Deserialize manifest from JSON
    pub fn from_json(data: &[u8]) -> io::Result<Self> {
        serde_json::from_slice(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Get current Unix timestamp in seconds
fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_round_trip() {
        let manifest = SegmentManifest::new(3, 42);
        assert_eq!(manifest.version, SegmentManifest::VERSION);

        let json = manifest.to_json().unwrap();
        let restored = SegmentManifest::from_json(&json).unwrap();
        assert_eq!(restored, manifest);
    }

    #[test]
    fn test_manifest_rejects_garbage() {
        assert!(SegmentManifest::from_json(b"not json").is_err());
        assert!(SegmentManifest::from_json(b"{}").is_err());
    }
}
