use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::index::{InvertedIndex, Segment, SegmentManifest};
use crate::models::{Document, DocumentId};

const MANIFEST_FILE: &str = "segment.manifest";
const MANIFEST_TMP_FILE: &str = "segment.manifest.tmp";
const DOCS_FILE: &str = "docs.bin";
const POSTINGS_FILE: &str = "postings.bin";
const SEGMENT_DIR_PREFIX: &str = "segment_";

/// Directory-based persistence for the committed segment
///
/// Commit protocol:
/// 1. Write the new generation's segment files
/// 2. Write `segment.manifest.tmp`
/// 3. Atomic rename over `segment.manifest`
/// 4. Best-effort removal of superseded generation directories
///
/// A crash before step 3 leaves the prior manifest intact, so readers only
/// ever observe a fully committed generation or the previous one.
pub struct SegmentStore {
    base_dir: PathBuf,
}

impl SegmentStore {
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        })
    }

    fn segment_dir(&self, generation: u64) -> PathBuf {
        self.base_dir
            .join(format!("{}{}", SEGMENT_DIR_PREFIX, generation))
    }

    fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(MANIFEST_FILE)
    }

    /// Load the committed manifest; `None` when the store is uninitialized
    pub fn load_manifest(&self) -> Result<Option<SegmentManifest>> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(SegmentManifest::from_json(&bytes)?))
    }

    /// Load the segment referenced by the manifest
    ///
    /// A committed manifest guarantees its segment files exist; a read
    /// failure here is a broken store, not a normal miss.
    pub fn load_segment(&self, manifest: &SegmentManifest) -> Result<Segment> {
        let dir = self.segment_dir(manifest.generation);
        let docs: BTreeMap<DocumentId, Document> =
            bincode::deserialize(&read_segment_file(&dir, DOCS_FILE)?)?;
        let index: InvertedIndex = bincode::deserialize(&read_segment_file(&dir, POSTINGS_FILE)?)?;
        Ok(Segment::from_parts(docs, index))
    }

    /// Persist `segment` as `generation` and publish it via the manifest
    pub fn commit(&self, segment: &Segment, generation: u64) -> Result<SegmentManifest> {
        let dir = self.segment_dir(generation);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(DOCS_FILE), bincode::serialize(segment.docs())?)?;
        fs::write(dir.join(POSTINGS_FILE), bincode::serialize(segment.index())?)?;

        let manifest = SegmentManifest::new(generation, segment.doc_count() as u64);
        let tmp = self.base_dir.join(MANIFEST_TMP_FILE);
        fs::write(&tmp, manifest.to_json()?)?;
        fs::rename(&tmp, self.manifest_path())?;

        debug!(generation, doc_count = manifest.doc_count, "committed segment");

        self.sweep_stale_generations(Some(generation));
        Ok(manifest)
    }

    /// Remove segment directories not referenced by the live manifest
    ///
    /// Covers both superseded generations and leftovers from commits that
    /// crashed before the manifest rename. Best effort: a failed removal
    /// leaves garbage behind but never touches the committed generation.
    pub fn sweep_stale_generations(&self, live_generation: Option<u64>) {
        let Ok(entries) = fs::read_dir(&self.base_dir) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(generation) = name
                .strip_prefix(SEGMENT_DIR_PREFIX)
                .and_then(|g| g.parse::<u64>().ok())
            else {
                continue;
            };
            if Some(generation) != live_generation {
                debug!(generation, "sweeping stale segment directory");
                let _ = fs::remove_dir_all(entry.path());
            }
        }
    }
}

fn read_segment_file(dir: &Path, name: &str) -> Result<Vec<u8>> {
    let path = dir.join(name);
    fs::read(&path).map_err(|e| {
        EngineError::Internal(format!(
            "manifest references missing or unreadable segment file {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenizerConfig;
    use crate::models::{parse_created_date, Field};
    use crate::tokenizer::Tokenizer;
    use tempfile::TempDir;

    fn populated_segment() -> Segment {
        let tokenizer = Tokenizer::new(&TokenizerConfig::default());
        let mut segment = Segment::new();
        segment.insert_document(
            Document {
                id: "d1".to_string(),
                rubrics: "news".to_string(),
                text: "market falls today".to_string(),
                created_date: parse_created_date("2021-01-01 00:00:00").unwrap(),
            },
            &tokenizer,
        );
        segment
    }

    #[test]
    fn test_uninitialized_store_has_no_manifest() {
        let tmp = TempDir::new().unwrap();
        let store = SegmentStore::open(tmp.path()).unwrap();
        assert!(store.load_manifest().unwrap().is_none());
    }

    #[test]
    fn test_commit_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = SegmentStore::open(tmp.path()).unwrap();

        let segment = populated_segment();
        store.commit(&segment, 1).unwrap();

        let manifest = store.load_manifest().unwrap().unwrap();
        assert_eq!(manifest.generation, 1);
        assert_eq!(manifest.doc_count, 1);

        let loaded = store.load_segment(&manifest).unwrap();
        assert_eq!(loaded.doc_count(), 1);
        assert_eq!(loaded.get("d1").unwrap().created_date_str(), "2021-01-01 00:00:00");
        assert!(loaded.index().terms_matching(Field::Text, "market").contains("d1"));
    }

    #[test]
    fn test_commit_supersedes_prior_generation() {
        let tmp = TempDir::new().unwrap();
        let store = SegmentStore::open(tmp.path()).unwrap();

        store.commit(&populated_segment(), 1).unwrap();
        store.commit(&Segment::new(), 2).unwrap();

        let manifest = store.load_manifest().unwrap().unwrap();
        assert_eq!(manifest.generation, 2);
        assert!(!tmp.path().join("segment_1").exists());
        assert!(tmp.path().join("segment_2").exists());
    }

    #[test]
    fn test_missing_segment_file_is_internal_error() {
        let tmp = TempDir::new().unwrap();
        let store = SegmentStore::open(tmp.path()).unwrap();
        store.commit(&populated_segment(), 1).unwrap();

        let manifest = store.load_manifest().unwrap().unwrap();
        fs::remove_file(tmp.path().join("segment_1").join(DOCS_FILE)).unwrap();

        let err = store.load_segment(&manifest).unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
    }

    #[test]
    fn test_sweep_removes_orphan_directories() {
        let tmp = TempDir::new().unwrap();
        let store = SegmentStore::open(tmp.path()).unwrap();

        // Leftover from a commit that never renamed its manifest
        fs::create_dir_all(tmp.path().join("segment_7")).unwrap();
        store.sweep_stale_generations(None);

        assert!(!tmp.path().join("segment_7").exists());
    }
}
