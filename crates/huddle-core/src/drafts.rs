//! Draft persistence.
//!
//! The editor saves into a single named slot holding raw text: no schema,
//! no versioning, save overwrites. [`FileDraftSlot`] is the production
//! implementation; [`MemoryDraftSlot`] backs tests and ephemeral sessions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from draft persistence.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("failed to read draft at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write draft at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Single named storage slot for the editor's draft text.
pub trait DraftSlot {
    /// Overwrite the slot with `text`.
    fn save(&mut self, text: &str) -> Result<(), DraftError>;

    /// The stored text, or `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<String>, DraftError>;

    fn exists(&self) -> bool;
}

/// Draft slot backed by a single file under the data directory.
pub struct FileDraftSlot {
    path: PathBuf,
}

impl FileDraftSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftSlot for FileDraftSlot {
    fn save(&mut self, text: &str) -> Result<(), DraftError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| DraftError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| DraftError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn load(&self) -> Result<Option<String>, DraftError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|source| DraftError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// In-memory slot for tests.
#[derive(Debug, Default)]
pub struct MemoryDraftSlot {
    slot: Option<String>,
}

impl MemoryDraftSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftSlot for MemoryDraftSlot {
    fn save(&mut self, text: &str) -> Result<(), DraftError> {
        self.slot = Some(text.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, DraftError> {
        Ok(self.slot.clone())
    }

    fn exists(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_slot_round_trips_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = FileDraftSlot::new(dir.path().join("draft.md"));

        assert!(!slot.exists());
        assert_eq!(slot.load().unwrap(), None);

        slot.save("# notes\n\nwith **markup** kept verbatim").unwrap();
        assert!(slot.exists());
        assert_eq!(
            slot.load().unwrap().as_deref(),
            Some("# notes\n\nwith **markup** kept verbatim")
        );
    }

    #[test]
    fn test_file_slot_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = FileDraftSlot::new(dir.path().join("draft.md"));
        slot.save("first").unwrap();
        slot.save("second").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_slot_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("huddle").join("draft.md");
        let mut slot = FileDraftSlot::new(&nested);
        slot.save("body").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_memory_slot_round_trips() {
        let mut slot = MemoryDraftSlot::new();
        assert_eq!(slot.load().unwrap(), None);
        slot.save("x").unwrap();
        assert!(slot.exists());
        assert_eq!(slot.load().unwrap().as_deref(), Some("x"));
    }
}
