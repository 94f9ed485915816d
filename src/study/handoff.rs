//! Single-use handoff of a card set into study mode
//!
//! The screen that produced the cards stashes them here, and the study screen
//! takes them exactly once. Taking removes the bundle, so it never outlives
//! the session it was meant for.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::deck::Card;

/// Well-known file name of the pending bundle
pub const HANDOFF_FILE: &str = "study_handoff.json";

/// Cards and topic handed to the next study session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyHandoff {
    pub cards: Vec<Card>,
    pub topic: String,
}

impl StudyHandoff {
    pub fn new(cards: Vec<Card>, topic: impl Into<String>) -> Self {
        Self { cards, topic: topic.into() }
    }
}

/// File-backed slot holding at most one pending handoff
#[derive(Debug, Clone)]
pub struct HandoffStore {
    path: PathBuf,
}

impl HandoffStore {
    /// Store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the application data directory
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::data_dir()?.join(HANDOFF_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stash a bundle, replacing any pending one
    pub fn put(&self, handoff: &StudyHandoff) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string(handoff).with_context(|| "Failed to serialize study handoff")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write study handoff to {:?}", self.path))?;

        tracing::debug!(cards = handoff.cards.len(), topic = %handoff.topic, "study handoff stored");
        Ok(())
    }

    /// Remove and return the pending bundle
    ///
    /// A missing, unreadable or corrupt bundle yields `None`. The file is
    /// removed either way.
    pub fn take(&self) -> Option<StudyHandoff> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read study handoff {:?}: {}", self.path, e);
                self.discard();
                return None;
            }
        };
        self.discard();

        match serde_json::from_str(&contents) {
            Ok(handoff) => Some(handoff),
            Err(e) => {
                tracing::warn!("Discarding corrupt study handoff: {}", e);
                None
            }
        }
    }

    /// Drop any pending bundle
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove study handoff {:?}", self.path))
            }
        }
    }

    /// Whether a bundle is waiting
    pub fn is_pending(&self) -> bool {
        self.path.exists()
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!("{:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{StudyError, StudySession};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HandoffStore {
        HandoffStore::new(dir.path().join("nested").join(HANDOFF_FILE))
    }

    fn bundle() -> StudyHandoff {
        StudyHandoff::new(vec![Card::new("A", "1"), Card::new("B", "2")], "Demo")
    }

    #[test]
    fn put_then_take() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.put(&bundle()).unwrap();
        assert!(store.is_pending());
        assert_eq!(store.take(), Some(bundle()));
    }

    #[test]
    fn take_is_single_use() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.put(&bundle()).unwrap();
        assert!(store.take().is_some());
        assert!(store.take().is_none());
        assert!(!store.is_pending());
    }

    #[test]
    fn put_replaces_pending_bundle() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.put(&bundle()).unwrap();
        let replacement = StudyHandoff::new(vec![Card::new("Z", "26")], "Other");
        store.put(&replacement).unwrap();
        assert_eq!(store.take(), Some(replacement));
    }

    #[test]
    fn corrupt_bundle_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.take().is_none());
        assert!(!store.is_pending());
    }

    #[test]
    fn clear_without_bundle_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).clear().is_ok());
    }

    #[test]
    fn session_from_handoff() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&bundle()).unwrap();

        let session = StudySession::from_handoff(&store).unwrap();
        assert_eq!(session.topic(), "Demo");
        assert_eq!(session.len(), 2);
        assert!(!store.is_pending());
    }

    #[test]
    fn missing_or_corrupt_handoff_is_empty_set() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(StudySession::from_handoff(&store), Err(StudyError::EmptyCardSet));

        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "[]").unwrap();
        assert_eq!(StudySession::from_handoff(&store), Err(StudyError::EmptyCardSet));
    }

    #[test]
    fn empty_bundle_is_empty_set() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.put(&StudyHandoff::new(Vec::new(), "Nothing")).unwrap();
        assert_eq!(StudySession::from_handoff(&store), Err(StudyError::EmptyCardSet));
    }
}
