//! Local document persistence, export, and text statistics.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt document file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no saved document")]
    NotFound,
}

/// Persisted document: the content and when it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDocument {
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

/// Word and paragraph counts of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub words: usize,
    pub paragraphs: usize,
}

/// Count words and paragraphs.
///
/// Words are whitespace-separated runs; paragraphs are runs of
/// non-blank lines separated by blank (or whitespace-only) lines.
pub fn stats(text: &str) -> DocumentStats {
    let words = text.split_whitespace().count();

    let mut paragraphs = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            paragraphs += 1;
            in_paragraph = true;
        }
    }

    DocumentStats { words, paragraphs }
}

/// File-backed store for a single working document.
///
/// One JSON file under the store directory holds the content and its
/// save timestamp; `export` writes a dated plain-text copy for
/// sharing.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

const DOCUMENT_FILE: &str = "document.json";

impl DocumentStore {
    /// Create a store rooted at `dir`. The directory is created on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(DOCUMENT_FILE),
        }
    }

    /// Persist `content`, stamping it with the current time.
    pub fn save(&self, content: &str) -> Result<SavedDocument, StoreError> {
        let document = SavedDocument {
            content: content.to_string(),
            saved_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&document)?)?;
        debug!(path = %self.path.display(), "document saved");

        Ok(document)
    }

    /// Load the saved document, or [`StoreError::NotFound`] if none
    /// was ever saved.
    pub fn load(&self) -> Result<SavedDocument, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Remove the saved document. Clearing an empty store is fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a plain-text copy of the saved document into `dir`,
    /// named `writing-YYYY-MM-DD.txt`, and return its path.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let document = self.load()?;

        let filename = format!("writing-{}.txt", Local::now().format("%Y-%m-%d"));
        let target = dir.join(filename);

        fs::create_dir_all(dir)?;
        fs::write(&target, document.content)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips_content() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());

        store.save("Chapter one.\n\nChapter two.").unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.content, "Chapter one.\n\nChapter two.");
    }

    #[test]
    fn load_without_save_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::NotFound)));
    }

    #[test]
    fn clear_removes_document_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());

        store.save("draft").unwrap();
        store.clear().unwrap();
        assert!(matches!(store.load(), Err(StoreError::NotFound)));
        store.clear().unwrap();
    }

    #[test]
    fn export_writes_dated_text_copy() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());

        store.save("exported text").unwrap();
        let path = store.export(out.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("writing-"));
        assert!(name.ends_with(".txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "exported text");
    }

    #[test]
    fn stats_counts_words_and_paragraphs() {
        let text = "The cat sat.\n\nThe dog  barked loudly.\n   \nEnd.";
        let s = stats(text);
        assert_eq!(s.words, 8);
        assert_eq!(s.paragraphs, 3);
    }

    #[test]
    fn stats_of_empty_text_is_zero() {
        assert_eq!(stats(""), DocumentStats { words: 0, paragraphs: 0 });
        assert_eq!(stats("   \n \n"), DocumentStats { words: 0, paragraphs: 0 });
    }

    #[test]
    fn consecutive_lines_form_one_paragraph() {
        let s = stats("line one\nline two\nline three");
        assert_eq!(s.paragraphs, 1);
        assert_eq!(s.words, 6);
    }
}
