//! File IO: the `Storage` seam and the startup open logic.
//!
//! Storage is synchronous and whole-file: load reads every byte, save truncates and writes
//! the serialized document. Failures are values (`StorageError`); the session turns them into
//! message-line text.

use core_state::EditorState;
use core_text::{Document, Limits};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait Storage {
    fn load(&self, path: &Path) -> Result<Vec<u8>, StorageError>;
    /// Replace the file at `path` with `bytes`, creating it if needed.
    fn save(&mut self, path: &Path, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Local filesystem storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn load(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        std::fs::read(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(path.to_path_buf())
            } else {
                StorageError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    fn save(&mut self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(path, bytes).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// State produced at startup plus a message describing anything unusual about the open.
#[derive(Debug)]
pub struct Opened {
    pub state: EditorState,
    pub notice: Option<String>,
}

/// Build the initial state for `path`.
///
/// A missing file starts an empty document that keeps the name, so the first save creates
/// it. Any other read failure starts an unnamed empty document.
pub fn open_state<St: Storage + ?Sized>(
    storage: &St,
    path: Option<&Path>,
    limits: Limits,
) -> Opened {
    let Some(path) = path else {
        return Opened {
            state: EditorState::new(Document::new(limits)),
            notice: None,
        };
    };
    match storage.load(path) {
        Ok(bytes) => {
            let document = Document::from_text(&bytes, limits);
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = bytes.len(),
                line_count = document.line_count(),
                "file_read_ok"
            );
            let mut state = EditorState::new(document);
            state.file_name = Some(path.to_path_buf());
            Opened {
                state,
                notice: None,
            }
        }
        Err(StorageError::NotFound(p)) => {
            tracing::info!(target: "io", file = %p.display(), "new_file");
            let mut state = EditorState::new(Document::new(limits));
            state.file_name = Some(p);
            Opened {
                state,
                notice: Some("New file".to_string()),
            }
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_open_error");
            Opened {
                state: EditorState::new(Document::new(limits)),
                notice: Some(format!("Open failed: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_splits_lines_and_keeps_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "a\r\nb\nc\n").unwrap();
        let opened = open_state(&FsStorage, Some(&path), Limits::default());
        assert!(opened.notice.is_none());
        let st = opened.state;
        assert_eq!(st.document.line_count(), 3);
        assert_eq!(st.document.line(2).unwrap().as_bytes(), b"c");
        assert_eq!(st.file_name.as_deref(), Some(path.as_path()));
        assert!(!st.dirty);
    }

    #[test]
    fn missing_file_is_new_and_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        let opened = open_state(&FsStorage, Some(&path), Limits::default());
        assert_eq!(opened.notice.as_deref(), Some("New file"));
        assert_eq!(opened.state.file_name.as_deref(), Some(path.as_path()));
        assert!(opened.state.document.is_pristine());
    }

    #[test]
    fn unreadable_path_starts_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let opened = open_state(&FsStorage, Some(dir.path()), Limits::default());
        assert!(opened.notice.unwrap().starts_with("Open failed: cannot read"));
        assert!(opened.state.file_name.is_none());
    }

    #[test]
    fn no_path_gives_empty_document() {
        let opened = open_state(&FsStorage, None, Limits::default());
        assert!(opened.notice.is_none());
        assert!(opened.state.file_name.is_none());
        assert_eq!(opened.state.document.line_count(), 1);
    }

    #[test]
    fn save_writes_serialized_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut fs = FsStorage;
        fs.save(&path, b"a\nb\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a\nb\n");
        fs.save(&path, b"c\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"c\n");
    }

    #[test]
    fn save_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.txt");
        let err = FsStorage.save(&path, b"x").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(err.to_string().starts_with("cannot write "));
    }
}
