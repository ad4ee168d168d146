//! Plain-text notes on disk, searched through a [`TrigramIndex`].
//!
//! [`NoteStore`] owns the notes and the index together and keeps them in
//! lockstep: the note at position `i` is document `i` in the index.
//!
//! [`TrigramIndex`]: crate::index::TrigramIndex

pub mod discover;
pub mod editor;
pub mod store;

pub use discover::{discover, NoteFilter};
pub use store::NoteStore;

use crate::utils::is_binary;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A note file and the content it was indexed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub path: PathBuf,
    pub content: String,
    pub modified: SystemTime,
}

impl Note {
    /// Read a note from disk. Returns None for binary files.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read note {}", path.display()))?;
        if is_binary(&bytes) {
            debug!(path = %path.display(), "skipping binary note");
            return Ok(None);
        }

        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        Ok(Some(Self {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            modified,
        }))
    }

    /// Path relative to `root`, or the full path when outside it
    pub fn display_path<'a>(&'a self, root: &Path) -> &'a Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}
