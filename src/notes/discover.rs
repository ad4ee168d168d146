use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decides which files under the notes root are notes
#[derive(Debug, Clone)]
pub struct NoteFilter {
    globs: GlobSet,
}

impl NoteFilter {
    /// Compile the configured glob patterns, e.g. `*.txt` or `journal/**/*.md`
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid note pattern '{}'", pattern))?;
            builder.add(glob);
        }
        let globs = builder.build().context("Failed to compile note patterns")?;
        Ok(Self { globs })
    }

    /// Match a path relative to the notes root
    pub fn matches(&self, rel_path: &Path) -> bool {
        self.globs.is_match(rel_path)
    }
}

/// Walk `root` and return every note path, sorted.
///
/// Hidden entries and gitignored files are skipped. Sorting makes the
/// document ids stable between runs over the same tree.
pub fn discover(root: &Path, filter: &NoteFilter) -> Result<Vec<PathBuf>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Notes directory not found: {}", root.display()))?;

    let walker = WalkBuilder::new(&root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(rel_path) = path.strip_prefix(&root) else {
            continue;
        };
        if filter.matches(rel_path) {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    debug!(root = %root.display(), notes = paths.len(), "discovered notes");
    Ok(paths)
}
