use crate::index::{DocId, IndexStats, TrigramIndex};
use crate::notes::discover::{discover, NoteFilter};
use crate::notes::Note;
use crate::utils::progress::spinner;
use crate::utils::{generate_trigrams, AppConfig};
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Notes under one root directory plus the index over their content.
///
/// `notes[i]` was added to `index` as document `i`; every mutation goes
/// through methods that keep that true.
pub struct NoteStore {
    root: PathBuf,
    extension: String,
    notes: Vec<Note>,
    index: TrigramIndex,
}

impl NoteStore {
    /// Create an empty store rooted at `root` (which must exist)
    pub fn new(root: &Path, extension: &str) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Notes directory not found: {}", root.display()))?;
        Ok(Self {
            root,
            extension: extension.trim_start_matches('.').to_string(),
            notes: Vec::new(),
            index: TrigramIndex::new(),
        })
    }

    /// Discover, read and index every note under `root`
    pub fn load(root: &Path, config: &AppConfig, quiet: bool) -> Result<Self> {
        let mut store = Self::new(root, &config.extension)?;
        let filter = NoteFilter::new(&config.patterns)?;

        let progress = spinner("Loading notes...", quiet);
        let paths = discover(&store.root, &filter)?;

        // Read in parallel; collect keeps discovery order so ids stay stable
        let notes: Vec<Note> = paths
            .par_iter()
            .filter_map(|path| match Note::read(path) {
                Ok(note) => note,
                Err(e) => {
                    warn!(error = %e, "skipping note");
                    None
                }
            })
            .collect();

        for note in notes {
            store.push(note);
        }

        if let Some(progress) = progress {
            progress.finish_and_clear();
        }

        info!(
            root = %store.root.display(),
            notes = store.notes.len(),
            trigrams = store.index.stats().trigram_count,
            "loaded notes"
        );
        Ok(store)
    }

    /// Index a note and append it; returns its id
    pub fn push(&mut self, note: Note) -> DocId {
        let doc_id = self.index.add(&note.content);
        self.notes.push(note);
        debug_assert_eq!(self.notes.len(), self.index.len());
        doc_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Note> {
        self.notes.get(doc_id as usize)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Notes that produce no trigrams and can never be found by `search`
    pub fn unsearchable(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| generate_trigrams(&note.content).is_empty())
            .collect()
    }

    /// Every note, most recently modified first
    pub fn all(&self) -> Vec<(DocId, &Note)> {
        self.ranked((0..self.notes.len() as DocId).collect())
    }

    /// Notes containing every trigram of `query`, most recent first.
    ///
    /// Queries without a token of 3+ chars match nothing.
    pub fn search(&self, query: &str) -> Vec<(DocId, &Note)> {
        let ids = self.index.search_ids(query);
        self.ranked(ids)
    }

    /// Notes whose content or relative path contains every whitespace-separated
    /// term of `text` as a case-insensitive substring, most recent first.
    ///
    /// Unlike `search` this has no minimum term length, and an empty
    /// filter keeps every note.
    pub fn filter(&self, text: &str) -> Vec<(DocId, &Note)> {
        let terms: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        let ids = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, note)| {
                let path = note.display_path(&self.root).to_string_lossy();
                let haystack = format!("{} {}", note.content, path).to_lowercase();
                terms.iter().all(|term| haystack.contains(term.as_str()))
            })
            .map(|(i, _)| i as DocId)
            .collect();
        self.ranked(ids)
    }

    /// Create `name` (plus the configured extension) under the root and index it.
    ///
    /// An existing file is left untouched; a note already in the store is
    /// returned as is. Names that would leave the root are rejected.
    pub fn create(&mut self, name: &str) -> Result<DocId> {
        let path = self.note_path(name.trim())?;
        if let Some(pos) = self.notes.iter().position(|note| note.path == path) {
            return Ok(pos as DocId);
        }

        if let Some(parent) = path.parent() {
            create_note_dir(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to create note {}", path.display()))?;

        let note = Note::read(&path)?
            .with_context(|| format!("{} is not a text file", path.display()))?;
        let doc_id = self.push(note);
        debug!(doc_id, path = %path.display(), "created note");
        Ok(doc_id)
    }

    /// Re-read a note after it changed on disk.
    ///
    /// The index cannot update a document in place, so it is rebuilt from
    /// every note's current content.
    pub fn refresh(&mut self, doc_id: DocId) -> Result<()> {
        let note = self
            .notes
            .get_mut(doc_id as usize)
            .with_context(|| format!("No note with id {}", doc_id))?;

        match Note::read(&note.path)? {
            Some(updated) => *note = updated,
            None => bail!("{} is no longer a text file", note.path.display()),
        }

        self.rebuild_index();
        Ok(())
    }

    /// Replace the index with a fresh one built from the notes in order
    pub fn rebuild_index(&mut self) {
        let mut index = TrigramIndex::new();
        index.extend(self.notes.iter().map(|note| note.content.as_str()));
        self.index = index;
        debug!(notes = self.notes.len(), "rebuilt index");
    }

    /// Resolve a note name to a normalized path below the root
    fn note_path(&self, name: &str) -> Result<PathBuf> {
        let mut relative = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    bail!("Note name must stay inside the notes directory: {}", name)
                }
            }
        }
        if relative.as_os_str().is_empty() {
            bail!("Note name is empty");
        }

        let has_extension = relative
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
        if !has_extension && !self.extension.is_empty() {
            let mut file_name = relative.into_os_string();
            file_name.push(".");
            file_name.push(&self.extension);
            relative = PathBuf::from(file_name);
        }
        Ok(self.root.join(relative))
    }

    fn ranked(&self, ids: Vec<DocId>) -> Vec<(DocId, &Note)> {
        let mut hits: Vec<(DocId, &Note)> = ids
            .into_iter()
            .filter_map(|id| self.get(id).map(|note| (id, note)))
            .collect();
        hits.sort_by(|(_, a), (_, b)| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.path.cmp(&b.path))
        });
        hits
    }
}

#[cfg(unix)]
fn create_note_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o770)
        .create(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))
}

#[cfg(not(unix))]
fn create_note_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn notes_dir() -> TempDir {
        tempfile::Builder::new().prefix("notes").tempdir().unwrap()
    }

    fn write_note(root: &Path, name: &str, content: &str, age_secs: u64) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    fn names(hits: &[(DocId, &Note)], store: &NoteStore) -> Vec<String> {
        hits.iter()
            .map(|(_, note)| {
                note.display_path(store.root())
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn load(root: &Path) -> NoteStore {
        NoteStore::load(root, &AppConfig::default(), true).unwrap()
    }

    #[test]
    fn test_load_assigns_ids_in_path_order() {
        let dir = notes_dir();
        write_note(dir.path(), "b.txt", "bravo", 10);
        write_note(dir.path(), "a.txt", "alpha", 20);
        write_note(dir.path(), "skip.md", "markdown", 5);

        let store = load(dir.path());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().content, "alpha");
        assert_eq!(store.get(1).unwrap().content, "bravo");
        assert!(store.get(2).is_none());
        assert_eq!(store.index_stats().doc_count, 2);
    }

    #[test]
    fn test_search_orders_by_recency() {
        let dir = notes_dir();
        write_note(dir.path(), "old.txt", "meeting notes from march", 300);
        write_note(dir.path(), "new.txt", "meeting agenda", 10);
        write_note(dir.path(), "mid.txt", "Meeting recap", 100);
        write_note(dir.path(), "other.txt", "shopping list", 1);

        let store = load(dir.path());
        let hits = store.search("meeting");
        assert_eq!(names(&hits, &store), ["new.txt", "mid.txt", "old.txt"]);
    }

    #[test]
    fn test_search_keeps_index_edge_cases() {
        let dir = notes_dir();
        write_note(dir.path(), "short.txt", "ok", 10);
        write_note(dir.path(), "long.txt", "okay then", 10);

        let store = load(dir.path());
        assert!(store.search("ok").is_empty());
        assert!(store.search("").is_empty());
        assert_eq!(names(&store.search("okay"), &store), ["long.txt"]);
        let unsearchable: Vec<String> = store
            .unsearchable()
            .iter()
            .map(|note| note.display_path(store.root()).to_string_lossy().into_owned())
            .collect();
        assert_eq!(unsearchable, ["short.txt"]);
    }

    #[test]
    fn test_filter_matches_content_and_path() {
        let dir = notes_dir();
        write_note(dir.path(), "work/todo.txt", "call Bob", 30);
        write_note(dir.path(), "home/todo.txt", "fix sink", 20);
        write_note(dir.path(), "ideas.txt", "a todo app", 10);

        let store = load(dir.path());
        assert_eq!(
            names(&store.filter("todo"), &store),
            ["ideas.txt", "home/todo.txt", "work/todo.txt"]
        );
        assert_eq!(names(&store.filter("WORK bob"), &store), ["work/todo.txt"]);
        // Short terms are fine for the literal filter
        assert_eq!(names(&store.filter("fi"), &store), ["home/todo.txt"]);
        assert_eq!(store.filter("").len(), 3);
        assert!(store.filter("nothing here").is_empty());
    }

    #[test]
    fn test_all_lists_every_note() {
        let dir = notes_dir();
        write_note(dir.path(), "a.txt", "", 50);
        write_note(dir.path(), "b.txt", "content", 5);

        let store = load(dir.path());
        assert_eq!(names(&store.all(), &store), ["b.txt", "a.txt"]);
    }

    #[test]
    fn test_create_note() {
        let dir = notes_dir();
        let mut store = load(dir.path());
        assert!(store.is_empty());

        let id = store.create("projects/plan").unwrap();
        assert_eq!(id, 0);
        let path = store.root().join("projects").join("plan.txt");
        assert!(path.is_file());
        assert_eq!(store.get(id).unwrap().path, path);

        // Same name again resolves to the same note
        assert_eq!(store.create("projects/plan.txt").unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_create_note_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = notes_dir();
        let mut store = load(dir.path());
        store.create("fresh/note").unwrap();
        let mode = fs::metadata(store.root().join("fresh")).unwrap().permissions().mode();
        // umask may clear bits but never adds any
        assert_eq!(mode & 0o007, 0);
    }

    #[test]
    fn test_create_keeps_existing_content() {
        let dir = notes_dir();
        let mut store = NoteStore::new(dir.path(), ".txt").unwrap();
        fs::write(dir.path().join("kept.txt"), "existing words").unwrap();

        let id = store.create("kept").unwrap();
        assert_eq!(store.get(id).unwrap().content, "existing words");
        assert_eq!(store.search("existing").len(), 1);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let dir = notes_dir();
        let mut store = load(dir.path());
        assert!(store.create("   ").is_err());
        assert!(store.create("./").is_err());
    }

    #[test]
    fn test_create_stays_under_root() {
        let dir = notes_dir();
        let root = dir.path().join("notes");
        fs::create_dir(&root).unwrap();
        let mut store = load(&root);

        let err = store.create("../escaped").unwrap_err();
        assert!(err.to_string().contains("inside the notes directory"));
        assert!(store.create("sub/../../escaped").is_err());
        assert!(!dir.path().join("escaped.txt").exists());

        let absolute = dir.path().join("abs").to_string_lossy().into_owned();
        assert!(store.create(&absolute).is_err());
        assert!(!dir.path().join("abs.txt").exists());
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_normalizes_current_dir() {
        let dir = notes_dir();
        write_note(dir.path(), "a.txt", "alpha", 10);
        let mut store = load(dir.path());

        assert_eq!(store.create("./a").unwrap(), 0);
        assert_eq!(store.create("./sub/./b").unwrap(), 1);
        assert_eq!(store.create("sub/b.txt").unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().path, store.root().join("sub").join("b.txt"));
    }

    #[test]
    fn test_refresh_reindexes_changed_note() {
        let dir = notes_dir();
        write_note(dir.path(), "a.txt", "original words", 10);
        write_note(dir.path(), "b.txt", "unrelated", 10);
        let mut store = load(dir.path());
        assert_eq!(store.search("original").len(), 1);

        fs::write(dir.path().join("a.txt"), "rewritten text").unwrap();
        store.refresh(0).unwrap();

        assert!(store.search("original").is_empty());
        assert_eq!(names(&store.search("rewritten"), &store), ["a.txt"]);
        assert_eq!(names(&store.search("unrelated"), &store), ["b.txt"]);
        assert_eq!(store.index_stats().doc_count, 2);
    }

    #[test]
    fn test_refresh_unknown_id() {
        let dir = notes_dir();
        let mut store = load(dir.path());
        let err = store.refresh(7).unwrap_err();
        assert!(err.to_string().contains("No note with id 7"));
    }

    #[test]
    fn test_binary_files_are_skipped() {
        let dir = notes_dir();
        fs::write(dir.path().join("blob.txt"), [0u8; 128]).unwrap();
        write_note(dir.path(), "real.txt", "real note", 1);
        let store = load(dir.path());
        assert_eq!(store.len(), 1);
    }
}
