//! Terminal output for note listings, previews and index statistics

use crate::index::DocId;
use crate::notes::{Note, NoteStore};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print one line per note: id, relative path, age
pub fn print_note_list(hits: &[(DocId, &Note)], root: &Path, color: ColorChoice) -> io::Result<()> {
    write_note_list(&mut StandardStream::stdout(color), hits, root, SystemTime::now())
}

/// Print a note's path followed by its content
pub fn print_preview(note: &Note, root: &Path, color: ColorChoice) -> io::Result<()> {
    write_preview(&mut StandardStream::stdout(color), note, root)
}

/// Print index statistics for a store
pub fn print_stats(store: &NoteStore, color: ColorChoice) -> io::Result<()> {
    write_stats(&mut StandardStream::stdout(color), store)
}

pub fn write_note_list<W: WriteColor>(
    out: &mut W,
    hits: &[(DocId, &Note)],
    root: &Path,
    now: SystemTime,
) -> io::Result<()> {
    for (doc_id, note) in hits {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{:>4}", doc_id)?;
        out.reset()?;
        write!(out, "  ")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", note.display_path(root).display())?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "  {}", format_age(note.modified, now))?;
        out.reset()?;
    }
    Ok(())
}

pub fn write_preview<W: WriteColor>(out: &mut W, note: &Note, root: &Path) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(out, "{}", note.display_path(root).display())?;
    out.reset()?;
    writeln!(out, "{}", "-".repeat(40))?;
    write!(out, "{}", note.content)?;
    if !note.content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_stats<W: WriteColor>(out: &mut W, store: &NoteStore) -> io::Result<()> {
    let stats = store.index_stats();
    let unsearchable = store.unsearchable();

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Index Statistics")?;
    out.reset()?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Notes directory:  {}", store.root().display())?;
    writeln!(out, "Notes:            {}", stats.doc_count)?;
    writeln!(out, "Trigrams:         {}", stats.trigram_count)?;
    writeln!(out, "Postings:         {}", stats.posting_count)?;
    writeln!(out, "Unsearchable:     {}", unsearchable.len())?;

    if !unsearchable.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes too short to be found by search:")?;
        for note in unsearchable.iter().take(15) {
            writeln!(out, "  {}", note.display_path(store.root()).display())?;
        }
        if unsearchable.len() > 15 {
            writeln!(out, "  ... and {} more", unsearchable.len() - 15)?;
        }
    }
    Ok(())
}

/// Human readable age of a modification time, e.g. `5m ago`
pub fn format_age(modified: SystemTime, now: SystemTime) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = MINUTE * 60;
    const DAY: u64 = HOUR * 24;

    let secs = now
        .duration_since(modified)
        .unwrap_or(Duration::ZERO)
        .as_secs();

    if secs >= DAY {
        format!("{}d ago", secs / DAY)
    } else if secs >= HOUR {
        format!("{}h ago", secs / HOUR)
    } else if secs >= MINUTE {
        format!("{}m ago", secs / MINUTE)
    } else {
        "just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use termcolor::NoColor;

    fn note(path: &str, content: &str, modified: SystemTime) -> Note {
        Note {
            path: PathBuf::from(path),
            content: content.to_string(),
            modified,
        }
    }

    fn rendered(out: NoColor<Vec<u8>>) -> String {
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_format_age() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let ago = |secs| now - Duration::from_secs(secs);
        assert_eq!(format_age(ago(5), now), "just now");
        assert_eq!(format_age(ago(120), now), "2m ago");
        assert_eq!(format_age(ago(3 * 3600), now), "3h ago");
        assert_eq!(format_age(ago(2 * 86400 + 5), now), "2d ago");
        // Clock skew: future mtimes read as fresh
        assert_eq!(format_age(now + Duration::from_secs(60), now), "just now");
    }

    #[test]
    fn test_write_note_list() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000);
        let a = note("/notes/a.txt", "alpha", now - Duration::from_secs(600));
        let b = note("/notes/sub/b.txt", "bravo", now);
        let mut out = NoColor::new(Vec::new());
        write_note_list(&mut out, &[(3, &b), (0, &a)], Path::new("/notes"), now).unwrap();

        let text = rendered(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("   3  "));
        assert!(lines[0].contains("b.txt"));
        assert!(lines[0].ends_with("just now"));
        assert!(lines[1].contains("a.txt"));
        assert!(lines[1].ends_with("10m ago"));
    }

    #[test]
    fn test_write_preview_adds_trailing_newline() {
        let n = note("/notes/a.txt", "line one\nline two", SystemTime::UNIX_EPOCH);
        let mut out = NoColor::new(Vec::new());
        write_preview(&mut out, &n, Path::new("/notes")).unwrap();
        let text = rendered(out);
        assert!(text.starts_with("a.txt\n"));
        assert!(text.ends_with("line one\nline two\n"));
    }
}
