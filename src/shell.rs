//! Line-oriented interactive loop over a [`NoteStore`].
//!
//! Each input line is a search query. Lines starting with `:` are commands:
//!
//! - `:f <terms>` literal substring filter
//! - `:s <id>` show a note
//! - `:e <id>` edit a note, then reindex
//! - `:l` list every note
//! - `:q` quit

use crate::index::DocId;
use crate::notes::{editor, NoteStore};
use crate::output::{write_note_list, write_preview};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::SystemTime;
use termcolor::WriteColor;
use tracing::warn;

/// A parsed shell input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Filter(String),
    Show(DocId),
    Edit(DocId),
    List,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return ShellCommand::Search(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let parse_id = |make: fn(DocId) -> ShellCommand| match arg.parse::<DocId>() {
        Ok(id) => make(id),
        Err(_) => ShellCommand::Invalid(format!("expected a note id, got '{}'", arg)),
    };

    match name {
        "q" | "quit" => ShellCommand::Quit,
        "l" | "list" => ShellCommand::List,
        "f" | "filter" => ShellCommand::Filter(arg.to_string()),
        "s" | "show" => parse_id(ShellCommand::Show),
        "e" | "edit" => parse_id(ShellCommand::Edit),
        other => ShellCommand::Invalid(format!("unknown command ':{}'", other)),
    }
}

/// Run the loop until `:q` or end of input
pub fn run<R: BufRead, W: WriteColor>(
    store: &mut NoteStore,
    editor_cmd: &str,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{} notes loaded. Type a query, or :q to quit.", store.len())?;
    prompt(out)?;

    for line in input.lines() {
        match parse_line(&line?) {
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Search(query) => {
                let hits = store.search(&query);
                report(out, store, &hits)?;
            }
            ShellCommand::Filter(text) => {
                let hits = store.filter(&text);
                report(out, store, &hits)?;
            }
            ShellCommand::List => {
                let hits = store.all();
                report(out, store, &hits)?;
            }
            ShellCommand::Show(id) => match store.get(id) {
                Some(note) => write_preview(out, note, store.root())?,
                None => writeln!(out, "No note with id {}", id)?,
            },
            ShellCommand::Edit(id) => match store.get(id) {
                Some(note) => {
                    let path = note.path.clone();
                    if let Err(e) = editor::open(editor_cmd, &path).and_then(|_| store.refresh(id)) {
                        warn!(error = %e, "edit failed");
                        writeln!(out, "Edit failed: {:#}", e)?;
                    }
                }
                None => writeln!(out, "No note with id {}", id)?,
            },
            ShellCommand::Invalid(message) => writeln!(out, "{}", message)?,
        }
        prompt(out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn report<W: WriteColor>(
    out: &mut W,
    store: &NoteStore,
    hits: &[(DocId, &crate::notes::Note)],
) -> Result<()> {
    if hits.is_empty() {
        writeln!(out, "No matches")?;
    } else {
        write_note_list(out, hits, store.root(), SystemTime::now())?;
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
