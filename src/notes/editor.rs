use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

const FALLBACK_EDITOR: &str = "vi";

/// Pick the editor command: config, then $VISUAL, then $EDITOR, then vi
pub fn resolve_editor(configured: Option<&str>) -> String {
    pick_editor(
        configured,
        env::var("VISUAL").ok().as_deref(),
        env::var("EDITOR").ok().as_deref(),
    )
}

fn pick_editor(configured: Option<&str>, visual: Option<&str>, editor: Option<&str>) -> String {
    [configured, visual, editor]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|e| !e.is_empty())
        .unwrap_or(FALLBACK_EDITOR)
        .to_string()
}

/// Run `editor` on `path` with the terminal attached and wait for it.
///
/// The command may carry arguments (`"code --wait"`); the path is appended last.
pub fn open(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", program))?;

    if !status.success() {
        bail!("Editor '{}' exited with {}", editor, status);
    }
    Ok(())
}
