use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "velocity";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the notes. None means the current directory
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,

    /// File name globs that identify a note
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Extension given to notes created with `new`
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Editor command, overrides $VISUAL and $EDITOR
    #[serde(default)]
    pub editor: Option<String>,

    /// Colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_patterns() -> Vec<String> {
    vec!["*.txt".to_string()]
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notes_dir: None,
            patterns: default_patterns(),
            extension: default_extension(),
            editor: None,
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load config from a file, or return default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write config as pretty JSON
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the notes directory against `cwd` when unset or relative
    pub fn effective_notes_dir(&self, cwd: &Path) -> PathBuf {
        match &self.notes_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
