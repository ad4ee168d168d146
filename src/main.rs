use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use termcolor::{ColorChoice, StandardStream};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use velocity::notes::{editor, NoteStore};
use velocity::output::{print_note_list, print_preview, print_stats};
use velocity::shell;
use velocity::utils::{get_config_path, AppConfig};

#[derive(Parser)]
#[command(name = "velocity")]
#[command(about = "Search plain-text notes with a trigram index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Notes directory (overrides the config file)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Config file to use instead of the one in the app data directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find notes containing every trigram of the query
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Find notes whose content or path contains every term
    Filter {
        terms: Vec<String>,
    },
    /// List all notes, most recent first
    List,
    /// Print the most recent note matching the query
    Show {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Create a note and open it in the editor
    New {
        /// Note name, relative to the notes directory
        name: String,

        /// Create the file without launching the editor
        #[arg(long)]
        no_edit: bool,
    },
    /// Open the most recent note matching the query in the editor
    Edit {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show index statistics
    Stats,
    /// Interactive search prompt
    Shell,
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let color = color_choice(cli.color, config.color, io::stdout().is_terminal());
    let editor_cmd = editor::resolve_editor(config.editor.as_deref());

    // Only `config` may run without a notes directory
    let open_store = || -> Result<NoteStore> {
        let root = match &cli.dir {
            Some(dir) => dir.clone(),
            None => config.effective_notes_dir(&std::env::current_dir()?),
        };
        let quiet = !io::stderr().is_terminal();
        NoteStore::load(&root, &config, quiet)
    };

    match cli.command {
        Some(Commands::Config { init }) => show_config(&config, cli.config, init)?,
        Some(Commands::Search { query }) => {
            let store = open_store()?;
            let hits = store.search(&query.join(" "));
            print_note_list(&hits, store.root(), color)?;
        }
        Some(Commands::Filter { terms }) => {
            let store = open_store()?;
            let hits = store.filter(&terms.join(" "));
            print_note_list(&hits, store.root(), color)?;
        }
        Some(Commands::List) => {
            let store = open_store()?;
            print_note_list(&store.all(), store.root(), color)?;
        }
        Some(Commands::Show { query }) => {
            let store = open_store()?;
            match store.search(&query.join(" ")).first() {
                Some((_, note)) => print_preview(note, store.root(), color)?,
                None => eprintln!("No matching note"),
            }
        }
        Some(Commands::New { name, no_edit }) => {
            let mut store = open_store()?;
            let doc_id = store.create(&name)?;
            if let Some(note) = store.get(doc_id) {
                println!("{}", note.path.display());
                if !no_edit {
                    let path = note.path.clone();
                    editor::open(&editor_cmd, &path)?;
                    store.refresh(doc_id)?;
                }
            }
        }
        Some(Commands::Edit { query }) => {
            let mut store = open_store()?;
            let target = store
                .search(&query.join(" "))
                .first()
                .map(|(doc_id, note)| (*doc_id, note.path.clone()));
            match target {
                Some((doc_id, path)) => {
                    editor::open(&editor_cmd, &path)?;
                    store.refresh(doc_id)?;
                }
                None => eprintln!("No matching note"),
            }
        }
        Some(Commands::Stats) => {
            let store = open_store()?;
            print_stats(&store, color)?;
        }
        Some(Commands::Shell) => {
            let mut store = open_store()?;
            let stdin = io::stdin();
            let mut out = StandardStream::stdout(color);
            shell::run(&mut store, &editor_cmd, stdin.lock(), &mut out)?;
        }
        None => {
            let store = open_store()?;
            let hits = if cli.query.is_empty() {
                store.all()
            } else {
                store.search(&cli.query.join(" "))
            };
            print_note_list(&hits, store.root(), color)?;
        }
    }

    Ok(())
}

/// termcolor's `Auto` only consults the environment, so piped output is
/// checked here
fn color_choice(when: ColorWhen, config_color: bool, stdout_is_terminal: bool) -> ColorChoice {
    match when {
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
        ColorWhen::Auto if config_color && stdout_is_terminal => ColorChoice::Auto,
        ColorWhen::Auto => ColorChoice::Never,
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "velocity=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Explicit config files must load; the default location falls back to
/// defaults when the app data directory is unavailable
fn load_config(explicit: Option<&PathBuf>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load_from(path);
    }
    match get_config_path() {
        Ok(path) => AppConfig::load_from(&path),
        Err(e) => {
            warn!(error = %e, "using default config");
            Ok(AppConfig::default())
        }
    }
}

fn show_config(config: &AppConfig, explicit: Option<PathBuf>, init: bool) -> Result<()> {
    let path = match explicit {
        Some(path) => path,
        None => get_config_path()?,
    };

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            config.save_to(&path)?;
            println!("Wrote default config: {}", path.display());
        }
    }

    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
