//! conftree — load a TOML configuration into a dotted-path store and query it.
//!
//! # Usage
//!
//! ```text
//! conftree [OPTIONS] [COMMAND]
//!
//! Commands:
//!   dump                      Print every `path = value` line (default)
//!   get <PATH> [--as TYPE]    Print one value, converted to string|int|bool|double|float
//!   prune <PATH>              Prune the node at PATH, then dump
//!
//! Options:
//!   -c, --config <FILE>        TOML document to load [env: CONFTREE_CONFIG]
//!       --set <PATH=VALUE>     Final value that the document cannot override (repeatable)
//!       --max-path-len <N>     Longest accepted dotted path [env: CONFTREE_MAX_PATH_LEN]
//! ```
//!
//! `--set` values are written before the document is read, so
//! `conftree -c app.toml --set runmode=workers get runmode` prints `workers`
//! whatever `app.toml` says.
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `info`); the
//! dump and query output goes to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use conftree_cli::application::populate::populate;
use conftree_cli::infrastructure::overrides::parse_overrides;
use conftree_cli::infrastructure::toml_source::flatten_document;
use conftree_core::{ConfigStore, InitFailurePolicy, StoreOptions, DEFAULT_MAX_PATH_LEN};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Load a TOML configuration into a dotted-path store and query it.
#[derive(Debug, Parser)]
#[command(
    name = "conftree",
    about = "Hierarchical dotted-path configuration store",
    version
)]
struct Cli {
    /// TOML document to load as ordinary (overridable) values.
    #[arg(short, long, env = "CONFTREE_CONFIG")]
    config: Option<PathBuf>,

    /// Final value in `PATH=VALUE` form; may be repeated.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    overrides: Vec<String>,

    /// Longest accepted dotted path, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_PATH_LEN, env = "CONFTREE_MAX_PATH_LEN")]
    max_path_len: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every `path = value` line.
    Dump,
    /// Print the value at PATH.
    Get {
        path: String,
        /// Conversion applied before printing.
        #[arg(long = "as", value_enum, default_value_t = ValueType::String)]
        as_type: ValueType,
    },
    /// Prune the node at PATH (keeping final branches), then dump.
    Prune { path: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValueType {
    String,
    Int,
    Bool,
    Double,
    Float,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = load_store(&cli)?;
    run(cli.command.unwrap_or(Command::Dump), store)
}

/// Builds and populates the store from `--set` and `--config`.
fn load_store(cli: &Cli) -> anyhow::Result<ConfigStore> {
    let mut store = ConfigStore::with_options(StoreOptions {
        max_path_len: cli.max_path_len,
        init_failure: InitFailurePolicy::ReturnError,
    });
    store.init().context("failed to initialize configuration store")?;

    let overrides = parse_overrides(&cli.overrides)?;
    let entries = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            info!("loading configuration from {}", path.display());
            flatten_document(&text).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Vec::new(),
    };

    populate(&mut store, &overrides, &entries).context("failed to populate configuration")?;
    Ok(store)
}

fn run(command: Command, mut store: ConfigStore) -> anyhow::Result<()> {
    match command {
        Command::Dump => print_dump(&store),
        Command::Get { path, as_type } => {
            let rendered = match as_type {
                ValueType::String => store.get(&path)?.unwrap_or_default().to_string(),
                ValueType::Int => store.get_int(&path)?.to_string(),
                ValueType::Bool => store.get_bool(&path)?.to_string(),
                ValueType::Double => store.get_double(&path)?.to_string(),
                ValueType::Float => store.get_float(&path)?.to_string(),
            };
            println!("{rendered}");
        }
        Command::Prune { path } => {
            let node = store.get_node(&path)?;
            store.prune(node)?;
            print_dump(&store);
        }
    }
    Ok(())
}

fn print_dump(store: &ConfigStore) {
    for line in store.dump() {
        println!("{line}");
    }
}
