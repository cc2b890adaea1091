//! dirkv CLI
//!
//! Command-line host for a directory-backed store.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dirkv::{Config, DirKvError, DirectoryStore, KeyValueStore, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// dirkv CLI
#[derive(Parser, Debug)]
#[command(name = "dirkv")]
#[command(about = "Key-value store backed by a filesystem directory")]
#[command(version)]
struct Args {
    /// Root directory (overrides the config file)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// fsync entry files after every put
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key (raw bytes to stdout)
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        #[arg(required_unless_present = "file")]
        value: Option<String>,

        /// Read the value from a file instead
        #[arg(short, long, conflicts_with = "value")]
        file: Option<PathBuf>,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// List all keys
    List,

    /// Show the on-disk name for a key
    Encode {
        /// The key to encode
        key: String,
    },

    /// Show the key for an on-disk name
    Decode {
        /// The encoded key
        encoded: String,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries values
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dirkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> dirkv::Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(root) = args.root {
        config.root_dir = root;
    }
    if args.sync {
        config.sync_strategy = SyncStrategy::EveryWrite;
    }

    tracing::debug!("dirkv v{} rooted at {}", dirkv::VERSION, config.root_dir.display());

    let store = DirectoryStore::open(config)?;
    let mut stdout = io::stdout().lock();

    match args.command {
        Commands::Get { key } => match store.get(&key) {
            Ok(value) => stdout.write_all(&value)?,
            Err(DirKvError::KeyNotFound(_)) => {
                tracing::info!("Key not found: {:?}", key);
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e),
        },
        Commands::Put { key, value, file } => {
            let bytes = match (file, value) {
                (Some(path), _) => std::fs::read(path)?,
                (None, Some(value)) => value.into_bytes(),
                (None, None) => {
                    return Err(DirKvError::InvalidArgument("missing value".to_string()))
                }
            };
            store.put(&key, &bytes)?;
        }
        Commands::Del { key } => {
            let existed = store.delete(&key)?;
            writeln!(stdout, "{}", if existed { "deleted" } else { "absent" })?;
        }
        Commands::List => {
            for key in store.keys()? {
                writeln!(stdout, "{}", key.escape_debug())?;
            }
        }
        Commands::Encode { key } => {
            writeln!(stdout, "{}", dirkv::encode_key(&key)?)?;
        }
        Commands::Decode { encoded } => {
            writeln!(stdout, "{}", dirkv::decode_key(&encoded)?)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
