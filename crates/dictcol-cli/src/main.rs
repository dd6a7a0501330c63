#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! `DictCol` CLI - encode string columns and query them
//!
//! Usage:
//!   `dictcol encode --column column.txt --workers 4`
//!   `dictcol query --mode encoded-item --item knvr`
//!   `dictcol query --mode vanilla-prefix --prefix knv --results result.txt`
//!   `dictcol info --artifact encoded_column.bin`

mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dictcol_core::{EngineConfig, QueryMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dictcol")]
#[command(
    author,
    version,
    about = "DictCol CLI - dictionary-encoded string columns"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        default_value = "dictcol.toml",
        env = "DICTCOL_CONFIG"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// CLI query mode option
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    EncodedItem,
    EncodedPrefix,
    VanillaItem,
    VanillaPrefix,
}

impl From<ModeArg> for QueryMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::EncodedItem => QueryMode::EncodedItem,
            ModeArg::EncodedPrefix => QueryMode::EncodedPrefix,
            ModeArg::VanillaItem => QueryMode::VanillaItem,
            ModeArg::VanillaPrefix => QueryMode::VanillaPrefix,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a raw column file and save the artifact
    Encode {
        /// Raw column file (one value per line)
        #[arg(long)]
        column: Option<PathBuf>,

        /// Artifact output path
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        /// Number of parallel workers
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Run one exact-match or prefix query
    Query {
        /// Query mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Item for exact-match modes
        #[arg(long)]
        item: Option<String>,

        /// Prefix for prefix modes
        #[arg(long)]
        prefix: Option<String>,

        /// Use the scalar scan over encoded data
        #[arg(long, conflicts_with = "vectorized")]
        scalar: bool,

        /// Use the SIMD scan over encoded data
        #[arg(long)]
        vectorized: bool,

        /// Artifact path (encoded modes)
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        /// Raw column file (vanilla modes)
        #[arg(long)]
        column: Option<PathBuf>,

        /// Results file for prefix matches
        #[arg(short, long)]
        results: Option<PathBuf>,
    },

    /// Show artifact statistics
    Info {
        /// Artifact path
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `logging.level`.
fn init_tracing(config: &EngineConfig) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    tracing::debug!(?config, "Effective configuration");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = EngineConfig::load_from_path(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Encode {
            column,
            artifact,
            workers,
        } => {
            if let Some(column) = column {
                config.storage.column_path = column;
            }
            if let Some(artifact) = artifact {
                config.storage.artifact_path = artifact;
            }
            if let Some(workers) = workers {
                config.encoder.workers = workers;
            }
            init_tracing(&config);

            let summary = dictcol_core::run_encode(&config).context("encode failed")?;
            output::print_encode_summary(&summary);
        }
        Commands::Query {
            mode,
            item,
            prefix,
            scalar,
            vectorized,
            artifact,
            column,
            results,
        } => {
            if let Some(mode) = mode {
                config.query.mode = mode.into();
            }
            if let Some(item) = item {
                config.query.item = item;
            }
            if let Some(prefix) = prefix {
                config.query.prefix = prefix;
            }
            if scalar {
                config.query.vectorized = false;
            } else if vectorized {
                config.query.vectorized = true;
            }
            if let Some(artifact) = artifact {
                config.storage.artifact_path = artifact;
            }
            if let Some(column) = column {
                config.storage.column_path = column;
            }
            if let Some(results) = results {
                config.storage.results_path = results;
            }
            init_tracing(&config);

            let report = dictcol_core::run_query(&config).context("query failed")?;
            output::print_query_report(&report);
        }
        Commands::Info { artifact, format } => {
            if let Some(artifact) = artifact {
                config.storage.artifact_path = artifact;
            }
            init_tracing(&config);

            let path = &config.storage.artifact_path;
            let (dictionary, encoded) = dictcol_core::load(path)
                .with_context(|| format!("reading artifact {}", path.display()))?;
            let stats = dictcol_core::store::stats(&dictionary, &encoded);
            output::print_stats(path, &stats, &format)?;
        }
    }

    Ok(())
}
