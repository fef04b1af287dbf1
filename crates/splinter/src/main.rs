//! `splinter`: split a file into erasure-coded shard files.
//!
//! # Usage
//!
//! ```text
//! splinter encode movie.mkv                        # 4 data + 2 parity, 2-byte shards
//! splinter encode movie.mkv -d 10 -p 4 -s 65536    # custom layout
//! splinter encode movie.mkv -b native -o ./shards  # SIMD backend, other directory
//! splinter -c splinter.toml encode movie.mkv       # settings from a config file
//! ```
//!
//! Exits with status 1 on invalid arguments or configuration and 2 on any
//! other failure.

mod config;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use splinter_engine::{EncodeOrchestrator, EngineError, ErrorKind};
use splinter_types::{BackendKind, EncodeRequest};
use tracing::{info, warn};

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "splinter",
    version,
    about = "Split files into erasure-coded data and parity shards"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file into data and parity shards, one output file per shard.
    Encode {
        /// File to split.
        file: PathBuf,

        /// Number of data shards (default 4).
        #[arg(short, long)]
        data: Option<usize>,

        /// Number of parity shards (default 2).
        #[arg(short, long)]
        parity: Option<usize>,

        /// Shard size in bytes (default 2).
        #[arg(short, long)]
        shard_size: Option<usize>,

        /// Erasure backend: "reference" or "native".
        #[arg(short, long)]
        backend: Option<BackendKind>,

        /// Fail if the shard size is larger than the file instead of shrinking it.
        #[arg(long)]
        strict: bool,

        /// Use the reference backend if the native one cannot start.
        #[arg(long)]
        fallback: bool,

        /// Write shards to this directory instead of next to the input.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    match cli.command {
        Commands::Encode {
            file,
            data,
            parity,
            shard_size,
            backend,
            strict,
            fallback,
            out,
        } => {
            // CLI args override config file values.
            if data.is_some() {
                config.erasure.data = data;
            }
            if parity.is_some() {
                config.erasure.parity = parity;
            }
            if shard_size.is_some() {
                config.erasure.shard_size = shard_size;
            }
            if backend.is_some() {
                config.erasure.backend = backend;
            }
            if strict {
                config.erasure.strict = Some(true);
            }
            if fallback {
                config.erasure.fallback = Some(true);
            }
            if out.is_some() {
                config.output.dir = out;
            }
            cmd_encode(&config, &file)
        }
    }
}

fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Invalid configuration (including an unparsable config file) is a usage
/// error; everything else, a missing config file included, is a runtime
/// failure.
fn exit_status(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<toml::de::Error>().is_some() {
        return 1;
    }
    match err.downcast_ref::<EngineError>() {
        Some(e) if e.kind() == ErrorKind::InvalidConfiguration => 1,
        _ => 2,
    }
}

// -----------------------------------------------------------------------
// splinter encode
// -----------------------------------------------------------------------

fn cmd_encode(config: &CliConfig, file: &Path) -> Result<()> {
    let request = config.encode_request();
    info!(
        file = %file.display(),
        k = request.data_shards,
        m = request.parity_shards,
        shard_size = request.shard_size,
        backend = %request.backend,
        "encoding"
    );

    // Validate and open the backend before touching the input.
    let orchestrator = open_orchestrator(config)?;

    let input = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let set = orchestrator.encode(input)?;

    let paths = output::write_shards(&set, file, config.output.dir.as_deref())?;
    info!(
        shards = paths.len(),
        shard_size = set.shard_size(),
        backend = %orchestrator.backend_kind(),
        "done"
    );
    Ok(())
}

fn open_orchestrator(config: &CliConfig) -> Result<EncodeOrchestrator> {
    let request = config.encode_request();
    match EncodeOrchestrator::new(request) {
        Ok(orchestrator) => Ok(orchestrator),
        Err(err) => match fallback_request(request, &err, config.fallback()) {
            Some(retry) => {
                warn!(error = %err, "native backend unavailable, falling back to reference");
                Ok(EncodeOrchestrator::new(retry)?)
            }
            None => Err(err.into()),
        },
    }
}

/// The request to retry with after `err`, if fallback applies: only a
/// native backend that failed to initialize falls back to the reference one.
fn fallback_request(
    request: EncodeRequest,
    err: &EngineError,
    fallback: bool,
) -> Option<EncodeRequest> {
    let applies = fallback
        && request.backend == BackendKind::Native
        && err.kind() == ErrorKind::BackendInitialization;
    applies.then(|| request.with_backend(BackendKind::Reference))
}
