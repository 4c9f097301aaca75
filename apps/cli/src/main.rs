//! # kirana: Terminal Point of Sale
//!
//! Opens the engine over the JSON data directory and hands control to the
//! operator console. All business rules live below this crate; the console
//! only translates input lines into engine calls and renders the results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kirana_store::{JsonTableStore, PosEngine};

mod console;

/// Barcode-driven point of sale for the counter top.
#[derive(Debug, Parser)]
#[command(name = "kirana", version, about)]
struct Cli {
    /// Data directory for the JSON tables.
    /// Defaults to `<platform data dir>/kirana`.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with bill output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kirana_core=debug,kirana_store=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or("no platform data directory; pass --data-dir")?
            .join("kirana"),
    };

    tracing::info!(dir = %data_dir.display(), "opening data directory");
    let store = JsonTableStore::open(data_dir)?;
    let engine = PosEngine::open(store)?;
    console::run(engine)
}
