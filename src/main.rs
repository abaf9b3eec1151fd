//! Headless tile-blast runner (default binary).
//!
//! Builds a seeded board, replays the `--click` list and prints the board
//! dump plus the event stream. Set `RUST_LOG=tile_blast_core=debug` to trace
//! each resolution step.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use tile_blast::cli::{run, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tile_blast=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}
