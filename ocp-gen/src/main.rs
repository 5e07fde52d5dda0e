#![deny(
    // Anything tripping these gets an inline allow so reviewers know to look twice.
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]
//! Command-line entry point for the OCP fixture generator.  See `--help` for the flags.
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use ocp_gen::args::{
    handle_args,
    Cli,
};
use ocp_gen::NameCache;
use tracing::info;

/// Parse arguments, set up logging and run one generation.
fn main() -> Result<()> {
    let cli = Cli::parse();

    ocp_core::logging::setup(&cli.verbosity);
    info!("Starting fixture generation from template {}", cli.template.display());

    let args = handle_args(cli)?;
    let mut cache = NameCache::new();
    ocp_gen::pipeline::run(&args, Local::now().date_naive(), &mut cache)
}
