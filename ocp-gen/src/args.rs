//! Command-line surface and the checks that run before any config is read.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ocp_core::time::parse_date;
use tracing::warn;

use crate::config::ConfigOverrides;
use crate::errors::GenError;
use crate::factory::GenerationMode;

/// Generate fake OCP usage data and render it through a template.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file path (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file path.
    #[arg(short, long, value_name = "CONF")]
    pub config: Option<PathBuf>,

    /// Template file path.
    #[arg(short, long, value_name = "TMPL")]
    pub template: PathBuf,

    /// Start date (overrides config; default is the first day of last month).
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// End date (overrides config; default is the last day of the current month).
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    /// Number of nodes to generate (overrides config; values below 1 are ignored).
    #[arg(short, long, value_name = "INT", allow_negative_numbers = true)]
    pub num_nodes: Option<i64>,

    /// Randomize the number of nodes, namespaces, pods, volumes and volume claims, and their
    /// sizes.
    #[arg(short, long)]
    pub random: bool,

    /// Seed for the random source, for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`).
    #[arg(short, long, default_value = "info")]
    pub verbosity: String,
}

/// Checked arguments, ready to drive a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunArgs {
    /// Where rendered text goes; `None` means stdout.
    pub output: Option<PathBuf>,
    /// Optional config file, known to exist.
    pub config: Option<PathBuf>,
    /// Template file, known to exist.
    pub template: PathBuf,
    /// Explicit values that override the config.
    pub overrides: ConfigOverrides,
    /// Fixed or randomized generation.
    pub mode: GenerationMode,
    /// Seed for the random source, if any.
    pub seed: Option<u64>,
}

/// Validate parsed arguments: files must exist, dates come in pairs and must parse, and a node
/// count below one is dropped.
pub fn handle_args(cli: Cli) -> Result<RunArgs> {
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(GenError::missing_file(&config.display().to_string()));
        }
    }

    if !cli.template.exists() {
        return Err(GenError::missing_file(&cli.template.display().to_string()));
    }

    let (start_date, end_date) = match (non_empty(cli.start_date.as_deref()), non_empty(cli.end_date.as_deref())) {
        (Some(start), Some(end)) => (Some(parse_date(start)?), Some(parse_date(end)?)),
        (None, None) => (None, None),
        _ => return Err(GenError::date_range_args("The full date range must be supplied or omitted.")),
    };

    let max_nodes = match cli.num_nodes {
        Some(n) if n >= 1 => u64::try_from(n).ok(),
        Some(n) => {
            warn!("ignoring node count {n}; it must be at least 1");
            None
        },
        None => None,
    };

    Ok(RunArgs {
        output: cli.output,
        config: cli.config,
        template: cli.template,
        overrides: ConfigOverrides { start_date, end_date, max_nodes },
        mode: GenerationMode::from_random_flag(cli.random),
        seed: cli.seed,
    })
}

/// `value`, unless it is blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
