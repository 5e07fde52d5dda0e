//! One end-to-end run: config → dataset → rendered text → output.
use anyhow::Result;
use chrono::NaiveDate;
use ocp_core::errors::*;
use tracing::{
    info,
    instrument,
};

use crate::args::RunArgs;
use crate::builder::build_dataset;
use crate::cache::NameCache;
use crate::config::{
    load_config_file,
    merge_config,
    RunConfig,
};
use crate::model::Dataset;
use crate::randomizer::FakeRandomizer;
use crate::render::{
    render_template,
    write_output,
};

/// Resolve the effective config for a run: defaults for `today`, then the config file, then the
/// command-line overrides.
pub fn effective_config(args: &RunArgs, today: NaiveDate) -> Result<RunConfig> {
    let defaults = RunConfig::defaults(today)?;
    let file = args.config.as_deref().map(load_config_file).transpose()?;
    merge_config(&defaults, file, &args.overrides)
}

/// Build a dataset for `args`, drawing names from `cache`.
pub fn generate(args: &RunArgs, config: &RunConfig, cache: &mut NameCache) -> Result<Dataset> {
    let mut rnd = match args.seed {
        Some(seed) => {
            info!("Using random seed {seed}");
            FakeRandomizer::seeded(seed)
        },
        None => FakeRandomizer::from_entropy(),
    };
    build_dataset(config, args.mode, cache, &mut rnd)
}

/// Run the whole pipeline.  Output is only written once rendering has succeeded.
#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn run(args: &RunArgs, today: NaiveDate, cache: &mut NameCache) -> EmptyResult {
    let config = effective_config(args, today)?;
    let dataset = generate(args, &config, cache)?;
    let output = render_template(&args.template, &dataset)?;
    write_output(args.output.as_deref(), &output)
}
