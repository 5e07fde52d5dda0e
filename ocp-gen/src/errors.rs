//! Fatal error kinds for a generation run.
use ocp_core::err_impl;

use crate::config::ConfigViolations;

err_impl! {
    /// Everything that can abort a run.  None of these are retried; a failed run writes no output.
    GenError,
    /// A config or template path was given but does not exist.
    #[error("cannot find file \"{0}\"")]
    MissingFile(String),

    /// Only one half of the start/end date pair was supplied.
    #[error("{0}")]
    DateRangeArgs(String),

    /// One or more merged config values have the wrong type or are out of range.
    #[error("invalid configuration:\n{0}")]
    ConfigType(ConfigViolations),

    /// A uniqueness-constrained name or id could not be made fresh.
    #[error("could not generate a unique value: {0}")]
    GenerationExhausted(String),

    /// A namespace without pods was asked to produce volume claims.
    #[error("namespace {0} has no pods for its volume claims to reference")]
    EmptyNamespace(String),

    /// The template failed to load or render.
    #[error("template error: {0}")]
    Template(String),
}
