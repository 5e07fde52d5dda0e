//! The run configuration: defaults, file/command overrides, and validation of the merged result.
//!
//! Merging happens on an untyped YAML mapping so that a bad value in the config file is reported
//! by key instead of as an opaque deserialization failure.  Only after every known key has been
//! checked is the mapping converted into a [`RunConfig`].
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use ocp_core::errors::*;
use ocp_core::time::{
    first_day_of_previous_month,
    last_day_of_month,
    parse_date,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};
use serde_yaml::{
    Mapping,
    Value,
};
use tracing::{
    debug,
    info,
};

use crate::errors::GenError;

/// Fallback pod-seconds step when neither the configured step nor a tenth of the maximum is
/// usable.
pub const DEFAULT_POD_SECONDS_STEP: u64 = 1800;

/// Largest resource-id width whose values still fit in a `u64`.
pub const MAX_RESOURCE_ID_LENGTH: u64 = 19;

/// Every cardinality and numeric bound that controls the shape of a generated dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// First day of the reporting window.
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    /// Last day of the reporting window.
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
    /// Storage classes volumes are drawn from; the first one is used in fixed mode.
    pub storage_classes: Vec<String>,
    /// Number of words in the dynamic part of node and namespace names.
    pub max_name_words: u64,
    /// Width of the zero-padded node resource ids.
    pub max_resource_id_length: u64,
    /// Node count (fixed) or its upper bound (randomized).
    pub max_nodes: u64,
    /// Per-node CPU cores.
    pub max_node_cpu_cores: u64,
    /// Per-node memory, in GiB.
    pub max_node_memory_gig: u64,
    /// Namespaces per node.
    pub max_node_namespaces: u64,
    /// Pods per namespace.
    pub max_node_namespace_pods: u64,
    /// Lower bound on a pod's run time within the window.
    pub min_node_namespace_pod_seconds: u64,
    /// Upper bound on a pod's run time within the window.
    pub max_node_namespace_pod_seconds: u64,
    /// Granularity of randomized pod seconds; zero derives it from the maximum.
    #[serde(default)]
    pub node_namespace_pod_seconds_step: u64,
    /// Label pairs per pod.
    pub max_node_namespace_pod_labels: u64,
    /// Volumes per namespace.
    pub max_node_namespace_volumes: u64,
    /// Requested size of each volume, in GiB.
    pub max_node_namespace_volume_request_gig: u64,
    /// Label pairs per volume.
    pub max_node_namespace_volume_labels: u64,
    /// Claims per volume.
    pub max_node_namespace_volume_volume_claims: u64,
    /// Label pairs per volume claim.
    pub max_node_namespace_volume_volume_claim_labels: u64,
    /// Capacity of each volume claim, in GiB.
    pub max_node_namespace_volume_volume_claim_capacity_gig: u64,
}

impl RunConfig {
    /// The built-in configuration: the window runs from the first day of last month to the last
    /// day of the month containing `today`, and every bound is small.
    pub fn defaults(today: NaiveDate) -> Result<Self> {
        Ok(RunConfig {
            start_date: first_day_of_previous_month(today)?,
            end_date: last_day_of_month(today)?,
            storage_classes: vec!["gp2".into()],
            max_name_words: 2,
            max_resource_id_length: 10,
            max_nodes: 1,
            max_node_cpu_cores: 1,
            max_node_memory_gig: 2,
            max_node_namespaces: 1,
            max_node_namespace_pods: 1,
            min_node_namespace_pod_seconds: 300,
            max_node_namespace_pod_seconds: 3600,
            node_namespace_pod_seconds_step: 0,
            max_node_namespace_pod_labels: 1,
            max_node_namespace_volumes: 1,
            max_node_namespace_volume_request_gig: 20,
            max_node_namespace_volume_labels: 1,
            max_node_namespace_volume_volume_claims: 1,
            max_node_namespace_volume_volume_claim_labels: 1,
            max_node_namespace_volume_volume_claim_capacity_gig: 20,
        })
    }

    /// Step used when sampling randomized pod seconds.
    #[must_use]
    pub fn pod_seconds_step(&self) -> u64 {
        if self.node_namespace_pod_seconds_step > 0 {
            return self.node_namespace_pod_seconds_step;
        }
        match self.max_node_namespace_pod_seconds / 10 {
            0 => DEFAULT_POD_SECONDS_STEP,
            step => step,
        }
    }

    /// The untyped form used as the base layer of a merge.
    pub fn to_mapping(&self) -> Result<Mapping> {
        match serde_yaml::to_value(self)? {
            Value::Mapping(m) => Ok(m),
            other => bail!("config serialized to a non-mapping value: {other:?}"),
        }
    }
}

/// Accept any date layout [`parse_date`] understands.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Values supplied on the command line; these win over both the defaults and the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replaces `start_date`.
    pub start_date: Option<NaiveDate>,
    /// Replaces `end_date`.
    pub end_date: Option<NaiveDate>,
    /// Replaces `max_nodes`.
    pub max_nodes: Option<u64>,
}

impl ConfigOverrides {
    /// Overwrite the overridden keys of `merged`.
    fn apply(&self, merged: &mut Mapping) {
        if let Some(start) = self.start_date {
            merged.insert("start_date".into(), Value::String(start.to_string()));
        }
        if let Some(end) = self.end_date {
            merged.insert("end_date".into(), Value::String(end.to_string()));
        }
        if let Some(nodes) = self.max_nodes {
            merged.insert("max_nodes".into(), nodes.into());
        }
    }
}

/// Read a YAML key/value config file.  An empty file contributes no overrides.
pub fn load_config_file(path: &Path) -> Result<Mapping> {
    if !path.exists() {
        return Err(GenError::missing_file(&path.display().to_string()));
    }

    info!("Loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&contents)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(m) => Ok(m),
        other => bail!("config file {} must contain a key/value mapping, found {other:?}", path.display()),
    }
}

/// Layer `file` and then `overrides` on top of `defaults` (shallow, key by key) and validate the
/// result.
pub fn merge_config(defaults: &RunConfig, file: Option<Mapping>, overrides: &ConfigOverrides) -> Result<RunConfig> {
    let mut merged = defaults.to_mapping()?;
    if let Some(file) = file {
        for (key, value) in file {
            merged.insert(key, value);
        }
    }
    overrides.apply(&mut merged);

    validate_config(&merged)?;
    Ok(serde_yaml::from_value(Value::Mapping(merged))?)
}

/// The type each known config key must have after merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A date string in any layout [`parse_date`] understands.
    Date,
    /// A sequence of strings.
    List,
    /// A non-negative integer.
    Int,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Date => "date",
            ValueKind::List => "list",
            ValueKind::Int => "int",
        };
        write!(f, "{name}")
    }
}

/// A known key, its declared type, and the smallest value it accepts.
struct KeySpec {
    /// Key as written in the config file.
    name: &'static str,
    /// Expected value type.
    kind: ValueKind,
    /// Smallest accepted value, for int keys.
    min: u64,
}

/// Shorthand for building [`KNOWN_KEYS`].
const fn key(name: &'static str, kind: ValueKind, min: u64) -> KeySpec {
    KeySpec { name, kind, min }
}

/// Every key a merged config must carry, in report order.
const KNOWN_KEYS: &[KeySpec] = &[
    key("start_date", ValueKind::Date, 0),
    key("end_date", ValueKind::Date, 0),
    key("storage_classes", ValueKind::List, 1),
    key("max_name_words", ValueKind::Int, 1),
    key("max_resource_id_length", ValueKind::Int, 1),
    key("max_nodes", ValueKind::Int, 1),
    key("max_node_cpu_cores", ValueKind::Int, 1),
    key("max_node_memory_gig", ValueKind::Int, 1),
    key("max_node_namespaces", ValueKind::Int, 1),
    key("max_node_namespace_pods", ValueKind::Int, 1),
    key("min_node_namespace_pod_seconds", ValueKind::Int, 0),
    key("max_node_namespace_pod_seconds", ValueKind::Int, 1),
    key("node_namespace_pod_seconds_step", ValueKind::Int, 0),
    key("max_node_namespace_pod_labels", ValueKind::Int, 0),
    key("max_node_namespace_volumes", ValueKind::Int, 1),
    key("max_node_namespace_volume_request_gig", ValueKind::Int, 1),
    key("max_node_namespace_volume_labels", ValueKind::Int, 0),
    key("max_node_namespace_volume_volume_claims", ValueKind::Int, 1),
    key("max_node_namespace_volume_volume_claim_labels", ValueKind::Int, 0),
    key("max_node_namespace_volume_volume_claim_capacity_gig", ValueKind::Int, 1),
];

/// One problem with one config key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigViolation {
    /// The offending key.
    pub key: String,
    /// What is wrong with it, phrased to follow the key name.
    pub problem: String,
}

impl ConfigViolation {
    /// A violation of `key` described by `problem`.
    fn new(key: &str, problem: impl Into<String>) -> Self {
        ConfigViolation { key: key.into(), problem: problem.into() }
    }

    /// `key` holds something other than `kind`.
    fn wrong_type(key: &str, kind: ValueKind) -> Self {
        Self::new(key, format!("must be of type {kind}"))
    }
}

impl fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.problem)
    }
}

/// Every violation found in a merged config, reported together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigViolations(pub Vec<ConfigViolation>);

impl ConfigViolations {
    /// The offending keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.key.as_str())
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConfigViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<_> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Check every known key of a merged config for type and range, collecting all problems before
/// failing.  Unknown keys are passed through.
pub fn validate_config(merged: &Mapping) -> EmptyResult {
    let mut violations = vec![];

    for spec in KNOWN_KEYS {
        match merged.get(spec.name) {
            None => violations.push(ConfigViolation::new(spec.name, "must be present")),
            Some(value) => violations.extend(check_value(spec, value)),
        }
    }

    violations.extend(check_cross_key(merged));

    for unknown in merged.keys().filter_map(Value::as_str).filter(|k| !is_known_key(k)) {
        debug!("passing through unknown config key {unknown}");
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(GenError::config_type(&ConfigViolations(violations)))
    }
}

/// Whether `name` is one of [`KNOWN_KEYS`].
fn is_known_key(name: &str) -> bool {
    KNOWN_KEYS.iter().any(|spec| spec.name == name)
}

/// Type and range check of one key's value.
fn check_value(spec: &KeySpec, value: &Value) -> Option<ConfigViolation> {
    match spec.kind {
        ValueKind::Date => match value {
            Value::String(s) if parse_date(s).is_ok() => None,
            _ => Some(ConfigViolation::wrong_type(spec.name, spec.kind)),
        },
        ValueKind::List => match value {
            Value::Sequence(items) if items.iter().all(Value::is_string) => {
                items.is_empty().then(|| ConfigViolation::new(spec.name, "must be a non-empty list"))
            },
            _ => Some(ConfigViolation::wrong_type(spec.name, spec.kind)),
        },
        ValueKind::Int => match (value.as_u64(), value.as_i64()) {
            (Some(n), _) if n < spec.min => {
                Some(ConfigViolation::new(spec.name, format!("must be at least {}", spec.min)))
            },
            (Some(n), _) if spec.name == "max_resource_id_length" && n > MAX_RESOURCE_ID_LENGTH => {
                Some(ConfigViolation::new(spec.name, format!("must be at most {MAX_RESOURCE_ID_LENGTH}")))
            },
            (Some(_), _) => None,
            (None, Some(_)) => Some(ConfigViolation::new(spec.name, "must be a non-negative int")),
            (None, None) => Some(ConfigViolation::wrong_type(spec.name, spec.kind)),
        },
    }
}

/// Checks spanning two keys.  Only run when both sides are individually well-formed, so a type
/// error is never reported twice.
fn check_cross_key(merged: &Mapping) -> Vec<ConfigViolation> {
    let mut violations = vec![];

    let min_secs = merged.get("min_node_namespace_pod_seconds").and_then(Value::as_u64);
    let max_secs = merged.get("max_node_namespace_pod_seconds").and_then(Value::as_u64);
    if let (Some(min), Some(max)) = (min_secs, max_secs) {
        if min > max {
            violations.push(ConfigViolation::new(
                "min_node_namespace_pod_seconds",
                format!("must not exceed max_node_namespace_pod_seconds ({max})"),
            ));
        }
    }

    let as_date = |k: &str| merged.get(k).and_then(Value::as_str).and_then(|s| parse_date(s).ok());
    if let (Some(start), Some(end)) = (as_date("start_date"), as_date("end_date")) {
        if start > end {
            violations.push(ConfigViolation::new("start_date", format!("must not be after end_date ({end})")));
        }
    }

    violations
}
