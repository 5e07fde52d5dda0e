//! The generated dataset.  Ownership is strictly tree-shaped: each entity is owned by its parent
//! and never mutated once its own children are in place.
//!
//! Field names are part of the template contract, so they serialize exactly as written here.
use chrono::NaiveDate;
use serde::Serialize;

/// Root of a generated tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// First day of the reporting window (`YYYY-MM-DD`).
    pub start_date: NaiveDate,
    /// Last day of the reporting window (`YYYY-MM-DD`).
    pub end_date: NaiveDate,
    /// Compute nodes, in generation order.
    pub nodes: Vec<Node>,
}

/// A compute node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique, word-based name.
    pub name: String,
    /// CPU capacity; also the ceiling for its pods' CPU values.
    pub cpu_cores: u64,
    /// Memory capacity in GiB; also the ceiling for its pods' memory values.
    pub memory_gig: u64,
    /// Unique fixed-width decimal id, like a cloud instance id.
    pub resource_id: String,
    /// Namespaces scheduled on this node.
    pub namespaces: Vec<Namespace>,
}

/// A namespace on one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Namespace {
    /// Unique name, prefixed with the owning node's name.
    pub name: String,
    /// Pods, index-named in order.
    pub pods: Vec<Pod>,
    /// Volumes, index-named in order.
    pub volumes: Vec<Volume>,
}

/// A pod's resource requests, limits and run time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pod {
    /// `<namespace>-pod-<index>`.
    pub name: String,
    /// Requested cores.
    pub cpu_request: u64,
    /// Requested memory in GiB.
    pub mem_request_gig: u64,
    /// Core limit.  Not forced to be at least the request.
    pub cpu_limit: u64,
    /// Memory limit in GiB.  Not forced to be at least the request.
    pub mem_limit_gig: u64,
    /// Seconds the pod ran within the window.
    pub pod_seconds: u64,
    /// Pipe-delimited `label_<key>:<value>` pairs.
    pub labels: String,
}

/// A persistent volume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// `<namespace>-vol-<index>`.
    pub name: String,
    /// One of the configured storage classes.
    pub storage_class: String,
    /// Requested size in GiB.
    pub volume_request_gig: u64,
    /// Pipe-delimited `label_<key>:<value>` pairs.
    pub labels: String,
    /// Claims bound to this volume.
    pub volume_claims: Vec<VolumeClaim>,
}

/// A claim on a volume, used by one pod of the same namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VolumeClaim {
    /// `<namespace>-vol-claim-<index>`.
    pub name: String,
    /// Name of a pod in the same namespace.  A lookup, not ownership.
    pub pod_name: String,
    /// Pipe-delimited `label_<key>:<value>` pairs.
    pub labels: String,
    /// Claimed capacity in GiB.
    pub capacity_gig: u64,
}

impl Namespace {
    /// The pod a claim with the given index refers to: the pod at the same index, or the last pod
    /// when there are more claims than pods.
    #[must_use]
    pub fn claim_pod(&self, claim_index: usize) -> Option<&Pod> {
        self.pods.get(claim_index).or_else(|| self.pods.last())
    }
}
