//! Constructors for one entity at a time.
//!
//! Each constructor fills in an entity's scalar fields according to the [`GenerationMode`],
//! reserving its name (and, for nodes, its resource id) in the shared [`NameCache`].  Children are
//! attached afterwards by the [`TreeBuilder`](crate::builder::TreeBuilder).
//!
//! Nodes and namespaces get word-based (dynamic) names; pods, volumes and claims get index-suffixed
//! names with no random component so siblings stay ordered.
use anyhow::Result;
use ocp_core::errors::*;
use tracing::debug;

use crate::cache::{
    compose_name,
    NameCache,
    Registry,
};
use crate::config::RunConfig;
use crate::errors::GenError;
use crate::model::{
    Namespace,
    Node,
    Pod,
    Volume,
    VolumeClaim,
};
use crate::randomizer::Randomizer;

/// Whether counts and metrics take their configured maximum or are sampled below it.  Name and
/// label words are random in both modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationMode {
    /// Every count and metric is its configured maximum.
    #[default]
    Fixed,
    /// Every count and metric is uniform in `[1, max]`.
    Randomized,
}

impl GenerationMode {
    /// Map the command line's `--random` switch to a mode.
    #[must_use]
    pub fn from_random_flag(random: bool) -> Self {
        if random {
            GenerationMode::Randomized
        } else {
            GenerationMode::Fixed
        }
    }

    /// A count or metric bounded by `max` under this mode.
    pub fn sample<R: Randomizer + ?Sized>(self, rnd: &mut R, max: u64) -> u64 {
        match self {
            GenerationMode::Fixed => max,
            GenerationMode::Randomized => rnd.int_in(1, max),
        }
    }
}

/// Builds single entities for one run.
pub struct EntityFactory<'a, R: Randomizer + ?Sized> {
    /// Bounds and name widths.
    config: &'a RunConfig,
    /// Fixed or randomized.
    mode: GenerationMode,
    /// Shared uniqueness registries.
    cache: &'a mut NameCache,
    /// Source of words and numbers.
    rnd: &'a mut R,
}

impl<'a, R: Randomizer + ?Sized> EntityFactory<'a, R> {
    /// A factory drawing from `rnd` and reserving names in `cache`.
    pub fn new(config: &'a RunConfig, mode: GenerationMode, cache: &'a mut NameCache, rnd: &'a mut R) -> Self {
        EntityFactory { config, mode, cache, rnd }
    }

    /// The mode this factory generates in.
    #[must_use]
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// How many children to create when the configured maximum is `max`.
    pub fn count(&mut self, max: u64) -> u64 {
        self.mode.sample(&mut *self.rnd, max)
    }

    /// `count` pipe-delimited `label_<word>:<word>` pairs.
    pub fn labels(&mut self, count: u64) -> String {
        #[allow(clippy::cast_possible_truncation)]
        let count = count as usize;
        let keys = self.rnd.words(count);
        let values = self.rnd.words(count);
        keys.iter()
            .zip(values.iter())
            .map(|(k, v)| format!("label_{k}:{v}"))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// `<prefix>-<words>`, fresh in the name registry.
    fn dynamic_name(&mut self, prefix: &str) -> Result<String> {
        #[allow(clippy::cast_possible_truncation)]
        let word_count = self.config.max_name_words as usize;
        let rnd = &mut *self.rnd;
        self.cache
            .generate_unique(Registry::Names, || compose_name(prefix, &rnd.words(word_count).join("-"), ""))
    }

    /// `<prefix>-<index>`, which must not be taken yet.
    fn indexed_name(&mut self, prefix: &str, index: usize) -> Result<String> {
        let name = compose_name(prefix, "", &index.to_string());
        self.cache.generate_unique(Registry::Names, || name.clone())
    }

    /// A fresh zero-padded node id.
    fn resource_id(&mut self) -> Result<String> {
        #[allow(clippy::cast_possible_truncation)]
        let width = self.config.max_resource_id_length as usize;
        let rnd = &mut *self.rnd;
        self.cache.generate_unique(Registry::ResourceIds, || rnd.number_str(width))
    }

    /// A node with no namespaces yet.
    pub fn node(&mut self) -> Result<Node> {
        let cpu_cores = self.count(self.config.max_node_cpu_cores);
        let memory_gig = self.count(self.config.max_node_memory_gig);
        let name = self.dynamic_name("")?;
        let resource_id = self.resource_id()?;
        debug!(%name, %resource_id, cpu_cores, memory_gig, "created node");

        Ok(Node { name, cpu_cores, memory_gig, resource_id, namespaces: vec![] })
    }

    /// A namespace named after `node`, with no pods or volumes yet.
    pub fn namespace(&mut self, node: &Node) -> Result<Namespace> {
        let name = self.dynamic_name(&node.name)?;
        Ok(Namespace { name, pods: vec![], volumes: vec![] })
    }

    /// The `index`th pod of `namespace`, sized against `node`.
    pub fn pod(&mut self, node: &Node, namespace: &str, index: usize) -> Result<Pod> {
        let config = self.config;
        let (cpu_request, mem_request_gig, cpu_limit, mem_limit_gig, pod_seconds) = match self.mode {
            GenerationMode::Fixed => (
                node.cpu_cores,
                node.memory_gig,
                node.cpu_cores,
                node.memory_gig,
                config.max_node_namespace_pod_seconds,
            ),
            GenerationMode::Randomized => (
                self.rnd.int_in(1, node.cpu_cores),
                self.rnd.int_in(1, node.memory_gig),
                self.rnd.int_in(1, node.cpu_cores),
                self.rnd.int_in(1, node.memory_gig),
                self.rnd.stepped_in(
                    config.min_node_namespace_pod_seconds,
                    config.max_node_namespace_pod_seconds,
                    config.pod_seconds_step(),
                ),
            ),
        };

        let name = self.indexed_name(&format!("{namespace}-pod"), index)?;
        let labels = self.labels(config.max_node_namespace_pod_labels);

        Ok(Pod {
            name,
            cpu_request,
            mem_request_gig,
            cpu_limit,
            mem_limit_gig,
            pod_seconds,
            labels,
        })
    }

    /// The `index`th volume of `namespace`, with no claims yet.
    pub fn volume(&mut self, namespace: &str, index: usize) -> Result<Volume> {
        let config = self.config;
        let (class_ix, volume_request_gig) = match self.mode {
            GenerationMode::Fixed => (0, config.max_node_namespace_volume_request_gig),
            GenerationMode::Randomized => (
                self.rnd.pick(config.storage_classes.len()),
                self.rnd.int_in(1, config.max_node_namespace_volume_request_gig),
            ),
        };
        let Some(storage_class) = config.storage_classes.get(class_ix).cloned() else {
            bail!("no storage classes configured");
        };

        let name = self.indexed_name(&format!("{namespace}-vol"), index)?;
        let labels = self.labels(config.max_node_namespace_volume_labels);

        Ok(Volume {
            name,
            storage_class,
            volume_request_gig,
            labels,
            volume_claims: vec![],
        })
    }

    /// The `index`th claim of a volume in `namespace`, bound to the pod at the same index (or the
    /// namespace's last pod once the index runs past the pods).  Claim names are numbered by
    /// `serial`, which counts claims across all volumes of the namespace.
    pub fn volume_claim(&mut self, namespace: &Namespace, index: usize, serial: usize) -> Result<VolumeClaim> {
        let capacity_gig = self.count(self.config.max_node_namespace_volume_volume_claim_capacity_gig);
        let Some(pod) = namespace.claim_pod(index) else {
            return Err(GenError::empty_namespace(&namespace.name));
        };
        let pod_name = pod.name.clone();

        let name = self.indexed_name(&format!("{}-vol-claim", namespace.name), serial)?;
        let labels = self.labels(self.config.max_node_namespace_volume_volume_claim_labels);

        Ok(VolumeClaim { name, pod_name, labels, capacity_gig })
    }
}
