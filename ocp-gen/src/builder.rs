//! Top-down assembly of a whole [`Dataset`].
//!
//! Traversal order is part of the output contract: nodes in order, and within each namespace all
//! pods before any volume, each volume followed by its claims.  Index suffixes and the shared name
//! cache both depend on it.
use anyhow::Result;
use tracing::{
    debug,
    info,
    instrument,
};

use crate::cache::NameCache;
use crate::config::RunConfig;
use crate::factory::{
    EntityFactory,
    GenerationMode,
};
use crate::model::{
    Dataset,
    Namespace,
    Node,
    Volume,
};
use crate::randomizer::Randomizer;

/// Drives an [`EntityFactory`] through one full tree.
pub struct TreeBuilder<'a, R: Randomizer + ?Sized> {
    /// Bounds for every level of the tree.
    config: &'a RunConfig,
    /// Makes each entity and reserves its name.
    factory: EntityFactory<'a, R>,
}

impl<'a, R: Randomizer + ?Sized> TreeBuilder<'a, R> {
    /// A builder for one dataset.  `cache` may already hold names from earlier runs; none of them
    /// will be reused.
    pub fn new(config: &'a RunConfig, mode: GenerationMode, cache: &'a mut NameCache, rnd: &'a mut R) -> Self {
        TreeBuilder { config, factory: EntityFactory::new(config, mode, cache, rnd) }
    }

    /// Generate the dataset.
    #[instrument(skip(self), fields(mode = ?self.factory.mode()))]
    pub fn build(mut self) -> Result<Dataset> {
        info!("Data build starting");

        let node_count = self.factory.count(self.config.max_nodes);
        let mut nodes = vec![];
        for node_ix in 0..node_count {
            info!("Building node {}/{node_count}...", node_ix + 1);
            nodes.push(self.build_node(node_ix, node_count)?);
        }

        info!("Data build finished with {} nodes", nodes.len());
        Ok(Dataset {
            start_date: self.config.start_date,
            end_date: self.config.end_date,
            nodes,
        })
    }

    /// One node and all of its namespaces.
    fn build_node(&mut self, node_ix: u64, node_count: u64) -> Result<Node> {
        let mut node = self.factory.node()?;

        let namespace_count = self.factory.count(self.config.max_node_namespaces);
        for namespace_ix in 0..namespace_count {
            info!(
                "Building node {}/{node_count}; namespace {}/{namespace_count}...",
                node_ix + 1,
                namespace_ix + 1
            );
            let namespace = self.build_namespace(&node)?;
            node.namespaces.push(namespace);
        }

        Ok(node)
    }

    /// One namespace: its pods first, then its volumes.
    fn build_namespace(&mut self, node: &Node) -> Result<Namespace> {
        let mut namespace = self.factory.namespace(node)?;

        let pod_count = self.factory.count(self.config.max_node_namespace_pods);
        info!("Building {pod_count} pods...");
        for pod_ix in 0..pod_count {
            let pod = self.factory.pod(node, &namespace.name, to_index(pod_ix))?;
            debug!("created pod {}", pod.name);
            namespace.pods.push(pod);
        }

        let volume_count = self.factory.count(self.config.max_node_namespace_volumes);
        info!("Building {volume_count} volumes...");
        let mut claim_serial = 0;
        for volume_ix in 0..volume_count {
            let volume = self.build_volume(&namespace, to_index(volume_ix), &mut claim_serial)?;
            namespace.volumes.push(volume);
        }

        Ok(namespace)
    }

    /// One volume and its claims.  `claim_serial` numbers claims across the namespace.
    fn build_volume(&mut self, namespace: &Namespace, index: usize, claim_serial: &mut usize) -> Result<Volume> {
        let mut volume = self.factory.volume(&namespace.name, index)?;

        let claim_count = self.factory.count(self.config.max_node_namespace_volume_volume_claims);
        for claim_ix in 0..claim_count {
            let claim = self.factory.volume_claim(namespace, to_index(claim_ix), *claim_serial)?;
            *claim_serial += 1;
            debug!("created volume claim {} for pod {}", claim.name, claim.pod_name);
            volume.volume_claims.push(claim);
        }

        Ok(volume)
    }
}

/// A generated count as a vector index.
#[allow(clippy::cast_possible_truncation)]
fn to_index(ix: u64) -> usize {
    ix as usize
}

/// Generate one dataset from `config`, reserving every name and id in `cache`.
pub fn build_dataset<R: Randomizer + ?Sized>(
    config: &RunConfig,
    mode: GenerationMode,
    cache: &mut NameCache,
    rnd: &mut R,
) -> Result<Dataset> {
    TreeBuilder::new(config, mode, cache, rnd).build()
}
