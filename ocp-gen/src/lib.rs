#![deny(
    // Anything tripping these gets an inline allow so reviewers know to look twice.
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # ocp-gen – synthetic OCP usage fixtures
//!
//! ocp-gen expands a small configuration into a fake but internally consistent tree of compute
//! nodes, namespaces, pods, volumes and volume claims, and renders it through a text template to
//! produce fixtures for a metering pipeline.
//!
//! ## Pipeline overview
//! 1. Configuration ([`config::merge_config`]) – built-in defaults, then an optional YAML file, then
//!    command-line overrides, validated key by key with every problem reported at once.
//! 2. Generation ([`builder::build_dataset`]) – a depth-first walk that asks the
//!    [`factory::EntityFactory`] for each entity.  Counts and sizes are either the configured
//!    maxima (fixed mode) or sampled below them (randomized mode).  Every name and resource id is
//!    reserved in a [`cache::NameCache`] that can outlive a single run.
//! 3. Rendering ([`render::render_template`]) – the finished [`model::Dataset`] is exposed to a
//!    `minijinja` template as `generator`.
//!
//! The entry point [`pipeline::run`] strings these together.

pub mod args;
pub mod builder;
pub mod cache;
pub mod config;
pub mod errors;
pub mod factory;
pub mod model;
pub mod pipeline;
pub mod randomizer;
pub mod render;

pub use builder::{
    build_dataset,
    TreeBuilder,
};
pub use cache::NameCache;
pub use config::RunConfig;
pub use errors::GenError;
pub use factory::GenerationMode;
pub use model::Dataset;
pub use randomizer::{
    FakeRandomizer,
    Randomizer,
};

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests;
