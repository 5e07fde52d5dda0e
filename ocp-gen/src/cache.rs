//! Uniqueness registries for generated names and resource ids.
//!
//! A [`NameCache`] is owned by the caller and handed by `&mut` to every constructor.  Nothing is
//! ever evicted, so datasets built one after another with the same cache never repeat a name or an
//! id.
use std::collections::HashSet;
use std::fmt;

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::errors::GenError;

/// Attempts `generate_unique` makes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

lazy_static! {
    /// One or more consecutive hyphens.
    static ref HYPHEN_RUN: Regex = Regex::new("-+").expect("static regex is valid");
}

/// Which registry a value is reserved in.  Names and resource ids are independent namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Registry {
    /// Node, namespace, pod, volume and claim names.
    Names,
    /// Node resource ids.
    ResourceIds,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registry::Names => write!(f, "name"),
            Registry::ResourceIds => write!(f, "resource id"),
        }
    }
}

/// Every name and resource id handed out so far.
#[derive(Debug)]
pub struct NameCache {
    /// Entity names handed out so far.
    names: HashSet<String>,
    /// Node resource ids handed out so far.
    resource_ids: HashSet<String>,
    /// Candidates tried per value before giving up.
    max_attempts: usize,
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NameCache {
    /// An empty cache with the default retry cap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// An empty cache that tries each constructor at most `max_attempts` times (at least once).
    #[must_use]
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        NameCache {
            names: HashSet::new(),
            resource_ids: HashSet::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// The set backing `registry`.
    fn registry(&self, registry: Registry) -> &HashSet<String> {
        match registry {
            Registry::Names => &self.names,
            Registry::ResourceIds => &self.resource_ids,
        }
    }

    /// The set backing `registry`, mutably.
    fn registry_mut(&mut self, registry: Registry) -> &mut HashSet<String> {
        match registry {
            Registry::Names => &mut self.names,
            Registry::ResourceIds => &mut self.resource_ids,
        }
    }

    /// Whether `candidate` has already been handed out.
    #[must_use]
    pub fn contains(&self, registry: Registry, candidate: &str) -> bool {
        self.registry(registry).contains(candidate)
    }

    /// Number of values reserved in `registry`.
    #[must_use]
    pub fn len(&self, registry: Registry) -> usize {
        self.registry(registry).len()
    }

    /// Whether nothing at all has been reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.resource_ids.is_empty()
    }

    /// Record `candidate`, returning `false` if it was already taken.
    pub fn reserve(&mut self, registry: Registry, candidate: &str) -> bool {
        if self.contains(registry, candidate) {
            return false;
        }
        self.registry_mut(registry).insert(candidate.to_owned())
    }

    /// Call `make` until it yields a value (hyphen runs collapsed) that is not yet in `registry`,
    /// then reserve and return it.  Fails with `GenerationExhausted` after the retry cap.
    pub fn generate_unique<F>(&mut self, registry: Registry, mut make: F) -> Result<String>
    where
        F: FnMut() -> String,
    {
        let mut last = String::new();
        for attempt in 1..=self.max_attempts {
            let candidate = collapse_hyphens(&make());
            if self.reserve(registry, &candidate) {
                if attempt > 1 {
                    trace!("found fresh {registry} {candidate} after {attempt} attempts");
                }
                return Ok(candidate);
            }
            last = candidate;
        }

        Err(GenError::generation_exhausted(&format!(
            "no fresh {registry} after {} attempts (last candidate {last:?})",
            self.max_attempts
        )))
    }
}

/// Replace every run of hyphens with a single hyphen.
#[must_use]
pub fn collapse_hyphens(name: &str) -> String {
    HYPHEN_RUN.replace_all(name, "-").into_owned()
}

/// Join the non-empty parts of a name with hyphens.
#[must_use]
pub fn compose_name(prefix: &str, middle: &str, suffix: &str) -> String {
    let parts: Vec<_> = [prefix, middle, suffix].into_iter().filter(|p| !p.is_empty()).collect();
    collapse_hyphens(&parts.join("-"))
}
