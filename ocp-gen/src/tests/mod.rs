mod cache_test;
mod randomizer_test;

use assertables::*;
use chrono::NaiveDate;
use rstest::*;

use crate::config::RunConfig;
use crate::model::Dataset;

pub(crate) const TEST_SEED: u64 = 0x5eed;

pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn assert_between(n: u64, lo: u64, hi: u64) {
    assert_ge!(n, lo);
    assert_le!(n, hi);
}

pub(crate) fn make_test_config() -> RunConfig {
    RunConfig::defaults(ymd(2024, 6, 17)).unwrap()
}

// Two fixed-size nodes, each with one namespace of two pods and one volume with three claims.
pub(crate) fn make_scenario_config() -> RunConfig {
    let mut config = make_test_config();
    config.max_nodes = 2;
    config.max_node_cpu_cores = 4;
    config.max_node_memory_gig = 16;
    config.max_node_namespaces = 1;
    config.max_node_namespace_pods = 2;
    config.max_node_namespace_volumes = 1;
    config.max_node_namespace_volume_volume_claims = 3;
    config.storage_classes = vec!["gp2".into()];
    config
}

#[fixture]
pub(crate) fn test_config() -> RunConfig {
    make_test_config()
}

#[fixture]
pub(crate) fn scenario_config() -> RunConfig {
    make_scenario_config()
}

// Every name in a dataset, in traversal order.
pub(crate) fn all_names(dataset: &Dataset) -> Vec<String> {
    let mut names = vec![];
    for node in &dataset.nodes {
        names.push(node.name.clone());
        for ns in &node.namespaces {
            names.push(ns.name.clone());
            names.extend(ns.pods.iter().map(|p| p.name.clone()));
            for vol in &ns.volumes {
                names.push(vol.name.clone());
                names.extend(vol.volume_claims.iter().map(|c| c.name.clone()));
            }
        }
    }
    names
}
