use assertables::*;
use rstest::*;

use crate::cache::*;
use crate::errors::GenError;

#[rstest]
#[case::dynamic_only("", "lorem-ipsum", "", "lorem-ipsum")]
#[case::prefixed("node", "lorem-ipsum", "", "node-lorem-ipsum")]
#[case::indexed("ns-pod", "", "0", "ns-pod-0")]
#[case::all_parts("a", "b", "c", "a-b-c")]
#[case::hyphen_runs("a--", "-b", "--c", "a-b-c")]
#[case::empty("", "", "", "")]
fn test_compose_name(#[case] prefix: &str, #[case] middle: &str, #[case] suffix: &str, #[case] expected: &str) {
    assert_eq!(compose_name(prefix, middle, suffix), expected);
}

#[test]
fn test_reserve_rejects_duplicates() {
    let mut cache = NameCache::new();
    assert!(cache.is_empty());
    assert!(cache.reserve(Registry::Names, "foo"));
    assert!(!cache.reserve(Registry::Names, "foo"));
    assert!(cache.contains(Registry::Names, "foo"));
    assert_eq!(cache.len(Registry::Names), 1);
}

#[test]
fn test_registries_are_independent() {
    let mut cache = NameCache::new();
    assert!(cache.reserve(Registry::Names, "0001"));
    assert!(cache.reserve(Registry::ResourceIds, "0001"));
    assert!(!cache.contains(Registry::ResourceIds, "0002"));
    assert_eq!(cache.len(Registry::Names), 1);
    assert_eq!(cache.len(Registry::ResourceIds), 1);
}

#[test]
fn test_generate_unique_retries_until_fresh() {
    let mut cache = NameCache::new();
    cache.reserve(Registry::Names, "taken");

    let mut candidates = vec!["taken", "taken", "fresh"].into_iter();
    let mut calls = 0;
    let name = cache
        .generate_unique(Registry::Names, || {
            calls += 1;
            candidates.next().unwrap().to_string()
        })
        .unwrap();

    assert_eq!(name, "fresh");
    assert_eq!(calls, 3);
    assert!(cache.contains(Registry::Names, "fresh"));
}

#[test]
fn test_generate_unique_collapses_before_checking() {
    let mut cache = NameCache::new();
    cache.reserve(Registry::Names, "a-b");

    let mut candidates = vec!["a--b", "a---c"].into_iter();
    let name = cache
        .generate_unique(Registry::Names, || candidates.next().unwrap().to_string())
        .unwrap();

    assert_eq!(name, "a-c");
}

#[test]
fn test_generate_unique_exhausted() {
    let mut cache = NameCache::with_max_attempts(3);
    cache.reserve(Registry::ResourceIds, "0000000001");

    let mut calls = 0;
    let err = cache
        .generate_unique(Registry::ResourceIds, || {
            calls += 1;
            "0000000001".into()
        })
        .unwrap_err();

    assert_eq!(calls, 3);
    assert!(matches!(err.downcast_ref::<GenError>(), Some(GenError::GenerationExhausted(_))));
    assert_contains!(err.to_string(), "resource id");
    assert_contains!(err.to_string(), "0000000001");
}

#[test]
fn test_zero_attempts_still_tries_once() {
    let mut cache = NameCache::with_max_attempts(0);
    assert_eq!(cache.generate_unique(Registry::Names, || "only".into()).unwrap(), "only");
}
