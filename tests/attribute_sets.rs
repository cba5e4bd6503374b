//! Integration tests for attribute set interning and merging.
//!
//! These exercise the public API the way a variant-matching engine does:
//! many threads building overlapping sets and merging them.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use variant_attributes::attributes::{library_elements_attribute, usage_attribute};
use variant_attributes::{Attribute, AttributeSet, AttributeValue, AttributesFactory};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn attr(name: &str) -> Attribute {
    Attribute::string(format!("it.{}", name))
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_parallel_concat_shares_one_instance() {
    init_logging();
    let factory = AttributesFactory::new();
    let key = attr("parallel.same");

    let results: Vec<AttributeSet> = (0..256)
        .into_par_iter()
        .map(|_| factory.of(key, "value".into()))
        .collect();

    assert!(results.iter().all(|r| r.ptr_eq(&results[0])));
    assert_eq!(factory.nodes_created(), 1);
}

#[test]
fn test_parallel_discarded_results_build_one_node() {
    init_logging();
    let factory = AttributesFactory::new();
    let key = attr("parallel.discarded");

    (0..8).into_par_iter().for_each(|_| {
        for _ in 0..1000 {
            drop(factory.of(key, "same".into()));
        }
    });
    assert_eq!(factory.nodes_created(), 1);

    let first = factory.of(key, "same".into());
    let second = factory.of(key, "same".into());
    assert!(first.ptr_eq(&second));
    assert_eq!(factory.nodes_created(), 1);
}

#[test]
fn test_identity_survives_dropped_intermediate_sets() {
    let factory = AttributesFactory::new();
    let (a, b) = (attr("intermediate.a"), attr("intermediate.b"));

    let first = factory.concat_value(&factory.of(a, "1".into()), b, "2".into());
    let created = factory.nodes_created();
    drop(first);

    let second = factory.concat_value(&factory.of(a, "1".into()), b, "2".into());
    assert_eq!(factory.nodes_created(), created);
    assert!(second.ptr_eq(&factory.concat_value(&factory.of(a, "1".into()), b, "2".into())));
}

#[test]
fn test_parallel_builds_of_the_same_path_converge() {
    let factory = AttributesFactory::new();
    let keys: Vec<_> = (0..6).map(|i| attr(&format!("path.{}", i))).collect();

    let results: Vec<AttributeSet> = (0..64)
        .into_par_iter()
        .map(|_| {
            keys.iter().fold(factory.root(), |set, key| {
                factory.concat_value(&set, *key, "1".into())
            })
        })
        .collect();

    assert!(results.iter().all(|r| r.ptr_eq(&results[0])));
    assert_eq!(factory.nodes_created(), keys.len());
}

#[test]
fn test_distinct_values_under_contention_stay_distinct() {
    let factory = AttributesFactory::new();
    let key = Attribute::integer("it.contention.jvm");
    let base = factory.of(attr("contention.base"), "b".into());

    let results: Vec<(i64, AttributeSet)> = (0..200)
        .into_par_iter()
        .map(|i| {
            let version = i % 8;
            (version, factory.concat_value(&base, key, version.into()))
        })
        .collect();

    for (version, set) in &results {
        assert_eq!(set.get(&key), Some(&AttributeValue::Integer(*version)));
        let same = results.iter().find(|(v, _)| v == version).map(|(_, s)| s).unwrap();
        assert!(set.ptr_eq(same));
    }
    // One node for the base and one per distinct version.
    assert_eq!(factory.nodes_created(), 1 + 8);
}

// ============================================================================
// Merge operators
// ============================================================================

#[test]
fn test_fallback_never_overrides_primary() {
    let factory = AttributesFactory::new();
    let keys: Vec<_> = (0..4).map(|i| attr(&format!("fallback.{}", i))).collect();

    let fallback = factory.from_map(keys.iter().map(|k| (*k, AttributeValue::from("fallback"))));
    let primary = factory.from_map(vec![(keys[1], "primary".into()), (keys[3], "primary".into())]);

    let merged = factory.concat(&fallback, &primary);
    for key in primary.keys() {
        assert_eq!(merged.get(key), primary.get(key));
    }
    assert_eq!(merged.get(&keys[0]), Some(&AttributeValue::from("fallback")));
    assert_eq!(merged.len(), 4);
}

#[test]
fn test_empty_is_identity_for_concat() {
    let factory = AttributesFactory::new();
    let set = factory.from_map(vec![(attr("identity.a"), "1".into()), (attr("identity.b"), "2".into())]);

    assert!(factory.concat(&factory.root(), &set).ptr_eq(&set));
    assert!(factory.concat(&set, &factory.root()).ptr_eq(&set));
}

#[test]
fn test_safe_concat_conflict_reports_key_and_both_values() {
    let factory = AttributesFactory::new();
    let k = Attribute::integer("it.safe.k");

    let ok = factory.safe_concat(&factory.of(k, 1i64.into()), &factory.of(k, 1i64.into()));
    assert_eq!(ok.unwrap(), factory.of(k, 1i64.into()));

    let err = factory
        .safe_concat(&factory.of(k, 1i64.into()), &factory.of(k, 2i64.into()))
        .unwrap_err();
    assert_eq!(err.key, k);
    assert_eq!(err.left, AttributeValue::Integer(1));
    assert_eq!(err.right, AttributeValue::Integer(2));
    assert!(err.to_diagnostic().format(false).contains("conflicting values for attribute `it.safe.k`"));
}

#[test]
fn test_from_map_matches_manual_fold_for_hash_map() {
    let factory = AttributesFactory::new();
    let map: HashMap<Attribute, AttributeValue> = (0..5)
        .map(|i| (attr(&format!("map.{}", i)), AttributeValue::from(format!("v{}", i))))
        .collect();
    let entries: Vec<_> = map.into_iter().collect();

    let built = factory.from_map(entries.clone());

    let mut manual = factory.root();
    for (key, value) in entries {
        manual = factory.concat(&factory.of(key, value), &manual);
    }
    assert!(built.ptr_eq(&manual));
    assert_eq!(built.len(), 5);
}

#[test]
fn test_deprecated_usage_matches_explicit_attributes() {
    let factory = AttributesFactory::new();

    let legacy = factory.from_map(vec![(usage_attribute(), AttributeValue::named("java-runtime-jars"))]);
    let explicit = factory.from_map(vec![
        (usage_attribute(), AttributeValue::named("java-runtime")),
        (library_elements_attribute(), AttributeValue::named("jar")),
    ]);

    assert_eq!(legacy, explicit);
    assert_eq!(
        legacy.to_string(),
        "{org.gradle.usage=java-runtime, org.gradle.libraryelements=jar}"
    );
}
