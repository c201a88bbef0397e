//! Recursive structure properties
//!
//! Closure of keys and leaves under shrinking, nesting bounds and key
//! uniqueness for `anything` and `object`.

use crate::{arbitrary_depth, arbitrary_seed, fast_config};
use sprig::*;
use std::collections::HashSet;

const KEYS: [&str; 3] = ["id", "name", "tags"];

/// Keys from a fixed set, leaves from two constants.
fn restricted(max_depth: usize) -> ObjectConstraints {
    let key = one_of(KEYS.iter().map(|k| constant(k.to_string()).boxed()).collect())
        .unwrap()
        .boxed();
    ObjectConstraints::default()
        .with_key(key)
        .with_values(vec![
            constant(Value::Int(7)).boxed(),
            constant(Value::Text("leaf".to_string())).boxed(),
        ])
        .with_max_depth(max_depth)
}

fn within_domain(value: &Value) -> bool {
    value.keys().iter().all(|k| KEYS.contains(k))
        && value
            .leaves()
            .iter()
            .all(|leaf| matches!(leaf, Value::Int(7)) || **leaf == Value::Text("leaf".to_string()))
}

/// Property: every draw and every shrunk descendant stays inside the domains
pub fn test_closure_over_shrink_trees() {
    let prop = for_all(tuple((arbitrary_seed(), arbitrary_depth())), |&(seed, depth)| {
        let arb = anything(restricted(depth)).unwrap();
        let tree = arb.generate(&mut SplitMix::new(seed));
        tree.expand(4, 4).iter().all(within_domain)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Structure closure property passed"),
        result => panic!("Structure closure property failed: {result:?}"),
    }
}

/// Property: `anything` never nests deeper than its budget
pub fn test_anything_depth_bound() {
    let prop = for_all(tuple((arbitrary_seed(), arbitrary_depth())), |&(seed, depth)| {
        let arb = anything(ObjectConstraints::default().with_max_depth(depth)).unwrap();
        let tree = arb.generate(&mut SplitMix::new(seed));
        tree.expand(2, 4).iter().all(|value| value.depth() <= depth)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Anything depth property passed"),
        result => panic!("Anything depth property failed: {result:?}"),
    }
}

/// Property: `object` is always keyed at the top and nests at most one level more
pub fn test_object_depth_bound() {
    let prop = for_all(tuple((arbitrary_seed(), arbitrary_depth())), |&(seed, depth)| {
        let arb = object(ObjectConstraints::default().with_max_depth(depth)).unwrap();
        let tree = arb.generate(&mut SplitMix::new(seed));
        tree.expand(2, 4)
            .iter()
            .all(|value| matches!(value, Value::Object(_)) && value.depth() <= depth + 1)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Object depth property passed"),
        result => panic!("Object depth property failed: {result:?}"),
    }
}

fn keys_unique(value: &Value) -> bool {
    match value {
        Value::Object(entries) => {
            let keys: HashSet<&String> = entries.iter().map(|(k, _)| k).collect();
            keys.len() == entries.len() && entries.iter().all(|(_, v)| keys_unique(v))
        }
        Value::Array(items) => items.iter().all(keys_unique),
        _ => true,
    }
}

/// Property: no object repeats a key, even with a three-key domain
pub fn test_object_keys_unique() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let arb = object(restricted(2).with_max_keys(6)).unwrap();
        let tree = arb.generate(&mut SplitMix::new(seed));
        tree.expand(3, 5).iter().all(keys_unique)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Object key uniqueness property passed"),
        result => panic!("Object key uniqueness property failed: {result:?}"),
    }
}
