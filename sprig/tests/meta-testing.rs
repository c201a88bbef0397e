//! Meta testing - using Sprig to test Sprig itself
//!
//! This module contains properties that validate the correctness of Sprig's
//! arbitraries, shrink trees, JSON generation and property runner.

use sprig::*;

#[path = "meta-testing/structure-properties.rs"]
mod structure_properties;

#[path = "meta-testing/shrinking-properties.rs"]
mod shrinking_properties;

#[path = "meta-testing/json-properties.rs"]
mod json_properties;

#[path = "meta-testing/determinism-properties.rs"]
mod determinism_properties;

#[path = "meta-testing/runner-properties.rs"]
mod runner_properties;

/// Helper to generate seeds for meta testing
fn arbitrary_seed() -> impl Arbitrary<Value = u64> {
    nat(10_000).map(|seed| seed as u64)
}

/// Helper to generate nesting budgets for meta testing
fn arbitrary_depth() -> impl Arbitrary<Value = usize> {
    nat(4).map(|depth| depth as usize)
}

/// Settings for properties whose own counterexamples are not interesting.
fn fast_config() -> Config {
    Config::default().with_tests(40).with_shrinks(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_test_structure_closure() {
        structure_properties::test_closure_over_shrink_trees();
    }

    #[test]
    fn meta_test_structure_depth() {
        structure_properties::test_anything_depth_bound();
        structure_properties::test_object_depth_bound();
    }

    #[test]
    fn meta_test_structure_keys() {
        structure_properties::test_object_keys_unique();
    }

    #[test]
    fn meta_test_primitive_minimums() {
        shrinking_properties::test_primitive_first_child_minimums();
    }

    #[test]
    fn meta_test_shrinking_scenarios() {
        shrinking_properties::test_array_of_constants_shrinks_to_empty();
        shrinking_properties::test_tuple_of_constants_is_minimal();
        shrinking_properties::test_sequence_children_are_smaller();
    }

    #[test]
    fn meta_test_json_validity() {
        json_properties::test_json_parses();
        json_properties::test_unicode_json_parses();
        json_properties::test_unicode_json_leaves_ascii();
    }

    #[test]
    fn meta_test_json_minimum() {
        json_properties::test_json_shrinks_to_canonical_minimum();
    }

    #[test]
    fn meta_test_determinism() {
        determinism_properties::test_same_seed_same_value();
        determinism_properties::test_same_seed_same_shrink_path();
        determinism_properties::test_fork_isolation();
    }

    #[test]
    fn meta_test_runner() {
        runner_properties::test_one_of_thousand_draws();
        runner_properties::test_runner_finds_threshold();
        runner_properties::test_replay_reproduces();
    }
}
