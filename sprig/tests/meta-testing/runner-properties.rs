//! Property runner properties
//!
//! The runner's own behaviour: alternation coverage, greedy shrinking to the
//! failure threshold and replay from a seed and path.

use crate::{arbitrary_seed, fast_config};
use sprig::*;

/// `one_of(constant(1), constant(2))` stays inside its alternatives
pub fn test_one_of_thousand_draws() {
    let arb = one_of(vec![constant(1).boxed(), constant(2).boxed()]).unwrap();
    let mut rng = SplitMix::new(2024);
    let draws: Vec<i32> = (0..1000).map(|_| arb.generate(&mut rng).value).collect();
    assert!(draws.iter().all(|x| *x == 1 || *x == 2));
    assert!(draws.contains(&1) && draws.contains(&2));
}

/// Property: a threshold predicate always shrinks to the threshold itself
pub fn test_runner_finds_threshold() {
    let prop = for_all(tuple((arbitrary_seed(), nat(500))), |&(seed, threshold)| {
        let inner = for_all(integer_range(0, 1000).unwrap(), move |&x| x < threshold);
        match inner.run(&Config::default().with_seed(seed)) {
            Ok(TestResult::Fail { counterexample, .. }) => counterexample.value == threshold,
            _ => false,
        }
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Threshold shrinking property passed"),
        result => panic!("Threshold shrinking property failed: {result:?}"),
    }
}

/// Property: seed plus path reproduces the reported counterexample
pub fn test_replay_reproduces() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let inner = for_all(json(), |text| text.len() < 12);
        let config = Config::default().with_seed(seed);
        let found = match inner.run(&config) {
            Ok(TestResult::Fail { counterexample, .. }) => counterexample,
            _ => return true,
        };
        match inner.run(&config.with_path(found.path.clone())) {
            Ok(TestResult::Fail { counterexample, .. }) => {
                counterexample.value == found.value && counterexample.path == found.path
            }
            _ => false,
        }
    });

    match prop.run(&fast_config().with_tests(20)) {
        Ok(TestResult::Pass { .. }) => println!("✓ Replay property passed"),
        result => panic!("Replay property failed: {result:?}"),
    }
}
