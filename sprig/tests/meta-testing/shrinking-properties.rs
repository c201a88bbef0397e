//! Shrinking correctness properties
//!
//! These properties ensure that following the first child always converges
//! on the canonical minimum, and that candidates are never larger.

use crate::{arbitrary_seed, fast_config};
use sprig::*;

/// Property: every primitive's first-child path ends at its canonical minimum
pub fn test_primitive_first_child_minimums() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let mut rng = SplitMix::new(seed);
        let b = boolean().generate(&mut rng).first_child_minimum(100).value;
        let i = integer().generate(&mut rng).first_child_minimum(100).value;
        let s = string().generate(&mut rng).first_child_minimum(100).value;
        let u = unicode_string().generate(&mut rng).first_child_minimum(100).value;
        let o = option(integer()).generate(&mut rng).first_child_minimum(100).value;
        let d = double().generate(&mut rng);
        let d_min = d.first_child_minimum(100).value;
        let float_ok = if d.value.is_finite() {
            d_min == 0.0
        } else {
            d_min.is_nan() || d_min == d.value
        };
        !b && i == 0 && s.is_empty() && u.is_empty() && o.is_none() && float_ok
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Primitive minimum property passed"),
        result => panic!("Primitive minimum property failed: {result:?}"),
    }
}

/// Property: arrays of a constant shrink to the empty array
pub fn test_array_of_constants_shrinks_to_empty() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let tree = array(constant("x")).generate(&mut SplitMix::new(seed));
        let path = tree.first_child_path(1000);
        path.last().map(|last| last.is_empty()).unwrap_or(false)
            && path.iter().flatten().all(|x| *x == "x")
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Array of constants property passed"),
        result => panic!("Array of constants property failed: {result:?}"),
    }
}

/// Constants never shrink, so a tuple of constants is already minimal
pub fn test_tuple_of_constants_is_minimal() {
    let tree = tuple((constant(true), constant(5))).generate(&mut SplitMix::new(0));
    assert_eq!(tree.first_child_path(100), vec![(true, 5)]);

    let prop = for_all(arbitrary_seed(), |&seed| {
        let arb = tuple((boolean(), integer_range(0, 10).unwrap()));
        let tree = arb.generate(&mut SplitMix::new(seed));
        tree.first_child_minimum(100).value == (false, 0)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Tuple minimum property passed"),
        result => panic!("Tuple minimum property failed: {result:?}"),
    }
}

/// Property: sequence children are never longer, and never larger element-wise
pub fn test_sequence_children_are_smaller() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let tree = array(nat(100)).generate(&mut SplitMix::new(seed));
        tree.shrinks().all(|child| {
            child.value.len() < tree.value.len()
                || (child.value.len() == tree.value.len()
                    && child.value != tree.value
                    && child.value.iter().zip(&tree.value).all(|(c, p)| c <= p))
        })
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Sequence shrink ordering property passed"),
        result => panic!("Sequence shrink ordering property failed: {result:?}"),
    }
}
