//! JSON text properties

use crate::{arbitrary_depth, arbitrary_seed, fast_config};
use sprig::*;

fn parses(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Property: generated JSON and every shrink candidate parse
pub fn test_json_parses() {
    let prop = for_all(tuple((arbitrary_seed(), arbitrary_depth())), |&(seed, depth)| {
        let tree = json_with(depth).generate(&mut SplitMix::new(seed));
        tree.expand(3, 4).iter().all(|text| parses(text))
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ JSON validity property passed"),
        result => panic!("JSON validity property failed: {result:?}"),
    }
}

/// Property: Unicode JSON parses back to a value of bounded depth
pub fn test_unicode_json_parses() {
    let prop = for_all(tuple((arbitrary_seed(), arbitrary_depth())), |&(seed, depth)| {
        let tree = unicode_json_with(depth).generate(&mut SplitMix::new(seed));
        tree.expand(2, 4).iter().all(|text| {
            serde_json::from_str::<serde_json::Value>(text)
                .map(|json| Value::from_json(&json).depth() <= depth)
                .unwrap_or(false)
        })
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ Unicode JSON validity property passed"),
        result => panic!("Unicode JSON validity property failed: {result:?}"),
    }
}

/// Unicode JSON reaches past ASCII, plain JSON never does
pub fn test_unicode_json_leaves_ascii() {
    let mut rng = SplitMix::new(4242);
    let unicode: Vec<String> = (0..200)
        .map(|_| unicode_json().generate(&mut rng).value)
        .collect();
    assert!(unicode.iter().any(|text| text.chars().any(|c| c > '\u{7f}')));

    let plain: Vec<String> = (0..200).map(|_| json().generate(&mut rng).value).collect();
    assert!(plain.iter().all(|text| text.is_ascii()));
    println!("✓ Unicode JSON character domain check passed");
}

/// Property: fully shrunk JSON is `false`, `0`, `""`, `null`, `[]` or `{}`
pub fn test_json_shrinks_to_canonical_minimum() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let tree = json().generate(&mut SplitMix::new(seed));
        let minimum = tree.first_child_minimum(1000).value;
        serde_json::from_str::<serde_json::Value>(&minimum)
            .map(|json| Value::from_json(&json).is_canonical_minimum())
            .unwrap_or(false)
    });

    match prop.run(&fast_config()) {
        Ok(TestResult::Pass { .. }) => println!("✓ JSON minimum property passed"),
        result => panic!("JSON minimum property failed: {result:?}"),
    }
}
