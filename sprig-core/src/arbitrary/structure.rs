//! Recursive structures: `anything`, `object` and JSON text.
//!
//! Generation is a pure recursive function of the generator and the remaining
//! depth. At depth zero only leaves are drawn; above it one draw decides
//! between a leaf, an array and an object, and containers recurse with one
//! level less. Keys come only from the key arbitrary and leaves only from the
//! value arbitraries, and since containers shrink by dropping entries or by
//! shrinking entries through those same arbitraries' trees, every shrunk
//! descendant stays inside the declared domains too.

use super::{boolean, constant, finite_double, integer, string, unicode_string, Text};
use super::{check_max_length, Arbitrary, BoxedArbitrary};
use crate::error::{Result, SprigError};
use crate::random::RandomGenerator;
use crate::shrinkable::{sequence_candidates, shrink_sequence, Shrinkable, Zip};
use crate::value::Value;
use std::collections::HashSet;
use std::rc::Rc;

/// Default nesting budget.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default maximum number of entries per container.
pub const DEFAULT_MAX_KEYS: usize = 5;

/// Domains and bounds for structured generation.
#[derive(Clone)]
pub struct ObjectConstraints {
    /// Produces object keys.
    pub key: BoxedArbitrary<String>,
    /// Leaf producers; one is picked uniformly per leaf.
    pub values: Vec<BoxedArbitrary<Value>>,
    /// Container nesting budget.
    pub max_depth: usize,
    /// Maximum entries per array or object.
    pub max_keys: usize,
}

impl Default for ObjectConstraints {
    fn default() -> Self {
        ObjectConstraints {
            key: string().boxed(),
            values: default_values(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_keys: DEFAULT_MAX_KEYS,
        }
    }
}

impl ObjectConstraints {
    pub fn with_key(mut self, key: BoxedArbitrary<String>) -> Self {
        self.key = key;
        self
    }

    pub fn with_values(mut self, values: Vec<BoxedArbitrary<Value>>) -> Self {
        self.values = values;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Reject constraints that cannot produce a leaf or bound a container.
    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(SprigError::invalid(
                "structured generation needs at least one value arbitrary",
            ));
        }
        check_max_length("max_keys", self.max_keys)
    }
}

/// Booleans, 32-bit integers, doubles, printable strings and null.
pub fn default_values() -> Vec<BoxedArbitrary<Value>> {
    vec![
        boolean().map(Value::Bool).boxed(),
        integer().map(Value::Int).boxed(),
        super::double().map(Value::Float).boxed(),
        string().map(Value::Text).boxed(),
        constant(Value::Null).boxed(),
    ]
}

/// Leaves that JSON can represent: booleans, integers, finite doubles, text and null.
pub fn json_values(text: Text) -> Vec<BoxedArbitrary<Value>> {
    vec![
        boolean().map(Value::Bool).boxed(),
        integer().map(Value::Int).boxed(),
        finite_double().map(Value::Float).boxed(),
        text.map(Value::Text).boxed(),
        constant(Value::Null).boxed(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopLevel {
    Any,
    Object,
}

/// Recursive structure generator behind `anything` and `object`.
#[derive(Clone)]
pub struct Structure {
    constraints: Rc<ObjectConstraints>,
    top: TopLevel,
}

/// Any shape: a leaf, an array or an object, nested at most `max_depth` deep.
pub fn anything(constraints: ObjectConstraints) -> Result<Structure> {
    constraints.validate()?;
    Ok(Structure {
        constraints: Rc::new(constraints),
        top: TopLevel::Any,
    })
}

/// Always an object at the top level.
///
/// The top-level object sits above the `max_depth` budget, so results nest
/// at most `max_depth + 1` deep.
pub fn object(constraints: ObjectConstraints) -> Result<Structure> {
    constraints.validate()?;
    Ok(Structure {
        constraints: Rc::new(constraints),
        top: TopLevel::Object,
    })
}

impl Structure {
    pub fn constraints(&self) -> &ObjectConstraints {
        &self.constraints
    }

    fn generate_at(&self, rng: &mut dyn RandomGenerator, depth: usize) -> Shrinkable<Value> {
        if depth == 0 {
            return self.generate_leaf(rng);
        }
        match rng.next_bounded(4) {
            0 | 1 => self.generate_leaf(rng),
            2 => self.generate_array(rng, depth - 1),
            _ => self.generate_object(rng, depth - 1),
        }
    }

    fn generate_leaf(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Value> {
        let values = &self.constraints.values;
        let index = rng.next_bounded(values.len() as u64) as usize;
        values[index].generate(rng)
    }

    /// An array whose items recurse with `depth` remaining.
    fn generate_array(&self, rng: &mut dyn RandomGenerator, depth: usize) -> Shrinkable<Value> {
        let bound = (self.constraints.max_keys as u64).saturating_add(1);
        let length = rng.next_bounded(bound) as usize;
        let items = (0..length).map(|_| self.generate_at(rng, depth)).collect();
        shrink_sequence(items, 0).map(Value::Array)
    }

    /// An object whose values recurse with `depth` remaining.
    fn generate_object(&self, rng: &mut dyn RandomGenerator, depth: usize) -> Shrinkable<Value> {
        let bound = (self.constraints.max_keys as u64).saturating_add(1);
        let length = rng.next_bounded(bound) as usize;
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(length);
        for _ in 0..length {
            let key = self.constraints.key.generate(rng);
            let value = self.generate_at(rng, depth);
            if seen.insert(key.value.clone()) {
                entries.push((key, value).zip());
            }
        }
        shrink_object(entries)
    }
}

/// Object tree over entry trees, keeping the first entry for each key.
///
/// Shrinking keys independently can make two of them collide. The shadowed
/// entry is dropped before children are built, so every child differs from
/// its parent.
fn shrink_object(entries: Vec<Shrinkable<(String, Value)>>) -> Shrinkable<Value> {
    let mut seen = HashSet::new();
    let entries: Vec<_> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.value.0.clone()))
        .collect();
    let value = Value::Object(entries.iter().map(|entry| entry.value.clone()).collect());
    let entries = Rc::new(entries);
    Shrinkable::with_shrinks(value, move || {
        Box::new(sequence_candidates(entries.clone(), 0).map(shrink_object))
    })
}

impl Arbitrary for Structure {
    type Value = Value;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Value> {
        match self.top {
            TopLevel::Any => self.generate_at(rng, self.constraints.max_depth),
            TopLevel::Object => self.generate_object(rng, self.constraints.max_depth),
        }
    }
}

fn json_structure(text: Text, max_depth: usize) -> Structure {
    Structure {
        constraints: Rc::new(ObjectConstraints {
            key: text.boxed(),
            values: json_values(text),
            max_depth,
            max_keys: DEFAULT_MAX_KEYS,
        }),
        top: TopLevel::Any,
    }
}

/// JSON text of any shape with printable ASCII strings and keys.
pub fn json() -> impl Arbitrary<Value = String> {
    json_with(DEFAULT_MAX_DEPTH)
}

/// JSON text nested at most `max_depth` deep.
///
/// The shrink tree is the underlying structure's tree, re-serialized at
/// every node, so every candidate is valid JSON.
pub fn json_with(max_depth: usize) -> impl Arbitrary<Value = String> {
    json_structure(string(), max_depth).map(|value: Value| value.to_json_text())
}

/// JSON text whose strings and keys range over all of Unicode.
pub fn unicode_json() -> impl Arbitrary<Value = String> {
    unicode_json_with(DEFAULT_MAX_DEPTH)
}

pub fn unicode_json_with(max_depth: usize) -> impl Arbitrary<Value = String> {
    json_structure(unicode_string(), max_depth).map(|value: Value| value.to_json_text())
}
