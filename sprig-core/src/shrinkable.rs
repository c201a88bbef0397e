//! Lazy rose trees pairing a generated value with its shrink candidates.

use std::fmt;
use std::iter;
use std::rc::Rc;

pub mod render;

/// On-demand stream of strictly smaller candidates.
pub type Shrinks<T> = Box<dyn Iterator<Item = Shrinkable<T>>>;

type Shrinker<T> = Rc<dyn Fn() -> Shrinks<T>>;

/// A value together with a lazily produced sequence of smaller values.
///
/// Calling [`Shrinkable::shrinks`] builds a fresh iterator every time, so the
/// same node can be explored any number of times by any number of callers.
/// Nothing is computed until a child is pulled.
pub struct Shrinkable<T> {
    pub value: T,
    shrinker: Option<Shrinker<T>>,
}

impl<T> Shrinkable<T> {
    /// A value with no shrinks; it is already minimal.
    pub fn new(value: T) -> Self {
        Shrinkable {
            value,
            shrinker: None,
        }
    }

    /// A value whose children are produced by `shrinker` on demand.
    pub fn with_shrinks<F>(value: T, shrinker: F) -> Self
    where
        F: Fn() -> Shrinks<T> + 'static,
    {
        Shrinkable {
            value,
            shrinker: Some(Rc::new(shrinker)),
        }
    }

    /// Start a new pass over the children of this node.
    pub fn shrinks(&self) -> Shrinks<T>
    where
        T: 'static,
    {
        match &self.shrinker {
            Some(shrinker) => shrinker(),
            None => Box::new(iter::empty()),
        }
    }

    /// Whether this node can produce any child at all.
    pub fn has_shrinks(&self) -> bool
    where
        T: 'static,
    {
        self.shrinks().next().is_some()
    }

    /// Transform every value in the tree, keeping its shape.
    pub fn map<U, F>(self, f: F) -> Shrinkable<U>
    where
        T: 'static,
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<U>(self, f: Rc<dyn Fn(T) -> U>) -> Shrinkable<U>
    where
        T: 'static,
        U: 'static,
    {
        let Shrinkable { value, shrinker } = self;
        let value = f(value);
        match shrinker {
            None => Shrinkable::new(value),
            Some(shrinker) => Shrinkable::with_shrinks(value, move || {
                let f = f.clone();
                Box::new(shrinker().map(move |child| child.map_shared(f.clone())))
            }),
        }
    }

    /// Drop every subtree whose root fails `predicate`. The root itself is kept.
    pub fn filter<F>(self, predicate: F) -> Shrinkable<T>
    where
        T: 'static,
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_shared(Rc::new(predicate))
    }

    fn filter_shared(self, predicate: Rc<dyn Fn(&T) -> bool>) -> Shrinkable<T>
    where
        T: 'static,
    {
        let Shrinkable { value, shrinker } = self;
        match shrinker {
            None => Shrinkable::new(value),
            Some(shrinker) => Shrinkable::with_shrinks(value, move || {
                let keep = predicate.clone();
                let predicate = predicate.clone();
                Box::new(
                    shrinker()
                        .filter(move |child| keep(&child.value))
                        .map(move |child| child.filter_shared(predicate.clone())),
                )
            }),
        }
    }

    /// The first child, if any.
    pub fn first_child(&self) -> Option<Shrinkable<T>>
    where
        T: 'static,
    {
        self.shrinks().next()
    }

    /// The child at `index` in this node's shrink order.
    pub fn child_at(&self, index: usize) -> Option<Shrinkable<T>>
    where
        T: 'static,
    {
        self.shrinks().nth(index)
    }

    /// Walk down the tree following child indices.
    pub fn follow(&self, path: &[usize]) -> Option<Shrinkable<T>>
    where
        T: Clone + 'static,
    {
        let mut current = self.clone();
        for &index in path {
            current = current.child_at(index)?;
        }
        Some(current)
    }
}

impl<T: Clone + 'static> Shrinkable<T> {
    /// Values visited by repeatedly taking the first child, starting here.
    ///
    /// At most `limit` steps are taken below the root.
    pub fn first_child_path(&self, limit: usize) -> Vec<T> {
        let mut values = vec![self.value.clone()];
        let mut current = self.clone();
        for _ in 0..limit {
            match current.first_child() {
                Some(child) => {
                    values.push(child.value.clone());
                    current = child;
                }
                None => break,
            }
        }
        values
    }

    /// The node reached by taking the first child until none remain.
    pub fn first_child_minimum(&self, limit: usize) -> Shrinkable<T> {
        let mut current = self.clone();
        for _ in 0..limit {
            match current.first_child() {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Pre-order values of the tree, bounded in depth and in children per node.
    pub fn expand(&self, depth: usize, breadth: usize) -> Vec<T> {
        let mut values = vec![self.value.clone()];
        self.expand_into(&mut values, depth, breadth);
        values
    }

    fn expand_into(&self, values: &mut Vec<T>, depth: usize, breadth: usize) {
        if depth == 0 {
            return;
        }
        for child in self.shrinks().take(breadth) {
            values.push(child.value.clone());
            child.expand_into(values, depth - 1, breadth);
        }
    }
}

impl<T: Clone> Clone for Shrinkable<T> {
    fn clone(&self) -> Self {
        Shrinkable {
            value: self.value.clone(),
            shrinker: self.shrinker.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shrinkable")
            .field("value", &self.value)
            .field("lazy_shrinks", &self.shrinker.is_some())
            .finish()
    }
}

impl<T> From<T> for Shrinkable<T> {
    fn from(value: T) -> Self {
        Shrinkable::new(value)
    }
}

/// `true` shrinks to `false`; `false` is minimal.
pub fn shrink_bool(value: bool) -> Shrinkable<bool> {
    if value {
        Shrinkable::with_shrinks(true, || Box::new(iter::once(Shrinkable::new(false))))
    } else {
        Shrinkable::new(false)
    }
}

/// Integer tree that converges on `target` by halving the remaining distance.
///
/// The first child is always `target` itself.
pub fn shrink_integer(value: i64, target: i64) -> Shrinkable<i64> {
    Shrinkable::with_shrinks(value, move || {
        Box::new(
            integer_candidates(value, target)
                .map(move |candidate| shrink_integer(candidate, target)),
        )
    })
}

fn integer_candidates(value: i64, target: i64) -> impl Iterator<Item = i64> {
    let distance = value as i128 - target as i128;
    let first = if distance == 0 { None } else { Some(distance) };
    iter::successors(first, |step| Some(step / 2).filter(|half| *half != 0))
        .map(move |step| (value as i128 - step) as i64)
}

/// Float tree converging on zero.
///
/// NaN and the infinities have no children. Finite values offer `0.0`, the
/// truncated value when fractional, then points halving the distance to zero.
pub fn shrink_float(value: f64) -> Shrinkable<f64> {
    Shrinkable::with_shrinks(value, move || {
        Box::new(float_candidates(value).into_iter().map(shrink_float))
    })
}

const FLOAT_HALVINGS: i32 = 24;

fn float_candidates(value: f64) -> Vec<f64> {
    if value == 0.0 || !value.is_finite() {
        return Vec::new();
    }
    let mut candidates = vec![0.0];
    let truncated = value.trunc();
    if truncated != value && truncated != 0.0 {
        candidates.push(truncated);
    }
    for exponent in 1..=FLOAT_HALVINGS {
        let candidate = value - value / 2f64.powi(exponent);
        if candidate == value || candidate.abs() >= value.abs() {
            break;
        }
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// `Some(v)` shrinks to `None` first, then through the shrinks of `v`.
pub fn shrink_option<T: Clone + 'static>(inner: Option<Shrinkable<T>>) -> Shrinkable<Option<T>> {
    match inner {
        None => Shrinkable::new(None),
        Some(inner) => {
            let value = Some(inner.value.clone());
            Shrinkable::with_shrinks(value, move || {
                let nested = inner.shrinks().map(|child| shrink_option(Some(child)));
                Box::new(iter::once(Shrinkable::new(None)).chain(nested))
            })
        }
    }
}

/// Tree for a sequence assembled from per-element trees.
///
/// Children first remove chunks (the largest chunk first, so the first child
/// is the shortest sequence allowed by `min_len`), then shrink retained
/// elements in place, left to right.
pub fn shrink_sequence<T: Clone + 'static>(
    items: Vec<Shrinkable<T>>,
    min_len: usize,
) -> Shrinkable<Vec<T>> {
    let value: Vec<T> = items.iter().map(|item| item.value.clone()).collect();
    let items = Rc::new(items);
    Shrinkable::with_shrinks(value, move || {
        Box::new(
            sequence_candidates(items.clone(), min_len)
                .map(move |kept| shrink_sequence(kept, min_len)),
        )
    })
}

/// The element trees behind each child of [`shrink_sequence`], in order.
pub fn sequence_candidates<T: Clone + 'static>(
    items: Rc<Vec<Shrinkable<T>>>,
    min_len: usize,
) -> impl Iterator<Item = Vec<Shrinkable<T>>> {
    removal_candidates(items.clone(), min_len).chain(element_candidates(items))
}

fn removal_candidates<T: Clone + 'static>(
    items: Rc<Vec<Shrinkable<T>>>,
    min_len: usize,
) -> impl Iterator<Item = Vec<Shrinkable<T>>> {
    let len = items.len();
    let removable = len.saturating_sub(min_len);
    let first = Some(removable).filter(|&k| k > 0);
    iter::successors(first, |&k| Some(k / 2).filter(|&half| half > 0)).flat_map(move |chunk| {
        let items = items.clone();
        (0..=len - chunk).step_by(chunk).map(move |start| {
            let kept: Vec<Shrinkable<T>> = items[..start]
                .iter()
                .chain(items[start + chunk..].iter())
                .cloned()
                .collect();
            kept
        })
    })
}

fn element_candidates<T: Clone + 'static>(
    items: Rc<Vec<Shrinkable<T>>>,
) -> impl Iterator<Item = Vec<Shrinkable<T>>> {
    (0..items.len()).flat_map(move |index| {
        let children = items[index].shrinks();
        let items = items.clone();
        children.map(move |child| {
            let mut next = items.as_ref().clone();
            next[index] = child;
            next
        })
    })
}

/// Combine a tuple of trees into a tree of tuples.
///
/// Children shrink one component at a time while the others stay fixed,
/// trying components in order.
pub trait Zip {
    type Output;

    fn zip(self) -> Shrinkable<Self::Output>;
}

macro_rules! impl_zip {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Clone + 'static),+> Zip for ($(Shrinkable<$name>,)+) {
            type Output = ($($name,)+);

            fn zip(self) -> Shrinkable<Self::Output> {
                let value = ($(self.$idx.value.clone(),)+);
                let parts = self;
                Shrinkable::with_shrinks(value, move || {
                    let mut streams: Vec<Shrinks<($($name,)+)>> = Vec::new();
                    $(
                        let base = parts.clone();
                        let children = parts.$idx.shrinks();
                        streams.push(Box::new(children.map(move |child| {
                            let mut next = base.clone();
                            next.$idx = child;
                            next.zip()
                        })));
                    )+
                    Box::new(streams.into_iter().flatten())
                })
            }
        }
    };
}

impl_zip!(A 0);
impl_zip!(A 0, B 1);
impl_zip!(A 0, B 1, C 2);
impl_zip!(A 0, B 1, C 2, D 3);
impl_zip!(A 0, B 1, C 2, D 3, E 4);
impl_zip!(A 0, B 1, C 2, D 3, E 4, F 5);
