//! Arbitraries: composable descriptions of how to draw shrinkable values.
//!
//! An arbitrary is configuration. It keeps no state between draws; all
//! randomness comes from the generator handed to [`Arbitrary::generate`], so
//! generation is a deterministic function of the generator's state on entry.

use crate::error::{Result, SprigError};
use crate::random::RandomGenerator;
use crate::shrinkable::{shrink_option, shrink_sequence, Shrinkable, Zip};
use std::rc::Rc;

pub mod primitive;
pub mod structure;

pub use primitive::*;
pub use structure::*;

/// Default upper bound for generated sequence lengths.
pub const DEFAULT_MAX_LENGTH: usize = 10;

/// Reject a length bound the generator cannot draw up to.
pub(crate) fn check_max_length(what: &str, max_length: usize) -> Result<()> {
    if i64::try_from(max_length).is_err() {
        return Err(SprigError::invalid(format!(
            "{what} bound {max_length} exceeds {}",
            i64::MAX
        )));
    }
    Ok(())
}

/// Draws a [`Shrinkable`] value from a random generator.
pub trait Arbitrary {
    type Value: Clone + 'static;

    /// Draw one value together with its shrink tree.
    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Self::Value>;

    /// Erase the concrete type behind a shared handle.
    fn boxed(self) -> BoxedArbitrary<Self::Value>
    where
        Self: Sized + 'static,
    {
        BoxedArbitrary(Rc::new(self))
    }

    /// Transform generated values, keeping the shrink tree's shape.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> U + 'static,
        U: Clone + 'static,
    {
        Map {
            inner: self,
            f: Rc::new(f),
        }
    }
}

/// Shared, type-erased arbitrary.
pub struct BoxedArbitrary<T>(Rc<dyn Arbitrary<Value = T>>);

impl<T> Clone for BoxedArbitrary<T> {
    fn clone(&self) -> Self {
        BoxedArbitrary(self.0.clone())
    }
}

impl<T: Clone + 'static> Arbitrary for BoxedArbitrary<T> {
    type Value = T;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<T> {
        self.0.generate(rng)
    }

    fn boxed(self) -> BoxedArbitrary<T> {
        self
    }
}

/// Value-transforming wrapper produced by [`Arbitrary::map`].
pub struct Map<A, F> {
    inner: A,
    f: Rc<F>,
}

impl<A, F, U> Arbitrary for Map<A, F>
where
    A: Arbitrary,
    F: Fn(A::Value) -> U + 'static,
    U: Clone + 'static,
{
    type Value = U;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<U> {
        let f = self.f.clone();
        self.inner.generate(rng).map(move |value| f(value))
    }
}

/// Always produces the same value. Draws nothing and never shrinks.
#[derive(Debug, Clone)]
pub struct Constant<T> {
    value: T,
}

pub fn constant<T: Clone + 'static>(value: T) -> Constant<T> {
    Constant { value }
}

impl<T: Clone + 'static> Arbitrary for Constant<T> {
    type Value = T;

    fn generate(&self, _rng: &mut dyn RandomGenerator) -> Shrinkable<T> {
        Shrinkable::new(self.value.clone())
    }
}

/// Picks one alternative uniformly with a single draw and delegates to it.
pub struct OneOf<T> {
    alternatives: Vec<BoxedArbitrary<T>>,
}

/// Alternation over a non-empty, ordered list of arbitraries.
pub fn one_of<T: Clone + 'static>(alternatives: Vec<BoxedArbitrary<T>>) -> Result<OneOf<T>> {
    if alternatives.is_empty() {
        return Err(SprigError::invalid("one_of requires at least one alternative"));
    }
    Ok(OneOf { alternatives })
}

impl<T> OneOf<T> {
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl<T: Clone + 'static> Arbitrary for OneOf<T> {
    type Value = T;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<T> {
        let index = rng.next_bounded(self.alternatives.len() as u64) as usize;
        self.alternatives[index].generate(rng)
    }
}

/// Fixed-arity heterogeneous tuple of arbitraries.
///
/// Components are drawn left to right from the same generator. The shrink
/// tree shrinks one component at a time, in component order.
#[derive(Debug, Clone)]
pub struct Tuple<S>(S);

pub fn tuple<S>(arbitraries: S) -> Tuple<S> {
    Tuple(arbitraries)
}

macro_rules! impl_tuple_arbitrary {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Arbitrary),+> Arbitrary for Tuple<($($name,)+)> {
            type Value = ($($name::Value,)+);

            fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Self::Value> {
                ($(self.0.$idx.generate(rng),)+).zip()
            }
        }
    };
}

impl_tuple_arbitrary!(A 0);
impl_tuple_arbitrary!(A 0, B 1);
impl_tuple_arbitrary!(A 0, B 1, C 2);
impl_tuple_arbitrary!(A 0, B 1, C 2, D 3);
impl_tuple_arbitrary!(A 0, B 1, C 2, D 3, E 4);
impl_tuple_arbitrary!(A 0, B 1, C 2, D 3, E 4, F 5);

/// Variable-length sequence of values drawn from one element arbitrary.
#[derive(Debug, Clone)]
pub struct Array<A> {
    element: A,
    min_length: usize,
    max_length: usize,
}

/// Sequences of up to [`DEFAULT_MAX_LENGTH`] elements.
pub fn array<A: Arbitrary>(element: A) -> Array<A> {
    Array {
        element,
        min_length: 0,
        max_length: DEFAULT_MAX_LENGTH,
    }
}

/// Sequences whose length lies in `[min_length, max_length]`.
pub fn array_with<A: Arbitrary>(
    element: A,
    min_length: usize,
    max_length: usize,
) -> Result<Array<A>> {
    if min_length > max_length {
        return Err(SprigError::invalid(format!(
            "array length bounds are inverted: {min_length} > {max_length}"
        )));
    }
    check_max_length("array length", max_length)?;
    Ok(Array {
        element,
        min_length,
        max_length,
    })
}

impl<A: Arbitrary> Arbitrary for Array<A> {
    type Value = Vec<A::Value>;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Self::Value> {
        let length = rng.next_range_i64(self.min_length as i64, self.max_length as i64) as usize;
        let items = (0..length).map(|_| self.element.generate(rng)).collect();
        shrink_sequence(items, self.min_length)
    }
}

/// Nullable values: `None` roughly once every `freq + 1` draws.
#[derive(Debug, Clone)]
pub struct Optional<A> {
    inner: A,
    freq: u64,
}

pub fn option<A: Arbitrary>(inner: A) -> Optional<A> {
    Optional { inner, freq: 5 }
}

impl<A> Optional<A> {
    /// Draw `None` once every `freq + 1` draws on average.
    pub fn with_freq(mut self, freq: u64) -> Self {
        self.freq = freq;
        self
    }
}

impl<A: Arbitrary> Arbitrary for Optional<A> {
    type Value = Option<A::Value>;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<Self::Value> {
        if rng.next_bounded(self.freq.saturating_add(1)) == 0 {
            shrink_option(None)
        } else {
            shrink_option(Some(self.inner.generate(rng)))
        }
    }
}
