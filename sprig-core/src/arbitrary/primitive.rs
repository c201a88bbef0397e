//! Primitive arbitraries: booleans, integers, floats and text.

use super::{check_max_length, Arbitrary, DEFAULT_MAX_LENGTH};
use crate::error::{Result, SprigError};
use crate::random::RandomGenerator;
use crate::shrinkable::{shrink_bool, shrink_float, shrink_integer, shrink_sequence, Shrinkable};

/// Largest integer a double represents exactly.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Uniform booleans; `true` shrinks to `false`.
#[derive(Debug, Clone, Copy)]
pub struct Boolean;

pub fn boolean() -> Boolean {
    Boolean
}

impl Arbitrary for Boolean {
    type Value = bool;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<bool> {
        shrink_bool(rng.next_bool())
    }
}

/// Integers from an inclusive range, shrinking toward zero (or the bound
/// nearest to zero when zero is outside the range).
#[derive(Debug, Clone, Copy)]
pub struct Integer {
    min: i64,
    max: i64,
}

/// Integers across the 32-bit signed range.
pub fn integer() -> Integer {
    Integer {
        min: i32::MIN as i64,
        max: i32::MAX as i64,
    }
}

/// Integers in `[min, max]`.
pub fn integer_range(min: i64, max: i64) -> Result<Integer> {
    if min > max {
        return Err(SprigError::invalid(format!(
            "integer range is empty: {min} > {max}"
        )));
    }
    Ok(Integer { min, max })
}

/// Non-negative integers up to `max`.
pub fn nat(max: u32) -> Integer {
    Integer {
        min: 0,
        max: max as i64,
    }
}

impl Integer {
    /// The value every shrink path converges on.
    pub fn target(&self) -> i64 {
        0i64.clamp(self.min, self.max)
    }
}

impl Arbitrary for Integer {
    type Value = i64;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<i64> {
        let value = rng.next_range_i64(self.min, self.max);
        shrink_integer(value, self.target())
    }
}

/// Doubles with occasional special values.
///
/// One draw in eight yields a sentinel (zeros, extremes, the bounds of exactly
/// representable integers and, unless restricted to finite values, NaN and the
/// infinities). Other draws spread across magnitudes from 1e-3 to 1e12.
#[derive(Debug, Clone, Copy)]
pub struct Double {
    finite_only: bool,
}

pub fn double() -> Double {
    Double { finite_only: false }
}

/// Doubles that are neither NaN nor infinite.
pub fn finite_double() -> Double {
    Double { finite_only: true }
}

const FINITE_SENTINELS: [f64; 9] = [
    0.0,
    -0.0,
    f64::MAX,
    f64::MIN,
    f64::MIN_POSITIVE,
    -f64::MIN_POSITIVE,
    MAX_SAFE_INTEGER,
    -MAX_SAFE_INTEGER,
    f64::EPSILON,
];

const NON_FINITE_SENTINELS: [f64; 3] = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

impl Double {
    fn sentinel(&self, rng: &mut dyn RandomGenerator) -> f64 {
        let count = if self.finite_only {
            FINITE_SENTINELS.len()
        } else {
            FINITE_SENTINELS.len() + NON_FINITE_SENTINELS.len()
        };
        let index = rng.next_bounded(count as u64) as usize;
        FINITE_SENTINELS
            .iter()
            .chain(NON_FINITE_SENTINELS.iter())
            .copied()
            .nth(index)
            .unwrap_or(0.0)
    }
}

impl Arbitrary for Double {
    type Value = f64;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<f64> {
        let value = if rng.next_bounded(8) == 0 {
            self.sentinel(rng)
        } else {
            let exponent = rng.next_range_i64(-3, 12) as i32;
            let unit = rng.next_unit_f64() * 2.0 - 1.0;
            unit * 10f64.powi(exponent)
        };
        shrink_float(value)
    }
}

/// Character domain for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharDomain {
    /// Printable ASCII, `' '` through `'~'`.
    Printable,
    /// Every Unicode scalar value.
    Unicode,
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_COUNT: u32 = 0x800;

impl CharDomain {
    /// Number of characters in the domain.
    pub fn size(&self) -> u32 {
        match self {
            CharDomain::Printable => 0x7f - 0x20,
            CharDomain::Unicode => 0x11_0000 - SURROGATE_COUNT,
        }
    }

    /// The `index`-th character; index 0 is the domain's simplest character.
    pub fn char_at(&self, index: u32) -> char {
        let code = match self {
            CharDomain::Printable => 0x20 + index,
            CharDomain::Unicode if index >= SURROGATE_START => index + SURROGATE_COUNT,
            CharDomain::Unicode => index,
        };
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            CharDomain::Printable => (' '..='~').contains(&c),
            CharDomain::Unicode => true,
        }
    }
}

/// Strings drawn character by character from a [`CharDomain`].
///
/// Shrinks like a sequence (shorter first), then simplifies characters toward
/// the start of the domain.
#[derive(Debug, Clone, Copy)]
pub struct Text {
    domain: CharDomain,
    min_length: usize,
    max_length: usize,
}

/// Printable ASCII strings of up to [`DEFAULT_MAX_LENGTH`] characters.
pub fn string() -> Text {
    Text {
        domain: CharDomain::Printable,
        min_length: 0,
        max_length: DEFAULT_MAX_LENGTH,
    }
}

/// Strings over the whole Unicode scalar range.
pub fn unicode_string() -> Text {
    Text {
        domain: CharDomain::Unicode,
        min_length: 0,
        max_length: DEFAULT_MAX_LENGTH,
    }
}

/// Strings over `domain` whose character count lies in `[min_length, max_length]`.
pub fn string_with(domain: CharDomain, min_length: usize, max_length: usize) -> Result<Text> {
    if min_length > max_length {
        return Err(SprigError::invalid(format!(
            "string length bounds are inverted: {min_length} > {max_length}"
        )));
    }
    check_max_length("string length", max_length)?;
    Ok(Text {
        domain,
        min_length,
        max_length,
    })
}

impl Text {
    pub fn domain(&self) -> CharDomain {
        self.domain
    }

    fn generate_char(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<char> {
        let index = rng.next_bounded(self.domain.size() as u64) as i64;
        let domain = self.domain;
        shrink_integer(index, 0).map(move |i| domain.char_at(i as u32))
    }
}

impl Arbitrary for Text {
    type Value = String;

    fn generate(&self, rng: &mut dyn RandomGenerator) -> Shrinkable<String> {
        let length = rng.next_range_i64(self.min_length as i64, self.max_length as i64) as usize;
        let chars = (0..length).map(|_| self.generate_char(rng)).collect();
        shrink_sequence(chars, self.min_length).map(|chars| chars.into_iter().collect())
    }
}
