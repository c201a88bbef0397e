//! Seeded random draws for deterministic generation.
//!
//! Every arbitrary receives a `&mut dyn RandomGenerator` and nothing else as
//! its source of non-determinism. A generator is owned by exactly one run and
//! can be forked into an isolated copy when a second stream is needed.

use std::fmt;

/// A seeded pseudo-random integer source with an inspectable cursor.
pub trait RandomGenerator {
    /// Advance the cursor by one and return the value derived from (seed, cursor).
    fn next_u64(&mut self) -> u64;

    /// Independent copy: draws on the fork never touch the original and vice versa.
    fn fork(&self) -> Box<dyn RandomGenerator>;

    /// Number of draws performed so far.
    fn position(&self) -> u64;

    /// Draw a value uniformly from `[0, bound)`, consuming exactly one draw.
    ///
    /// A bound of zero yields zero.
    fn next_bounded(&mut self, bound: u64) -> u64 {
        let value = self.next_u64();
        ((value as u128 * bound as u128) >> 64) as u64
    }

    /// Draw a value from the inclusive range `[min, max]`.
    fn next_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            // Still consume a draw so composition stays aligned.
            self.next_u64();
            return min;
        }
        let span = (max as i128 - min as i128 + 1) as u128;
        let value = self.next_u64() as u128;
        let offset = (value * span) >> 64;
        (min as i128 + offset as i128) as i64
    }

    /// Draw a boolean.
    fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// Draw a float in `[0, 1)`.
    fn next_unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Default generator built on the SplitMix64 mixing function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix {
    seed: u64,
    state: u64,
    gamma: u64,
    position: u64,
}

impl SplitMix {
    /// Create a generator positioned before its first draw.
    pub fn new(seed: u64) -> Self {
        let state = splitmix64_mix(seed);
        let gamma = mix_gamma(state);
        SplitMix {
            seed,
            state,
            gamma,
            position: 0,
        }
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Skip `draws` values without returning them.
    pub fn advance(&mut self, draws: u64) {
        self.state = self
            .state
            .wrapping_add(self.gamma.wrapping_mul(draws));
        self.position += draws;
    }
}

impl RandomGenerator for SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(self.gamma);
        self.position += 1;
        splitmix64_mix(self.state)
    }

    fn fork(&self) -> Box<dyn RandomGenerator> {
        Box::new(self.clone())
    }

    fn position(&self) -> u64 {
        self.position
    }
}

impl rand::RngCore for SplitMix {
    fn next_u32(&mut self) -> u32 {
        (RandomGenerator::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        RandomGenerator::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = RandomGenerator::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Display for SplitMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SplitMix(seed={}, position={})", self.seed, self.position)
    }
}

/// Draw a fresh run seed from the thread-local entropy source.
pub fn random_seed() -> u64 {
    use rand::Rng;
    rand::thread_rng().gen()
}

/// SplitMix64 mixing function.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn mix_gamma(z: u64) -> u64 {
    let z = splitmix64_mix(z);
    // Odd gamma gives the full period.
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
