//! Run configuration and replay paths.

use crate::error::{Result, SprigError};
use std::fmt;
use std::str::FromStr;

/// Environment variable that pins the run seed.
pub const SEED_ENV: &str = "SPRIG_SEED";

/// Environment variable that overrides the number of trials.
pub const NUM_RUNS_ENV: &str = "SPRIG_NUM_RUNS";

/// Address of a counterexample: the failing trial, then the child index taken
/// at each accepted shrink step.
///
/// Written as colon-separated indices, for example `"3:0:1"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShrinkPath {
    pub trial: usize,
    pub children: Vec<usize>,
}

impl ShrinkPath {
    pub fn new(trial: usize, children: Vec<usize>) -> Self {
        ShrinkPath { trial, children }
    }
}

impl fmt::Display for ShrinkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trial)?;
        for child in &self.children {
            write!(f, ":{child}")?;
        }
        Ok(())
    }
}

impl FromStr for ShrinkPath {
    type Err = SprigError;

    fn from_str(s: &str) -> Result<Self> {
        let mut indices = s.trim().split(':').map(|part| {
            part.parse::<usize>().map_err(|_| SprigError::InvalidConfig {
                message: format!("invalid replay path {s:?}: {part:?} is not an index"),
            })
        });
        let trial = match indices.next() {
            Some(trial) => trial?,
            None => {
                return Err(SprigError::InvalidConfig {
                    message: "empty replay path".to_string(),
                })
            }
        };
        let children = indices.collect::<Result<Vec<_>>>()?;
        Ok(ShrinkPath { trial, children })
    }
}

/// Configuration for property runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of trials before a property is declared passing.
    pub test_limit: usize,

    /// Maximum number of accepted shrink steps.
    pub shrink_limit: usize,

    /// Maximum number of predicate evaluations spent on shrinking.
    pub shrink_attempt_limit: usize,

    /// Run seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,

    /// Replay a single counterexample instead of running trials.
    pub path: Option<ShrinkPath>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            shrink_attempt_limit: 10_000,
            seed: None,
            path: None,
        }
    }
}

impl Config {
    /// Defaults, overridden by `SPRIG_SEED` and `SPRIG_NUM_RUNS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(seed) = lookup(SEED_ENV) {
            config.seed = Some(parse_env(SEED_ENV, &seed)?);
        }
        if let Some(runs) = lookup(NUM_RUNS_ENV) {
            config.test_limit = parse_env(NUM_RUNS_ENV, &runs)?;
        }
        Ok(config)
    }

    /// Set the number of trials.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Set the maximum number of accepted shrink steps.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Set the maximum number of predicate evaluations while shrinking.
    pub fn with_shrink_attempts(mut self, attempts: usize) -> Self {
        self.shrink_attempt_limit = attempts;
        self
    }

    /// Pin the run seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replay the counterexample at `path`.
    pub fn with_path(mut self, path: ShrinkPath) -> Self {
        self.path = Some(path);
        self
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| SprigError::InvalidConfig {
        message: format!("{name} must be a non-negative integer, got {raw:?}"),
    })
}
