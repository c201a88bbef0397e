//! Error and outcome types for Sprig property runs.

use crate::data::ShrinkPath;
use std::fmt;
use thiserror::Error;

/// Main error type for Sprig.
#[derive(Error, Debug)]
pub enum SprigError {
    /// Invalid combinator arguments, environment values or replay paths.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Property test failed with a counterexample.
    #[error("Property failed after {tests_run} tests: {counterexample} (seed {seed}, path \"{path}\")")]
    PropertyFailed {
        counterexample: String,
        tests_run: usize,
        seed: u64,
        path: ShrinkPath,
    },
}

/// Result type for Sprig operations.
pub type Result<T> = std::result::Result<T, SprigError>;

impl SprigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SprigError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original failure).
    pub step: usize,
}

/// The minimal failing value found by a run, with everything needed to replay it.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    /// The locally minimal failing value.
    pub value: T,
    /// The value drawn in the failing trial, before shrinking.
    pub original: T,
    /// Seed of the run.
    pub seed: u64,
    /// Trial index and the shrink steps that lead to `value`.
    pub path: ShrinkPath,
    /// Failure message for `value`.
    pub error: String,
    /// Number of trials executed, including the failing one.
    pub tests_run: usize,
    /// Progression from the original failure to `value`.
    pub shrink_steps: Vec<ShrinkStep>,
}

impl<T> Counterexample<T> {
    /// Number of accepted shrink steps.
    pub fn shrinks_performed(&self) -> usize {
        self.path.children.len()
    }
}

/// Outcome of a property run.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult<T> {
    /// Every trial passed.
    Pass {
        tests_run: usize,
        seed: u64,
        property_name: Option<String>,
    },

    /// A trial failed; the counterexample has been shrunk.
    Fail {
        counterexample: Box<Counterexample<T>>,
        property_name: Option<String>,
    },
}

impl<T> TestResult<T> {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    /// The counterexample of a failed run.
    pub fn counterexample(&self) -> Option<&Counterexample<T>> {
        match self {
            TestResult::Fail { counterexample, .. } => Some(counterexample),
            TestResult::Pass { .. } => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for TestResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
                ..
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::Fail {
                counterexample,
                property_name,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    prop_name,
                    counterexample.tests_run,
                    counterexample.shrinks_performed()
                )?;

                if counterexample.shrink_steps.len() > 1 {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in &counterexample.shrink_steps {
                        if step.step == 0 {
                            writeln!(f, "      │ Original: {}", step.counterexample)?;
                        } else {
                            writeln!(f, "      │ Step {}: {}", step.step, step.counterexample)?;
                        }
                    }
                    writeln!(f)?;
                }

                writeln!(f, "    === {} ===", counterexample.error)?;
                writeln!(f, "    Minimal counterexample: {:?}", counterexample.value)?;
                write!(
                    f,
                    "    Replay with seed {} and path \"{}\"",
                    counterexample.seed, counterexample.path
                )
            }
        }
    }
}
