//! Property definitions and the run loop: trials, greedy shrinking and replay.

use crate::arbitrary::Arbitrary;
use crate::data::{Config, ShrinkPath};
use crate::error::{Counterexample, Result, ShrinkStep, SprigError, TestResult};
use crate::random::{random_seed, SplitMix};
use crate::shrinkable::Shrinkable;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Verdict of a single evaluation: `Err` carries the failure message.
type Outcome = std::result::Result<(), String>;

type CheckFn<T> = Box<dyn Fn(&T) -> Outcome>;

/// A predicate over values drawn from an arbitrary.
pub struct Property<A: Arbitrary> {
    arbitrary: A,
    check: CheckFn<A::Value>,
    name: Option<String>,
}

impl<A> Property<A>
where
    A: Arbitrary,
    A::Value: fmt::Debug,
{
    /// Create a property whose check reports failures as errors.
    pub fn new<F, E>(arbitrary: A, check: F) -> Self
    where
        F: Fn(&A::Value) -> std::result::Result<(), E> + 'static,
        E: fmt::Display,
    {
        Property {
            arbitrary,
            check: Box::new(move |value: &A::Value| check(value).map_err(|e| e.to_string())),
            name: None,
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(arbitrary: A, condition: F) -> Self
    where
        F: Fn(&A::Value) -> bool + 'static,
    {
        Property::new(arbitrary, move |value| {
            if condition(value) {
                Ok(())
            } else {
                Err("Boolean Condition")
            }
        })
    }

    /// Label the property in reports.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run this property with the given configuration.
    ///
    /// Only an invalid replay path produces an error; property failures are
    /// reported through [`TestResult::Fail`].
    pub fn run(&self, config: &Config) -> Result<TestResult<A::Value>> {
        let seed = config.seed.unwrap_or_else(random_seed);
        let mut rng = SplitMix::new(seed);

        if let Some(path) = &config.path {
            return self.replay(&mut rng, seed, path, config);
        }

        for trial in 0..config.test_limit {
            let tree = self.arbitrary.generate(&mut rng);
            if let Err(error) = self.evaluate(&tree.value) {
                debug!("Trial {} failed with seed {}: {:?}", trial, seed, tree.value);
                let start = ShrinkPath::new(trial, Vec::new());
                let original = tree.value.clone();
                let steps = vec![shrink_step(0, &tree.value)];
                return Ok(self.shrink(
                    tree,
                    original,
                    steps,
                    error,
                    start,
                    seed,
                    trial + 1,
                    config,
                ));
            }
        }

        info!(
            "Property {} passed {} tests (seed {})",
            self.name.as_deref().unwrap_or("property"),
            config.test_limit,
            seed
        );
        Ok(TestResult::Pass {
            tests_run: config.test_limit,
            seed,
            property_name: self.name.clone(),
        })
    }

    /// Regenerate the trials up to the addressed one, follow the recorded
    /// child indices and evaluate only that node.
    ///
    /// The report keeps the trial's draw as the original and lists every
    /// node on the recorded path as a shrink step.
    fn replay(
        &self,
        rng: &mut SplitMix,
        seed: u64,
        path: &ShrinkPath,
        config: &Config,
    ) -> Result<TestResult<A::Value>> {
        let mut tree = self.arbitrary.generate(rng);
        for _ in 0..path.trial {
            tree = self.arbitrary.generate(rng);
        }
        let original = tree.value.clone();
        let mut steps = vec![shrink_step(0, &tree.value)];
        let mut node = tree;
        for &index in &path.children {
            node = node.child_at(index).ok_or_else(|| SprigError::InvalidConfig {
                message: format!("replay path \"{path}\" does not address a shrink of seed {seed}"),
            })?;
            steps.push(shrink_step(steps.len(), &node.value));
        }

        debug!("Replaying seed {} at path \"{}\": {:?}", seed, path, node.value);
        match self.evaluate(&node.value) {
            Ok(()) => Ok(TestResult::Pass {
                tests_run: 1,
                seed,
                property_name: self.name.clone(),
            }),
            Err(error) => Ok(self.shrink(
                node,
                original,
                steps,
                error,
                path.clone(),
                seed,
                path.trial + 1,
                config,
            )),
        }
    }

    /// Greedy descent: repeatedly move to the first failing child until none
    /// fails or a cap is hit.
    #[allow(clippy::too_many_arguments)]
    fn shrink(
        &self,
        tree: Shrinkable<A::Value>,
        original: A::Value,
        mut steps: Vec<ShrinkStep>,
        error: String,
        mut path: ShrinkPath,
        seed: u64,
        tests_run: usize,
        config: &Config,
    ) -> TestResult<A::Value> {
        let mut current = tree;
        let mut error = error;
        let mut attempts = 0;

        'search: while steps.len() <= config.shrink_limit {
            let mut accepted = None;
            for (index, child) in current.shrinks().enumerate() {
                if attempts >= config.shrink_attempt_limit {
                    warn!(
                        "Shrinking stopped after {} attempts; counterexample may not be minimal",
                        attempts
                    );
                    break 'search;
                }
                attempts += 1;
                if let Err(child_error) = self.evaluate(&child.value) {
                    accepted = Some((index, child, child_error));
                    break;
                }
            }

            match accepted {
                Some((index, child, child_error)) => {
                    path.children.push(index);
                    debug!("Shrink step {}: {:?}", steps.len(), child.value);
                    steps.push(shrink_step(steps.len(), &child.value));
                    current = child;
                    error = child_error;
                }
                None => break,
            }
        }

        if steps.len() > config.shrink_limit {
            warn!(
                "Shrinking stopped after {} steps; counterexample may not be minimal",
                config.shrink_limit
            );
        }

        TestResult::Fail {
            counterexample: Box::new(Counterexample {
                value: current.value,
                original,
                seed,
                path,
                error,
                tests_run,
                shrink_steps: steps,
            }),
            property_name: self.name.clone(),
        }
    }

    /// Evaluate the check once. A panic counts as a failure.
    fn evaluate(&self, value: &A::Value) -> Outcome {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.check)(value))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }
}

fn shrink_step<T: fmt::Debug>(step: usize, value: &T) -> ShrinkStep {
    ShrinkStep {
        counterexample: format!("{value:?}"),
        step,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

/// Create a property for an arbitrary and a fallible check.
pub fn property<A, F, E>(arbitrary: A, check: F) -> Property<A>
where
    A: Arbitrary,
    A::Value: fmt::Debug,
    F: Fn(&A::Value) -> std::result::Result<(), E> + 'static,
    E: fmt::Display,
{
    Property::new(arbitrary, check)
}

/// Create a property that checks a boolean condition.
pub fn for_all<A, F>(arbitrary: A, condition: F) -> Property<A>
where
    A: Arbitrary,
    A::Value: fmt::Debug,
    F: Fn(&A::Value) -> bool + 'static,
{
    Property::for_all(arbitrary, condition)
}

/// Run a property and turn a failure into [`SprigError::PropertyFailed`].
pub fn check<A>(property: &Property<A>, config: &Config) -> Result<()>
where
    A: Arbitrary,
    A::Value: fmt::Debug,
{
    match property.run(config)? {
        TestResult::Pass { .. } => Ok(()),
        TestResult::Fail { counterexample, .. } => Err(SprigError::PropertyFailed {
            counterexample: format!("{:?}", counterexample.value),
            tests_run: counterexample.tests_run,
            seed: counterexample.seed,
            path: counterexample.path,
        }),
    }
}

/// Run a property, panicking with the full report if it fails.
pub fn assert_property<A>(property: &Property<A>, config: &Config)
where
    A: Arbitrary,
    A::Value: fmt::Debug,
{
    match property.run(config) {
        Ok(result @ TestResult::Fail { .. }) => panic!("{result}"),
        Ok(TestResult::Pass { .. }) => {}
        Err(error) => panic!("{error}"),
    }
}
