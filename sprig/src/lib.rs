//! Sprig property-based testing library.
//!
//! This is the main entry point for Sprig: seeded generation, lazy shrink
//! trees, recursive structure and JSON arbitraries, and a property runner
//! that reports minimal, replayable counterexamples.
//!
//! ```
//! use sprig::*;
//!
//! let prop = for_all(integer_range(0, 1000).unwrap(), |&x| x < 10);
//! let result = prop.run(&Config::default().with_seed(7)).unwrap();
//! assert_eq!(result.counterexample().map(|c| c.value), Some(10));
//! ```

pub use sprig_core::*;
