//! Core functionality for Sprig property-based testing.
//!
//! This crate provides the building blocks: a seeded random generator, lazy
//! shrink trees, composable arbitraries (including recursive structures and
//! JSON text) and the property runner that minimizes counterexamples.

pub mod arbitrary;
pub mod data;
pub mod error;
pub mod property;
pub mod random;
pub mod shrinkable;
pub mod value;

// Re-export the main types
pub use arbitrary::*;
pub use data::*;
pub use error::*;
pub use property::*;
pub use random::*;
pub use shrinkable::*;
pub use value::*;
