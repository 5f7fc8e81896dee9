//! Deterministic `OpenSimplex` coherent noise in 2, 3 and 4 dimensions.
//!
//! A [`NoiseField`] owns one 256-entry permutation table and evaluates noise at
//! arbitrary real coordinates. Every evaluation is a pure function of the table
//! and the query point, so a field can be shared freely across threads.
//!
//! ```
//! use simplectic::NoiseField;
//!
//! let field = NoiseField::new(1234);
//! let height = field.eval2(0.37, 1.21);
//! assert!(height.abs() <= 1.0);
//! ```
//!
//! The lattice helpers and the seeding generator stay internal:
//!
//! ```compile_fail
//! use simplectic::random::Lcg64;
//! ```

pub(crate) mod math;
pub mod noise;
pub(crate) mod random;

pub use noise::{NoiseField, Permutation, PermutationError, PermutationSource, Sample};
