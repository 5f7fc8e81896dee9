//! `OpenSimplex` noise over the simplectic honeycomb.
//!
//! This module provides the noise generation primitives:
//!
//! - [`Permutation`] - Seeded or supplied 256-entry hash table
//! - [`NoiseField`] - Facade evaluating 2D, 3D and 4D noise from one table
//! - [`Sample`] - Evaluation from `glam` vectors and fixed-size arrays
//!
//! Internally every dimension runs the same lattice walk (`lattice`), with
//! the dimension-specific vertex selection living in `simplex_2d`,
//! `simplex_3d` and `simplex_4d`.

mod gradient;
mod lattice;
mod noise_field;
mod permutation;
mod simplex_2d;
mod simplex_3d;
mod simplex_4d;

pub use noise_field::{NoiseField, Sample};
pub use permutation::{Permutation, PermutationError, PermutationSource};
