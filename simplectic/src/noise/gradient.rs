//! Gradient sets and the gradient extrapolation primitive.
//!
//! Each lattice vertex is hashed through the permutation table to pick one of
//! a fixed set of small integer gradients. The contribution of that vertex is
//! the dot product of its gradient with the offset from the vertex.

use crate::math::dot;
use crate::noise::permutation::Permutation;

/// Gradients for 2D: the eight rotations of `(5, 2)`, two components each.
pub(crate) const GRADIENTS_2D: [i8; 16] = [
    5, 2, 2, 5, //
    -5, 2, -2, 5, //
    5, -2, 2, -5, //
    -5, -2, -2, -5,
];

/// Number of gradients in [`GRADIENTS_3D`]. Not a power of two, so selection
/// goes through the permutation's precomputed offset table.
pub(crate) const GRADIENT_COUNT_3D: u8 = 24;

/// Gradients for 3D: all signed permutations of `(0, 3, 2)`.
///
/// This set is paired with a normalization constant of `28.25`; the constant
/// is fit to this set's magnitude and must not be mixed with other sets.
pub(crate) const GRADIENTS_3D: [i8; 72] = [
    0, 3, 2, 0, 2, 3, 3, 0, 2, 2, 0, 3, 3, 2, 0, 2, 3, 0, //
    0, -3, 2, 0, 2, -3, -3, 0, 2, 2, 0, -3, -3, 2, 0, 2, -3, 0, //
    0, 3, -2, 0, -2, 3, 3, 0, -2, -2, 0, 3, 3, -2, 0, -2, 3, 0, //
    0, -3, -2, 0, -2, -3, -3, 0, -2, -2, 0, -3, -3, -2, 0, -2, -3, 0,
];

/// Gradients for 4D: for every sign combination, each axis in turn takes
/// magnitude 3 while the others take 1. Sixty-four gradients, four components.
pub(crate) const GRADIENTS_4D: [i8; 256] = [
    3, 1, 1, 1, 1, 3, 1, 1, 1, 1, 3, 1, 1, 1, 1, 3, //
    -3, 1, 1, 1, -1, 3, 1, 1, -1, 1, 3, 1, -1, 1, 1, 3, //
    3, -1, 1, 1, 1, -3, 1, 1, 1, -1, 3, 1, 1, -1, 1, 3, //
    -3, -1, 1, 1, -1, -3, 1, 1, -1, -1, 3, 1, -1, -1, 1, 3, //
    3, 1, -1, 1, 1, 3, -1, 1, 1, 1, -3, 1, 1, 1, -1, 3, //
    -3, 1, -1, 1, -1, 3, -1, 1, -1, 1, -3, 1, -1, 1, -1, 3, //
    3, -1, -1, 1, 1, -3, -1, 1, 1, -1, -3, 1, 1, -1, -1, 3, //
    -3, -1, -1, 1, -1, -3, -1, 1, -1, -1, -3, 1, -1, -1, -1, 3, //
    3, 1, 1, -1, 1, 3, 1, -1, 1, 1, 3, -1, 1, 1, 1, -3, //
    -3, 1, 1, -1, -1, 3, 1, -1, -1, 1, 3, -1, -1, 1, 1, -3, //
    3, -1, 1, -1, 1, -3, 1, -1, 1, -1, 3, -1, 1, -1, 1, -3, //
    -3, -1, 1, -1, -1, -3, 1, -1, -1, -1, 3, -1, -1, -1, 1, -3, //
    3, 1, -1, -1, 1, 3, -1, -1, 1, 1, -3, -1, 1, 1, -1, -3, //
    -3, 1, -1, -1, -1, 3, -1, -1, -1, 1, -3, -1, -1, 1, -1, -3, //
    3, -1, -1, -1, 1, -3, -1, -1, 1, -1, -3, -1, 1, -1, -1, -3, //
    -3, -1, -1, -1, -1, -3, -1, -1, -1, -1, -3, -1, -1, -1, -1, -3,
];

/// A source of per-vertex gradients.
///
/// The lattice walk only ever asks for the contribution of a vertex; where the
/// gradient comes from is up to the implementor. [`Permutation`] is the real
/// source; tests substitute their own to observe which vertices are consulted.
pub(crate) trait Gradients<const N: usize> {
    /// Dot product of the gradient at `vertex` with `offset`.
    fn extrapolate(&self, vertex: [i64; N], offset: [f64; N]) -> f64;
}

impl Gradients<2> for Permutation {
    #[inline]
    fn extrapolate(&self, vertex: [i64; 2], offset: [f64; 2]) -> f64 {
        let index = usize::from(self.hash(&vertex) & 0x0E);
        dot(&GRADIENTS_2D[index..index + 2], &offset)
    }
}

impl Gradients<3> for Permutation {
    #[inline]
    fn extrapolate(&self, vertex: [i64; 3], offset: [f64; 3]) -> f64 {
        let index = usize::from(self.gradient_offset_3d(&vertex));
        dot(&GRADIENTS_3D[index..index + 3], &offset)
    }
}

impl Gradients<4> for Permutation {
    #[inline]
    fn extrapolate(&self, vertex: [i64; 4], offset: [f64; 4]) -> f64 {
        let index = usize::from(self.hash(&vertex) & 0xFC);
        dot(&GRADIENTS_4D[index..index + 4], &offset)
    }
}
