//! Small numeric helpers shared by the lattice evaluators.

/// Floor a coordinate onto the integer lattice.
///
/// The cast saturates for values outside the `i64` range and maps NaN to 0,
/// so the result is always a valid lattice coordinate. Lattice arithmetic on
/// the result must wrap.
#[inline]
#[must_use]
pub const fn floor(value: f64) -> i64 {
    value.floor() as i64
}

/// Dot product of an integer gradient with a real offset.
#[inline]
#[must_use]
pub fn dot<const N: usize>(gradient: &[i8], offset: &[f64; N]) -> f64 {
    gradient
        .iter()
        .zip(offset)
        .map(|(&g, &d)| f64::from(g) * d)
        .sum()
}

/// Squared euclidean length of an offset vector.
#[inline]
#[must_use]
pub fn length_squared<const N: usize>(offset: &[f64; N]) -> f64 {
    offset.iter().map(|d| d * d).sum()
}
