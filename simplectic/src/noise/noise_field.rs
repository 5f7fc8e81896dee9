//! The public noise facade.

use glam::{DVec2, DVec3, DVec4};

use crate::noise::lattice::evaluate;
use crate::noise::permutation::{Permutation, PermutationError, PermutationSource, TABLE_SIZE};
use crate::noise::simplex_2d::Simplex2D;
use crate::noise::simplex_3d::Simplex3D;
use crate::noise::simplex_4d::Simplex4D;

/// A seeded `OpenSimplex` noise field over 2D, 3D and 4D.
///
/// All three dimensions share one permutation table. The field is immutable
/// after construction, so a shared reference can be evaluated from any number
/// of threads.
///
/// Outputs are continuous and lie roughly within `[-1, 1]`. Non-finite input
/// produces a non-finite result rather than an error.
///
/// # Example
/// ```
/// use simplectic::NoiseField;
///
/// let field = NoiseField::new(1234);
/// let height = field.eval2(12.5, -3.25);
/// assert!(height.abs() <= 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoiseField {
    permutation: Permutation,
}

impl NoiseField {
    /// Create a field whose table is shuffled from `seed`.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self::from_permutation(Permutation::from_seed(seed))
    }

    /// Create a field from an already-built permutation.
    #[must_use]
    pub const fn from_permutation(permutation: Permutation) -> Self {
        Self { permutation }
    }

    /// Create a field from a caller-supplied table, used verbatim.
    ///
    /// See [`Permutation::from_table`]; a non-bijective table is accepted
    /// with a logged warning.
    #[must_use]
    pub fn from_table(table: &[u8; TABLE_SIZE]) -> Self {
        Self::from_permutation(Permutation::from_table(table))
    }

    /// Create a field from a caller-supplied table, rejecting tables of the
    /// wrong length or with repeated values.
    pub fn try_from_table(table: &[u8]) -> Result<Self, PermutationError> {
        Permutation::try_from_table(table).map(Self::from_permutation)
    }

    /// The permutation table backing this field.
    #[must_use]
    pub const fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// 2D noise at `(x, y)`.
    #[must_use]
    #[inline]
    pub fn eval2(&self, x: f64, y: f64) -> f64 {
        evaluate::<2, Simplex2D, _>(&self.permutation, [x, y])
    }

    /// 3D noise at `(x, y, z)`.
    #[must_use]
    #[inline]
    pub fn eval3(&self, x: f64, y: f64, z: f64) -> f64 {
        evaluate::<3, Simplex3D, _>(&self.permutation, [x, y, z])
    }

    /// 4D noise at `(x, y, z, w)`.
    #[must_use]
    #[inline]
    pub fn eval4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        evaluate::<4, Simplex4D, _>(&self.permutation, [x, y, z, w])
    }

    /// Noise at `point`, dispatching on its dimension.
    ///
    /// ```
    /// use glam::DVec3;
    /// use simplectic::NoiseField;
    ///
    /// let field = NoiseField::default();
    /// assert_eq!(field.sample(DVec3::new(0.5, 1.5, 2.5)), field.eval3(0.5, 1.5, 2.5));
    /// assert_eq!(field.sample([0.5, 1.5]), field.eval2(0.5, 1.5));
    /// ```
    #[must_use]
    #[inline]
    pub fn sample<P: Sample>(&self, point: P) -> f64 {
        point.sample_in(self)
    }
}

impl TryFrom<PermutationSource> for NoiseField {
    type Error = PermutationError;

    fn try_from(source: PermutationSource) -> Result<Self, Self::Error> {
        Permutation::try_from(source).map(Self::from_permutation)
    }
}

/// A point that a [`NoiseField`] can be evaluated at.
pub trait Sample {
    /// Evaluate `field` at this point.
    fn sample_in(self, field: &NoiseField) -> f64;
}

impl Sample for DVec2 {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        field.eval2(self.x, self.y)
    }
}

impl Sample for DVec3 {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        field.eval3(self.x, self.y, self.z)
    }
}

impl Sample for DVec4 {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        field.eval4(self.x, self.y, self.z, self.w)
    }
}

impl Sample for [f64; 2] {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        let [x, y] = self;
        field.eval2(x, y)
    }
}

impl Sample for [f64; 3] {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        let [x, y, z] = self;
        field.eval3(x, y, z)
    }
}

impl Sample for [f64; 4] {
    #[inline]
    fn sample_in(self, field: &NoiseField) -> f64 {
        let [x, y, z, w] = self;
        field.eval4(x, y, z, w)
    }
}

#[cfg(test)]
mod tests {
    use std::array;
    use std::cell::Cell;

    use super::*;
    use crate::noise::gradient::Gradients;
    use crate::noise::lattice::{Cell as LatticeCell, Simplex, evaluate};

    const fn assert_send_sync<T: Send + Sync>() {}
    const _: () = assert_send_sync::<NoiseField>();

    /// Wraps the real gradients, recording the largest squared offset asked
    /// about and optionally overriding one lattice vertex.
    struct Probe<'a> {
        inner: &'a Permutation,
        largest: Cell<f64>,
        poisoned: Option<Vec<i64>>,
    }

    impl<'a> Probe<'a> {
        fn new(inner: &'a Permutation, poisoned: Option<Vec<i64>>) -> Self {
            Self {
                inner,
                largest: Cell::new(0.0),
                poisoned,
            }
        }
    }

    impl<const N: usize> Gradients<N> for Probe<'_>
    where
        Permutation: Gradients<N>,
    {
        fn extrapolate(&self, vertex: [i64; N], offset: [f64; N]) -> f64 {
            let distance: f64 = offset.iter().map(|d| d * d).sum();
            self.largest.set(self.largest.get().max(distance));
            if self.poisoned.as_deref() == Some(vertex.as_slice()) {
                return 1.0e9;
            }
            Gradients::<N>::extrapolate(self.inner, vertex, offset)
        }
    }

    fn points<const N: usize>() -> impl Iterator<Item = [f64; N]> {
        (0..2000).map(|i| {
            let t = f64::from(i);
            let (base, step) = ((t * 0.173).sin() * 9.0, 0.618 * (t % 7.0));
            array::from_fn(|axis| base + axis as f64 * step)
        })
    }

    fn check_locality<const N: usize, S: Simplex<N>>()
    where
        Permutation: Gradients<N>,
    {
        let perm = Permutation::from_seed(11);
        for point in points::<N>() {
            let probe = Probe::new(&perm, None);
            let plain = evaluate::<N, S, _>(&perm, point);
            let probed = evaluate::<N, S, _>(&probe, point);
            assert!(probe.largest.get() < 2.0, "out of range at {point:?}");
            assert_eq!(plain.to_bits(), probed.to_bits());

            // A vertex three steps beyond the cell origin on every axis is
            // always out of range, so poisoning it changes nothing.
            let origin = LatticeCell::locate(point, S::STRETCH, S::SQUISH).origin;
            let far = origin.iter().map(|c| c + 3).collect();
            let poisoned = Probe::new(&perm, Some(far));
            let unaffected = evaluate::<N, S, _>(&poisoned, point);
            assert_eq!(plain.to_bits(), unaffected.to_bits());
        }
    }

    #[test]
    fn only_vertices_within_range_are_consulted() {
        check_locality::<2, Simplex2D>();
        check_locality::<3, Simplex3D>();
        check_locality::<4, Simplex4D>();
    }

    #[test]
    fn poisoning_a_used_vertex_does_change_the_result() {
        // Guards the locality test against a probe that is never called.
        let perm = Permutation::default();
        let point = [0.2, 0.3];
        let plain = evaluate::<2, Simplex2D, _>(&perm, point);
        let poisoned = Probe::new(&perm, Some(vec![0, 0]));
        let affected = evaluate::<2, Simplex2D, _>(&poisoned, point);
        assert!((plain - affected).abs() > 1.0);
    }

    #[test]
    fn sample_dispatches_by_dimension() {
        let field = NoiseField::new(77);
        let [x, y, z, w] = [1.5, -2.5, 0.25, 8.0];
        let vector = DVec4::new(x, y, z, w);

        let pairs = [
            (field.sample(DVec2::new(x, y)), field.eval2(x, y)),
            (field.sample([x, y, z]), field.eval3(x, y, z)),
            (field.sample(vector), field.eval4(x, y, z, w)),
            (field.sample([x, y, z, w]), field.eval4(x, y, z, w)),
        ];
        for (sampled, direct) in pairs {
            assert_eq!(sampled.to_bits(), direct.to_bits());
        }
    }

    #[test]
    fn origin_is_zero() {
        let fields = [
            NoiseField::default(),
            NoiseField::new(0),
            NoiseField::new(-7919),
        ];
        for field in fields {
            assert!(field.eval2(0.0, 0.0).abs() < 1e-15);
            assert!(field.eval3(0.0, 0.0, 0.0).abs() < 1e-15);
            assert!(field.eval4(0.0, 0.0, 0.0, 0.0).abs() < 1e-15);
        }
    }

    #[test]
    fn try_from_source() {
        let field = NoiseField::try_from(PermutationSource::Seed(9)).unwrap();
        assert_eq!(field, NoiseField::new(9));
        let short = PermutationSource::Table(vec![1, 2, 3]);
        assert!(NoiseField::try_from(short).is_err());
    }
}
