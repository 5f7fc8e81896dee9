//! The lattice walk shared by every dimension.
//!
//! Evaluating `OpenSimplex` noise is the same five steps in 2D, 3D and 4D:
//!
//! 1. stretch the input onto the simplectic lattice and floor it to find the
//!    enclosing hypercube cell,
//! 2. squish the cell origin back to find the offset of the input from it,
//! 3. classify which band of the cell (slice between two corner layers) the
//!    input falls in,
//! 4. pick a handful of extra vertices outside that band which may still be
//!    within kernel range,
//! 5. sum the kernel-weighted gradient contribution of every vertex.
//!
//! Only step 4 differs between dimensions; it is supplied through
//! [`Simplex`]. Vertices are addressed as offsets from the cell origin, built
//! from corner bit masks (bit `i` set means axis `i` is at 1).

use std::array;

use smallvec::SmallVec;

use crate::math::{floor, length_squared};
use crate::noise::gradient::Gradients;

/// Squared distance at which a vertex's kernel reaches zero.
const KERNEL_RADIUS_SQUARED: f64 = 2.0;

/// Vertices picked outside the main band. At most three (in 4D).
pub(crate) type Extras<const N: usize> = SmallVec<[[i64; N]; 3]>;

/// Result of classifying a point within its cell.
pub(crate) struct Selection<const N: usize> {
    /// Index into [`Simplex::BANDS`].
    pub band: usize,
    /// Additional vertices that may be within kernel range.
    pub extras: Extras<N>,
}

/// The dimension-specific part of the algorithm.
pub(crate) trait Simplex<const N: usize> {
    /// `(1 / sqrt(N + 1) - 1) / N`.
    const STRETCH: f64;
    /// `(sqrt(N + 1) - 1) / N`.
    const SQUISH: f64;
    /// Divisor that keeps the output roughly within `[-1, 1]`.
    const NORM: f64;
    /// Main vertices of each band, as corner masks in ascending order.
    ///
    /// Band `j` holds every corner with `j` or `j + 1` axes set.
    const BANDS: &'static [&'static [u8]];

    /// Find the band the point lies in and the extra vertices it needs.
    fn select(cell: &Cell<N>) -> Selection<N>;
}

/// A query point located within its stretched hypercube cell.
pub(crate) struct Cell<const N: usize> {
    /// Lattice coordinates of the cell origin.
    pub origin: [i64; N],
    /// Offset of the point from the cell origin, in input space.
    pub offset: [f64; N],
    /// Fractional stretched coordinates of the point within the cell.
    pub ins: [f64; N],
    /// Sum of `ins`; selects the band.
    pub in_sum: f64,
}

impl<const N: usize> Cell<N> {
    /// Stretch, floor and squish `point` onto the lattice.
    pub fn locate(point: [f64; N], stretch: f64, squish: f64) -> Self {
        let stretch_offset = point.iter().sum::<f64>() * stretch;
        let stretched = point.map(|c| c + stretch_offset);
        let origin = stretched.map(floor);

        let squish_offset = origin.iter().map(|&c| c as f64).sum::<f64>() * squish;
        let offset = array::from_fn(|i| point[i] - (origin[i] as f64 + squish_offset));
        let ins: [f64; N] = array::from_fn(|i| stretched[i] - origin[i] as f64);
        let in_sum = ins.iter().sum();

        Self {
            origin,
            offset,
            ins,
            in_sum,
        }
    }

    /// Kernel-weighted contribution of the vertex at `vertex` (relative to the
    /// cell origin).
    ///
    /// Vertices at squared distance 2 or more contribute exactly zero.
    #[inline]
    pub fn contribution<G: Gradients<N>>(
        &self,
        gradients: &G,
        vertex: &[i64; N],
        squish: f64,
    ) -> f64 {
        let shift = vertex.iter().sum::<i64>() as f64 * squish;
        let delta: [f64; N] = array::from_fn(|i| self.offset[i] - vertex[i] as f64 - shift);

        let attn = KERNEL_RADIUS_SQUARED - length_squared(&delta);
        if attn <= 0.0 {
            return 0.0;
        }
        let attn = attn * attn;
        let lattice = array::from_fn(|i| self.origin[i].wrapping_add(vertex[i]));
        attn * attn * gradients.extrapolate(lattice, delta)
    }
}

/// Evaluate noise at `point` for dimension `S`, reading gradients from `gradients`.
#[inline]
pub(crate) fn evaluate<const N: usize, S, G>(gradients: &G, point: [f64; N]) -> f64
where
    S: Simplex<N>,
    G: Gradients<N>,
{
    // An infinite offset would fall outside every kernel and read as zero.
    if point.iter().any(|c| !c.is_finite()) {
        return f64::NAN;
    }

    let cell = Cell::locate(point, S::STRETCH, S::SQUISH);
    let Selection { band, extras } = S::select(&cell);

    let mut value = 0.0;
    for &mask in S::BANDS[band] {
        value += cell.contribution(gradients, &corner(mask), S::SQUISH);
    }
    for vertex in &extras {
        value += cell.contribution(gradients, vertex, S::SQUISH);
    }
    value / S::NORM
}

/// The cell corner described by `mask`.
#[inline]
pub(crate) fn corner<const N: usize>(mask: u8) -> [i64; N] {
    array::from_fn(|i| i64::from((mask >> i) & 1))
}

/// The corner `mask` with its `k`-th unset axis pushed to -1.
#[inline]
pub(crate) fn lowered<const N: usize>(mask: u8, k: usize) -> [i64; N] {
    let mut vertex = corner(mask);
    vertex[nth_axis::<N>(mask, false, k)] = -1;
    vertex
}

/// The corner `mask` with its `k`-th set axis pushed to 2.
#[inline]
pub(crate) fn raised<const N: usize>(mask: u8, k: usize) -> [i64; N] {
    let mut vertex = corner(mask);
    vertex[nth_axis::<N>(mask, true, k)] = 2;
    vertex
}

/// Index of the `k`-th axis whose bit in `mask` equals `set`.
///
/// Falls back to the last axis, which is what the exhaustive branch chains
/// this replaces did when no earlier axis matched.
#[inline]
fn nth_axis<const N: usize>(mask: u8, set: bool, k: usize) -> usize {
    (0..N)
        .filter(|&i| ((mask >> i) & 1 == 1) == set)
        .nth(k)
        .unwrap_or(N - 1)
}

/// A lattice corner competing to be one of the two closest to the point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Larger is closer. Bands that rank by smallest score negate it.
    pub closeness: f64,
    /// Corner bit mask.
    pub mask: u8,
}

impl Candidate {
    #[inline]
    pub const fn new(closeness: f64, mask: u8) -> Self {
        Self { closeness, mask }
    }
}

/// Which tracked candidate gives way when `a` and `b` are equally close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tie {
    /// `b` is treated as the further one (`a >= b`).
    ReplaceB,
    /// `a` is treated as the further one (`a <= b`).
    ReplaceA,
}

/// Tracks the two closest candidates seen so far.
///
/// A new candidate only ever replaces the further of the two, and only when
/// strictly closer than it. Which one counts as further on a tie is fixed per
/// band by [`Tie`]; the choice changes which extra vertices are picked, so it
/// must stay exactly as the reference algorithm has it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Closest {
    pub a: Candidate,
    pub b: Candidate,
    tie: Tie,
}

impl Closest {
    #[inline]
    pub const fn new(a: Candidate, b: Candidate, tie: Tie) -> Self {
        Self { a, b, tie }
    }

    /// Consider `candidate` for a place among the two closest.
    #[inline]
    pub fn offer(&mut self, candidate: Candidate) {
        let b_is_further = match self.tie {
            Tie::ReplaceB => self.a.closeness >= self.b.closeness,
            Tie::ReplaceA => self.a.closeness > self.b.closeness,
        };
        if b_is_further {
            if candidate.closeness > self.b.closeness {
                self.b = candidate;
            }
        } else if candidate.closeness > self.a.closeness {
            self.a = candidate;
        }
    }

    /// The closer of the two; `a` wins ties.
    #[inline]
    pub const fn closer(&self) -> Candidate {
        if self.b.closeness > self.a.closeness {
            self.b
        } else {
            self.a
        }
    }

    /// Whether a corner with this closeness beats at least one of the two.
    #[inline]
    pub fn beaten_by(&self, closeness: f64) -> bool {
        closeness > self.a.closeness || closeness > self.b.closeness
    }

    /// Union of both masks.
    #[inline]
    pub const fn union(&self) -> u8 {
        self.a.mask | self.b.mask
    }

    /// Intersection of both masks.
    #[inline]
    pub const fn shared(&self) -> u8 {
        self.a.mask & self.b.mask
    }
}
