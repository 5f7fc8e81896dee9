//! 4D vertex selection.
//!
//! The stretched unit tesseract splits into four bands by `in_sum`: a
//! pentachoron at each end and two dispentachora between them. Each band
//! contributes its own vertices plus three more.

use smallvec::smallvec;

use crate::noise::lattice::{
    Candidate, Cell, Closest, Selection, Simplex, Tie, corner, lowered, raised,
};

pub(crate) struct Simplex4D;

impl Simplex<4> for Simplex4D {
    const STRETCH: f64 = -0.138_196_601_125_011;
    const SQUISH: f64 = 0.309_016_994_374_947;
    const NORM: f64 = 30.0;
    const BANDS: &'static [&'static [u8]] = &[
        &[0b0000, 0b0001, 0b0010, 0b0100, 0b1000],
        &[
            0b0001, 0b0010, 0b0011, 0b0100, 0b0101, 0b0110, 0b1000, 0b1001, 0b1010, 0b1100,
        ],
        &[
            0b0011, 0b0101, 0b0110, 0b0111, 0b1001, 0b1010, 0b1011, 0b1100, 0b1101, 0b1110,
        ],
        &[0b0111, 0b1011, 0b1101, 0b1110, 0b1111],
    ];

    fn select(cell: &Cell<4>) -> Selection<4> {
        if cell.in_sum <= 1.0 {
            near_pentachoron(cell)
        } else if cell.in_sum >= 3.0 {
            far_pentachoron(cell)
        } else if cell.in_sum <= 2.0 {
            near_dispentachoron(cell)
        } else {
            far_dispentachoron(cell)
        }
    }
}

/// Region around `(0, 0, 0, 0)`.
fn near_pentachoron(cell: &Cell<4>) -> Selection<4> {
    let [x, y, z, w] = cell.ins;
    let mut closest = Closest::new(
        Candidate::new(x, 0b0001),
        Candidate::new(y, 0b0010),
        Tie::ReplaceB,
    );
    closest.offer(Candidate::new(z, 0b0100));
    closest.offer(Candidate::new(w, 0b1000));

    let extras = if closest.beaten_by(1.0 - cell.in_sum) {
        let c = closest.closer().mask;
        smallvec![lowered(c, 0), lowered(c, 1), lowered(c, 2)]
    } else {
        let c = closest.union();
        smallvec![corner(c), lowered(c, 0), lowered(c, 1)]
    };
    Selection { band: 0, extras }
}

/// Region around `(1, 1, 1, 1)`.
fn far_pentachoron(cell: &Cell<4>) -> Selection<4> {
    let [x, y, z, w] = cell.ins;
    let mut closest = Closest::new(
        Candidate::new(-x, 0b1110),
        Candidate::new(-y, 0b1101),
        Tie::ReplaceB,
    );
    closest.offer(Candidate::new(-z, 0b1011));
    closest.offer(Candidate::new(-w, 0b0111));

    let extras = if closest.beaten_by(-(4.0 - cell.in_sum)) {
        let c = closest.closer().mask;
        smallvec![raised(c, 0), raised(c, 1), raised(c, 2)]
    } else {
        let c = closest.shared();
        smallvec![corner(c), raised(c, 0), raised(c, 1)]
    };
    Selection { band: 3, extras }
}

/// Band between the one-axis and two-axis corner layers.
///
/// Candidates are the larger half of each complementary pair sum, then each
/// one-axis corner scored as `2 - in_sum + ins[i]`.
fn near_dispentachoron(cell: &Cell<4>) -> Selection<4> {
    let [x, y, z, w] = cell.ins;
    let larger = |p: f64, q: f64, p_mask: u8, q_mask: u8| {
        if p > q {
            Candidate::new(p, p_mask)
        } else {
            Candidate::new(q, q_mask)
        }
    };

    let mut closest = Closest::new(
        larger(x + y, z + w, 0b0011, 0b1100),
        larger(x + z, y + w, 0b0101, 0b1010),
        Tie::ReplaceB,
    );
    closest.offer(larger(x + w, y + z, 0b1001, 0b0110));

    let base = 2.0 - cell.in_sum;
    for (axis, &ins) in cell.ins.iter().enumerate() {
        closest.offer(Candidate::new(base + ins, 1 << axis));
    }

    let (a, b) = (closest.a.mask, closest.b.mask);
    let extras = match (a.count_ones() == 2, b.count_ones() == 2) {
        (true, true) => smallvec![corner(a | b), lowered(a | b, 0), raised(a & b, 0)],
        (false, false) => smallvec![lowered(a | b, 0), lowered(a | b, 1), corner(0b0000)],
        (true, false) => smallvec![lowered(a, 0), lowered(a, 1), raised(b, 0)],
        (false, true) => smallvec![lowered(b, 0), lowered(b, 1), raised(a, 0)],
    };
    Selection { band: 1, extras }
}

/// Band between the two-axis and three-axis corner layers. Mirror of
/// [`near_dispentachoron`], ranking by the smaller half of each pair and
/// each three-axis corner by `3 - in_sum + ins[i]`.
fn far_dispentachoron(cell: &Cell<4>) -> Selection<4> {
    let [x, y, z, w] = cell.ins;
    let smaller = |p: f64, q: f64, p_mask: u8, q_mask: u8| {
        if p < q {
            Candidate::new(-p, p_mask)
        } else {
            Candidate::new(-q, q_mask)
        }
    };

    let mut closest = Closest::new(
        smaller(x + y, z + w, 0b1100, 0b0011),
        smaller(x + z, y + w, 0b1010, 0b0101),
        Tie::ReplaceB,
    );
    closest.offer(smaller(x + w, y + z, 0b0110, 0b1001));

    let base = 3.0 - cell.in_sum;
    for (axis, &ins) in cell.ins.iter().enumerate() {
        closest.offer(Candidate::new(-(base + ins), 0b1111 ^ (1 << axis)));
    }

    let (a, b) = (closest.a.mask, closest.b.mask);
    let extras = match (a.count_ones() == 2, b.count_ones() == 2) {
        (true, true) => smallvec![corner(a & b), raised(a & b, 0), lowered(a | b, 0)],
        (false, false) => smallvec![raised(a & b, 0), raised(a & b, 1), corner(0b1111)],
        (true, false) => smallvec![raised(a, 0), raised(a, 1), lowered(b, 0)],
        (false, true) => smallvec![raised(b, 0), raised(b, 1), lowered(a, 0)],
    };
    Selection { band: 2, extras }
}
