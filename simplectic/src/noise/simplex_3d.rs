//! 3D vertex selection.
//!
//! The stretched unit cube splits into a tetrahedron at the origin corner
//! (`in_sum <= 1`), a tetrahedron at the far corner (`in_sum >= 2`) and an
//! octahedron between them. Each region contributes its own vertices plus two
//! more picked by which of its vertices the point is closest to.

use smallvec::smallvec;

use crate::noise::lattice::{
    Candidate, Cell, Closest, Selection, Simplex, Tie, corner, lowered, raised,
};

pub(crate) struct Simplex3D;

impl Simplex<3> for Simplex3D {
    const STRETCH: f64 = -1.0 / 6.0;
    const SQUISH: f64 = 1.0 / 3.0;
    const NORM: f64 = 28.25;
    const BANDS: &'static [&'static [u8]] = &[
        &[0b000, 0b001, 0b010, 0b100],
        &[0b001, 0b010, 0b011, 0b100, 0b101, 0b110],
        &[0b011, 0b101, 0b110, 0b111],
    ];

    fn select(cell: &Cell<3>) -> Selection<3> {
        if cell.in_sum <= 1.0 {
            near_tetrahedron(cell)
        } else if cell.in_sum >= 2.0 {
            far_tetrahedron(cell)
        } else {
            octahedron(cell)
        }
    }
}

/// Region around `(0, 0, 0)`. Ranks the unit corners by their coordinate.
fn near_tetrahedron(cell: &Cell<3>) -> Selection<3> {
    let [x, y, z] = cell.ins;
    let mut closest = Closest::new(
        Candidate::new(x, 0b001),
        Candidate::new(y, 0b010),
        Tie::ReplaceB,
    );
    closest.offer(Candidate::new(z, 0b100));

    let origin = 1.0 - cell.in_sum;
    let extras = if closest.beaten_by(origin) {
        let c = closest.closer().mask;
        smallvec![lowered(c, 0), lowered(c, 1)]
    } else {
        let c = closest.union();
        smallvec![corner(c), lowered(c, 0)]
    };
    Selection { band: 0, extras }
}

/// Region around `(1, 1, 1)`. Mirror of [`near_tetrahedron`]; ranks the
/// two-axis corners by the smallest missing coordinate.
fn far_tetrahedron(cell: &Cell<3>) -> Selection<3> {
    let [x, y, z] = cell.ins;
    let mut closest = Closest::new(
        Candidate::new(-x, 0b110),
        Candidate::new(-y, 0b101),
        Tie::ReplaceB,
    );
    closest.offer(Candidate::new(-z, 0b011));

    let far = -(3.0 - cell.in_sum);
    let extras = if closest.beaten_by(far) {
        let c = closest.closer().mask;
        smallvec![raised(c, 0), raised(c, 1)]
    } else {
        let c = closest.shared();
        smallvec![corner(c), raised(c, 0)]
    };
    Selection { band: 2, extras }
}

/// The octahedron between the two tetrahedra.
///
/// Each pair sum `p` decides between a one-axis corner (`p <= 1`) and the
/// two-axis corner opposite it; the two closest of those steer the extras.
fn octahedron(cell: &Cell<3>) -> Selection<3> {
    let [x, y, z] = cell.ins;
    let pair = |p: f64, near: u8, far: u8| {
        if p > 1.0 {
            Candidate::new(p - 1.0, far)
        } else {
            Candidate::new(1.0 - p, near)
        }
    };

    let mut closest = Closest::new(
        pair(x + y, 0b100, 0b011),
        pair(x + z, 0b010, 0b101),
        Tie::ReplaceA,
    );
    closest.offer(pair(y + z, 0b001, 0b110));

    // Far-side candidates are the two-axis corners.
    let a_far = closest.a.mask.count_ones() == 2;
    let b_far = closest.b.mask.count_ones() == 2;

    let extras = match (a_far, b_far) {
        (true, true) => smallvec![corner(0b111), raised(closest.shared(), 0)],
        (false, false) => smallvec![corner(0b000), lowered(closest.union(), 0)],
        (true, false) => smallvec![lowered(closest.a.mask, 0), raised(closest.b.mask, 0)],
        (false, true) => smallvec![lowered(closest.b.mask, 0), raised(closest.a.mask, 0)],
    };
    Selection { band: 1, extras }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: f64, y: f64, z: f64) -> Cell<3> {
        Cell {
            origin: [0, 0, 0],
            offset: [0.0, 0.0, 0.0],
            ins: [x, y, z],
            in_sum: x + y + z,
        }
    }

    #[test]
    fn near_tetrahedron_close_to_origin() {
        let selection = Simplex3D::select(&cell(0.1, 0.05, 0.02));
        assert_eq!(selection.band, 0);
        assert_eq!(selection.extras.as_slice(), &[[1, -1, 0], [1, 0, -1]]);
    }

    #[test]
    fn near_tetrahedron_close_to_face() {
        let selection = Simplex3D::select(&cell(0.45, 0.4, 0.05));
        assert_eq!(selection.band, 0);
        assert_eq!(selection.extras.as_slice(), &[[1, 1, 0], [1, 1, -1]]);
    }

    #[test]
    fn far_tetrahedron_close_to_edge_corner() {
        let selection = Simplex3D::select(&cell(0.95, 0.9, 0.3));
        assert_eq!(selection.band, 2);
        assert_eq!(selection.extras.as_slice(), &[[2, 1, 0], [1, 2, 0]]);
    }

    #[test]
    fn octahedron_with_both_near_corners() {
        let selection = Simplex3D::select(&cell(0.3, 0.4, 0.35));
        assert_eq!(selection.band, 1);
        assert_eq!(selection.extras.as_slice(), &[[0, 0, 0], [-1, 1, 1]]);
    }

    #[test]
    fn octahedron_with_both_far_corners() {
        let selection = Simplex3D::select(&cell(0.7, 0.65, 0.6));
        assert_eq!(selection.band, 1);
        assert_eq!(selection.extras.as_slice(), &[[1, 1, 1], [2, 0, 0]]);
    }

    #[test]
    fn octahedron_with_mixed_corners() {
        let selection = Simplex3D::select(&cell(0.9, 0.5, 0.1));
        assert_eq!(selection.band, 1);
        assert_eq!(selection.extras.as_slice(), &[[1, 1, -1], [2, 0, 0]]);
    }

    #[test]
    fn near_tetrahedron_tie_gives_way_on_second_axis() {
        // x and y tie; z displaces y, so the extras lean towards x and z.
        let selection = Simplex3D::select(&cell(0.25, 0.25, 0.375));
        assert_eq!(selection.band, 0);
        assert_eq!(selection.extras.as_slice(), &[[1, 0, 1], [1, -1, 1]]);
    }

    #[test]
    fn far_tetrahedron_tie_gives_way_on_second_axis() {
        let selection = Simplex3D::select(&cell(0.75, 0.75, 0.625));
        assert_eq!(selection.band, 2);
        assert_eq!(selection.extras.as_slice(), &[[0, 1, 0], [0, 2, 0]]);
    }

    #[test]
    fn octahedron_tie_gives_way_on_first_pair() {
        // x + y and x + z tie on the far side; y + z displaces x + y.
        let selection = Simplex3D::select(&cell(0.875, 0.25, 0.25));
        assert_eq!(selection.band, 1);
        assert_eq!(selection.extras.as_slice(), &[[1, -1, 1], [2, 0, 0]]);
    }

    #[test]
    fn boundaries_belong_to_tetrahedra() {
        assert_eq!(Simplex3D::select(&cell(0.5, 0.25, 0.25)).band, 0);
        assert_eq!(Simplex3D::select(&cell(0.5, 0.75, 0.75)).band, 2);
    }

    #[test]
    fn nan_selects_valid_vertices() {
        let selection = Simplex3D::select(&cell(f64::NAN, 0.5, 0.5));
        assert_eq!(selection.band, 1);
        for vertex in &selection.extras {
            assert!(vertex.iter().all(|c| (-1..=2).contains(c)));
        }
    }
}
