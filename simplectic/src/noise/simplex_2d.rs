//! 2D vertex selection.
//!
//! The stretched unit square splits along its anti-diagonal into two
//! triangles. Whichever triangle holds the point supplies three vertices, and
//! one more vertex across the nearest edge may still be within range.

use smallvec::smallvec;

use crate::noise::lattice::{Cell, Selection, Simplex, lowered, raised};

pub(crate) struct Simplex2D;

impl Simplex<2> for Simplex2D {
    const STRETCH: f64 = -0.211_324_865_405_187;
    const SQUISH: f64 = 0.366_025_403_784_439;
    const NORM: f64 = 47.0;
    const BANDS: &'static [&'static [u8]] = &[&[0b00, 0b01, 0b10], &[0b01, 0b10, 0b11]];

    fn select(cell: &Cell<2>) -> Selection<2> {
        let [x, y] = cell.ins;
        // The axis the point leans towards.
        let lean = if x > y { 0b01 } else { 0b10 };

        if cell.in_sum <= 1.0 {
            let z = 1.0 - cell.in_sum;
            let extra = if z > x || z > y {
                lowered(lean, 0)
            } else {
                [1, 1]
            };
            Selection {
                band: 0,
                extras: smallvec![extra],
            }
        } else {
            let z = 2.0 - cell.in_sum;
            let extra = if z < x || z < y {
                raised(lean, 0)
            } else {
                [0, 0]
            };
            Selection {
                band: 1,
                extras: smallvec![extra],
            }
        }
    }
}
