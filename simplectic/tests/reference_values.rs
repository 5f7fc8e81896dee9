//! Reference value regression tests.
//!
//! Checks evaluation against values recorded from an independent
//! implementation of the same algorithm. The 3D values for the default table
//! also agree with the 2014 C++ `OpenSimplex` port to within 1e-15; the last
//! bits differ because that port sums the octahedron vertices in another
//! order and raises the kernel with `pow`.
//!
//! Values are loaded from `reference_values.json`.

use approx::assert_abs_diff_eq;
use serde::Deserialize;
use simplectic::{NoiseField, PermutationSource};

#[derive(Deserialize)]
struct ReferenceJson {
    tolerance: f64,
    tables: Vec<TableReference>,
}

/// Expected values for one permutation table.
#[derive(Deserialize)]
struct TableReference {
    source: PermutationSource,
    eval2: Vec<Expected<2>>,
    eval3: Vec<Expected<3>>,
    eval4: Vec<Expected<4>>,
}

#[derive(Deserialize)]
struct Expected<const N: usize> {
    #[serde(with = "serde_arrays")]
    point: [f64; N],
    value: f64,
}

/// Reads a point as a sequence and checks it has exactly `N` coordinates.
mod serde_arrays {
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[f64; N], D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        let len = values.len();
        let expected = "a point of matching dimension";
        values
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &expected))
    }
}

fn load_reference() -> ReferenceJson {
    let json_str = include_str!("../test_assets/reference_values.json");
    serde_json::from_str(json_str).expect("Failed to parse reference_values.json")
}

#[test]
fn matches_recorded_values() {
    let reference = load_reference();
    assert_eq!(reference.tables.len(), 4);

    for table in reference.tables {
        let label = format!("{:?}", table.source);
        let field = NoiseField::try_from(table.source).expect("reference tables are valid");

        for expected in table.eval2 {
            let [x, y] = expected.point;
            let actual = field.eval2(x, y);
            assert_abs_diff_eq!(actual, expected.value, epsilon = reference.tolerance);
            assert!(actual.is_finite(), "{label}: eval2({x}, {y})");
        }
        for expected in table.eval3 {
            let [x, y, z] = expected.point;
            let actual = field.eval3(x, y, z);
            assert_abs_diff_eq!(actual, expected.value, epsilon = reference.tolerance);
            assert!(actual.is_finite(), "{label}: eval3({x}, {y}, {z})");
        }
        for expected in table.eval4 {
            let [x, y, z, w] = expected.point;
            let actual = field.eval4(x, y, z, w);
            assert_abs_diff_eq!(actual, expected.value, epsilon = reference.tolerance);
            assert!(actual.is_finite(), "{label}: eval4({x}, {y}, {z}, {w})");
        }
    }
}

#[test]
fn origin_is_zero_in_2d() {
    assert_abs_diff_eq!(NoiseField::default().eval2(0.0, 0.0), 0.0);
    for seed in [0, 42] {
        assert_abs_diff_eq!(NoiseField::new(seed).eval2(0.0, 0.0), 0.0);
    }
}

#[test]
fn seeded_tables_match_reference_shuffle() {
    let field = NoiseField::new(0);
    let table = field.permutation().as_slice();
    assert_eq!(table[..8], [254, 50, 92, 24, 36, 10, 190, 16]);
    assert_eq!(table[252..], [158, 167, 44, 211]);

    let table = *NoiseField::new(-7919).permutation().as_slice();
    assert_eq!(table[..8], [113, 35, 216, 84, 147, 85, 221, 19]);
}
