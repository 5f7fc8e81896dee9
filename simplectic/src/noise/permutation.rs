//! The 256-entry permutation table driving lattice hashing.

use std::array;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::gradient::GRADIENT_COUNT_3D;
use crate::random::Lcg64;

/// Number of entries in a permutation table.
pub const TABLE_SIZE: usize = 256;

/// Ken Perlin's reference permutation from "Improved Noise".
///
/// Used when no seed or table is supplied.
const PERLIN_TABLE: [u8; TABLE_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, //
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, //
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32, //
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175, //
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, //
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, //
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, //
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64, //
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, //
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, //
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, //
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104, //
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241, //
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, //
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, //
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// An error raised when a supplied permutation table is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// The table does not have exactly 256 entries.
    #[error("permutation table must have {expected} entries, got {actual}")]
    Length {
        /// Required number of entries.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// A value appears more than once, so the table is not a bijection.
    #[error("value {value} is repeated at index {first} and {second}")]
    Duplicate {
        /// The repeated value.
        value: u8,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the second occurrence.
        second: usize,
    },
}

/// A bijection on `0..=255` used to hash integer lattice coordinates.
///
/// Immutable once built. Alongside the table it keeps the 3D gradient offsets
/// (`(perm[i] % 24) * 3`), so the hot path never needs a modulo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    perm: [u8; TABLE_SIZE],
    gradient_offsets_3d: [u8; TABLE_SIZE],
}

impl Permutation {
    /// Build a permutation by shuffling the identity table with a seeded LCG.
    ///
    /// Identical seeds produce identical tables on every platform.
    #[must_use]
    pub fn from_seed(seed: i64) -> Self {
        let mut source: [u8; TABLE_SIZE] = array::from_fn(|i| i as u8);
        let mut perm = [0u8; TABLE_SIZE];
        let mut rng = Lcg64::from_seed(seed);

        // Fisher-Yates from the top down: each slot takes a random remaining
        // value, and the vacated source slot is refilled from the top.
        for i in (0..TABLE_SIZE).rev() {
            let r = rng.next_bounded(i as i64 + 1) as usize;
            perm[i] = source[r];
            source[r] = source[i];
        }

        tracing::debug!(seed, "built permutation table from seed");
        Self::with_table(perm)
    }

    /// Use a caller-supplied table verbatim.
    ///
    /// The table is expected to be a bijection but this is not enforced: a
    /// table with repeated values is accepted and only degrades the noise.
    /// A warning is logged when that happens. Use [`Self::try_from_table`]
    /// to reject such tables instead.
    #[must_use]
    pub fn from_table(table: &[u8; TABLE_SIZE]) -> Self {
        if let Some((value, first, second)) = find_duplicate(table) {
            tracing::warn!(
                value,
                first,
                second,
                "supplied permutation table is not a bijection; noise quality will degrade"
            );
        } else {
            tracing::debug!("using supplied permutation table");
        }
        Self::with_table(*table)
    }

    /// Use a caller-supplied table after checking that it is a bijection.
    pub fn try_from_table(table: &[u8]) -> Result<Self, PermutationError> {
        let Ok(table) = <&[u8; TABLE_SIZE]>::try_from(table) else {
            return Err(PermutationError::Length {
                expected: TABLE_SIZE,
                actual: table.len(),
            });
        };
        if let Some((value, first, second)) = find_duplicate(table) {
            return Err(PermutationError::Duplicate {
                value,
                first,
                second,
            });
        }
        Ok(Self::with_table(*table))
    }

    fn with_table(perm: [u8; TABLE_SIZE]) -> Self {
        let gradient_offsets_3d = perm.map(|p| (p % GRADIENT_COUNT_3D) * 3);
        Self {
            perm,
            gradient_offsets_3d,
        }
    }

    /// The raw table.
    #[must_use]
    pub const fn as_slice(&self) -> &[u8; TABLE_SIZE] {
        &self.perm
    }

    /// Whether every value `0..=255` appears exactly once.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        find_duplicate(&self.perm).is_none()
    }

    /// Fold lattice coordinates through the table, left to right.
    ///
    /// Computes `perm[(...perm[(perm[c0 & 0xFF] + c1) & 0xFF]... + cN) & 0xFF]`.
    #[inline]
    pub(crate) fn hash<const N: usize>(&self, vertex: &[i64; N]) -> u8 {
        self.perm[self.slot(vertex)]
    }

    /// Offset of the 3D gradient for `vertex`.
    ///
    /// The offset table stands in for the last lookup of [`Self::hash`].
    #[inline]
    pub(crate) fn gradient_offset_3d(&self, vertex: &[i64; 3]) -> u8 {
        self.gradient_offsets_3d[self.slot(vertex)]
    }

    /// Table index of the final lookup of the fold.
    #[inline]
    fn slot<const N: usize>(&self, vertex: &[i64; N]) -> usize {
        let Some((&last, rest)) = vertex.split_last() else {
            return 0;
        };
        let h = rest.iter().fold(0u8, |h, &c| self.perm[wrap_index(h, c)]);
        wrap_index(h, last)
    }
}

#[inline]
fn wrap_index(h: u8, c: i64) -> usize {
    (i64::from(h).wrapping_add(c) & 0xFF) as usize
}

impl Default for Permutation {
    fn default() -> Self {
        Self::with_table(PERLIN_TABLE)
    }
}

/// The first repeated value in a full-size table, with the indices of its
/// first two occurrences.
fn find_duplicate(table: &[u8; TABLE_SIZE]) -> Option<(u8, usize, usize)> {
    let mut seen: [Option<usize>; TABLE_SIZE] = [None; TABLE_SIZE];
    for (index, &value) in table.iter().enumerate() {
        if let Some(first) = seen[usize::from(value)] {
            return Some((value, first, index));
        }
        seen[usize::from(value)] = Some(index);
    }
    None
}

/// How a noise field obtains its permutation table.
///
/// Serializable so that callers can keep noise settings in their own
/// configuration files. Tables coming from configuration are always validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermutationSource {
    /// Ken Perlin's reference table.
    #[default]
    Default,
    /// A table shuffled from a 64-bit seed.
    Seed(i64),
    /// An explicit table of 256 distinct bytes.
    Table(Vec<u8>),
}

impl TryFrom<PermutationSource> for Permutation {
    type Error = PermutationError;

    fn try_from(source: PermutationSource) -> Result<Self, Self::Error> {
        match source {
            PermutationSource::Default => Ok(Self::default()),
            PermutationSource::Seed(seed) => Ok(Self::from_seed(seed)),
            PermutationSource::Table(table) => Self::try_from_table(&table),
        }
    }
}
