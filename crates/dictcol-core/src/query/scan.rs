//! Equality scans over an encoded column.
//!
//! Two interchangeable strategies return the same ascending list of row
//! positions:
//!
//! | Strategy | How |
//! |----------|-----|
//! | `Vectorized` | 8 codes per step with `wide::i32x8` lane compare + bitmask |
//! | `Scalar` | one comparison per row |
//!
//! Vectorized here means bulk lane-wise work on one thread, not parallelism.

use wide::{i32x8, CmpEq};

use crate::dictionary::Code;

const LANES: usize = 8;

/// Scan strategy used by the encoded-column queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// SIMD lane compare (default).
    #[default]
    Vectorized,
    /// Row-by-row loop.
    Scalar,
}

impl ScanStrategy {
    /// Picks the strategy from the `vectorized` configuration flag.
    #[must_use]
    pub fn from_flag(vectorized: bool) -> Self {
        if vectorized {
            Self::Vectorized
        } else {
            Self::Scalar
        }
    }

    /// Returns the positions of every row equal to `code`, ascending.
    #[must_use]
    pub fn scan_eq(self, encoded: &[Code], code: Code) -> Vec<usize> {
        match self {
            Self::Vectorized => scan_eq_vectorized(encoded, code),
            Self::Scalar => scan_eq_scalar(encoded, code),
        }
    }
}

/// Row-by-row equality scan.
#[must_use]
pub fn scan_eq_scalar(encoded: &[Code], code: Code) -> Vec<usize> {
    encoded
        .iter()
        .enumerate()
        .filter_map(|(idx, &value)| (value == code).then_some(idx))
        .collect()
}

/// SIMD equality scan.
///
/// Codes are reinterpreted as `i32` lanes; equality is preserved by the bit
/// cast. The tail that does not fill a full register is scanned scalar.
#[must_use]
pub fn scan_eq_vectorized(encoded: &[Code], code: Code) -> Vec<usize> {
    let needle = i32x8::splat(code as i32);
    let mut positions = Vec::new();

    let blocks = encoded.chunks_exact(LANES);
    let tail = blocks.remainder();

    for (block_idx, block) in blocks.enumerate() {
        let lanes: [i32; LANES] = std::array::from_fn(|j| block[j] as i32);
        let mut mask = i32x8::from(lanes).cmp_eq(needle).move_mask() as u32;
        if mask == 0 {
            continue;
        }

        let base = block_idx * LANES;
        while mask != 0 {
            positions.push(base + mask.trailing_zeros() as usize);
            mask &= mask - 1;
        }
    }

    let tail_start = encoded.len() - tail.len();
    positions.extend(
        tail.iter()
            .enumerate()
            .filter_map(|(j, &value)| (value == code).then_some(tail_start + j)),
    );
    positions
}
