// File: crates/hits-core/src/cumulative.rs
// Summary: Running-sum transform over aligned rows.

use crate::align::AlignedMatrix;

/// How absent samples are treated by [`accumulate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CumulativeMode {
    /// Absent stays absent and leaves the running sum untouched.
    #[default]
    GapPreserving,
    /// Absent counts as 0; the output carries the running sum at every point.
    ZeroFill,
}

/// Replace every row by its left-to-right running sum. The axis passes through.
///
/// Not idempotent: apply once per frame.
pub fn accumulate(matrix: &AlignedMatrix, mode: CumulativeMode) -> AlignedMatrix {
    AlignedMatrix {
        axis: matrix.axis.clone(),
        rows: matrix.rows.iter().map(|row| accumulate_row(row, mode)).collect(),
    }
}

pub fn accumulate_row(row: &[Option<f64>], mode: CumulativeMode) -> Vec<Option<f64>> {
    let mut sum = 0.0;
    row.iter()
        .map(|&v| match (v, mode) {
            // A parse failure degrades only its own point.
            (Some(x), _) if x.is_nan() => Some(x),
            (Some(x), _) => {
                sum += x;
                Some(sum)
            }
            (None, CumulativeMode::GapPreserving) => None,
            (None, CumulativeMode::ZeroFill) => Some(sum),
        })
        .collect()
}
