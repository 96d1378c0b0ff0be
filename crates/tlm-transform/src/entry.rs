//! Per-record transformation.
//!
//! Turns a [`RawRecord`] into a [`NormalizedRecord`]:
//!
//! 1. densify the matrix to `rows x cols`, with `cols` taken from the first
//!    row; cells missing from shorter rows stay `0.0`, extra cells in longer
//!    rows are ignored
//! 2. coerce every cell with the scalar normalizer
//! 3. reverse the row order
//! 4. divide the timestamp column by [`TIMESTAMP_DIVISOR`] (ms to s)
//! 5. merge categorical state attributes

use tlm_model::{Matrix, NormalizedRecord, RawRecord};
use tracing::debug_span;

use crate::normalization::apply_state_attributes;
use crate::normalization::scalar::normalize_into;

/// Column holding the millisecond timestamp.
pub const TIMESTAMP_COLUMN: usize = 0;

/// Divisor applied to [`TIMESTAMP_COLUMN`] after reversal.
pub const TIMESTAMP_DIVISOR: f64 = 1000.0;

/// Normalizes one raw record. Never fails; bad cells become `0.0` and are
/// listed in [`NormalizedRecord::warnings`].
pub fn transform(raw: RawRecord) -> NormalizedRecord {
    let span = debug_span!("transform", category = %raw.category);
    let _guard = span.enter();

    let RawRecord {
        category,
        labels,
        mut attributes,
        scalar_flag,
        matrix: raw_matrix,
    } = raw;

    let mut warnings = Vec::new();
    let matrix = match raw_matrix.first() {
        None => Matrix::default(),
        Some(first) => {
            let rows = raw_matrix.len();
            let cols = first.len();
            let mut matrix = Matrix::zeros(rows, cols);
            for (i, raw_row) in raw_matrix.iter().enumerate() {
                for (j, cell) in raw_row.iter().take(cols).enumerate() {
                    matrix.set(i, j, normalize_into(cell, i, j, &mut warnings));
                }
            }
            matrix.reverse_rows();
            matrix.scale_column(TIMESTAMP_COLUMN, TIMESTAMP_DIVISOR);
            matrix
        }
    };

    apply_state_attributes(&category, &mut attributes);

    NormalizedRecord {
        category,
        labels,
        attributes,
        scalar_flag,
        matrix,
        warnings,
    }
}
