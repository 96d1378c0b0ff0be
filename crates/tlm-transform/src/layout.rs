//! Storage layout planning.
//!
//! Flat datasets are chunked one column per chunk (`[rows, 1]`): readers scan
//! single channels over time far more often than whole rows.

use tlm_model::{Compression, ConversionOptions, LayoutMode, LayoutPlan};

/// Width of the `values` dataset in the grouped layout.
pub const GROUPED_VALUE_COLUMNS: usize = 2;

/// Plans a flat-layout dataset with maximum compression.
pub fn plan(rows: usize, cols: usize) -> LayoutPlan {
    plan_with(rows, cols, Compression::max())
}

/// Plans a flat-layout dataset with the given compression.
pub fn plan_with(rows: usize, cols: usize, compression: Compression) -> LayoutPlan {
    LayoutPlan {
        shape: [rows as u64, cols as u64],
        chunk_shape: [rows as u64, 1],
        compression,
    }
}

/// Plans the fixed-width, single-chunk, uncompressed `values` dataset of the
/// grouped layout.
pub fn plan_grouped(rows: usize) -> LayoutPlan {
    let width = GROUPED_VALUE_COLUMNS as u64;
    LayoutPlan {
        shape: [rows as u64, width],
        chunk_shape: [rows as u64, width],
        compression: Compression::None,
    }
}

/// Plans a dataset according to the run's layout mode.
pub fn plan_for(rows: usize, cols: usize, options: &ConversionOptions) -> LayoutPlan {
    match options.layout {
        LayoutMode::Flat => plan_with(rows, cols, options.compression),
        LayoutMode::Grouped => plan_grouped(rows),
    }
}
