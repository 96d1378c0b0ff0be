//! Telemetry record transformation.
//!
//! This crate turns raw records into storable ones:
//!
//! - **normalization**: scalar coercion to `f64` and categorical state codes
//! - **entry**: per-record matrix densification, row reversal and timestamp rescale
//! - **naming**: namespace-local unique dataset names
//! - **layout**: storage shape, chunking and compression planning

pub mod entry;
pub mod layout;
pub mod naming;
pub mod normalization;

pub use entry::{TIMESTAMP_COLUMN, TIMESTAMP_DIVISOR, transform};
pub use layout::{GROUPED_VALUE_COLUMNS, plan, plan_for, plan_grouped, plan_with};
pub use naming::{NameRegistry, ResolvedName, resolve};
pub use normalization::{
    CATEGORICAL_ENCODINGS, CategoricalEncoding, apply_state_attributes, coerce, normalize,
    token_code,
};
