//! Normalization of raw cell values.
//!
//! - **scalar**: coercion of one heterogeneous cell to `f64`
//! - **categorical**: token vocabularies and per-category state attributes

pub mod categorical;
pub mod scalar;

pub use categorical::{
    CATEGORICAL_ENCODINGS, CategoricalEncoding, apply_state_attributes, token_code,
};
pub use scalar::{coerce, normalize};
