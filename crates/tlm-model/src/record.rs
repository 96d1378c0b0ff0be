//! Raw input records and their normalized form.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// One input record as decoded from JSON.
///
/// Field names follow the compact input keys: `c`, `l`, `a`, `la`, `v`.
/// Missing or `null` fields decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    /// Dotted category identifier, e.g. `s3p.activity`.
    #[serde(rename = "c", default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "l", default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(rename = "a", default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, u8>,
    #[serde(rename = "la", default, deserialize_with = "null_as_default")]
    pub scalar_flag: u8,
    /// Rows of heterogeneous cells; rows may differ in length.
    #[serde(rename = "v", default, deserialize_with = "null_as_default")]
    pub matrix: Vec<Vec<Scalar>>,
}

impl RawRecord {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_matrix(mut self, matrix: Vec<Vec<Scalar>>) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: u8) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_scalar_flag(mut self, flag: u8) -> Self {
        self.scalar_flag = flag;
        self
    }
}

/// Records that share one naming scope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    pub records: Vec<RawRecord>,
}

impl Namespace {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Why a cell fell back to `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// String outside the known vocabularies that is not a number either.
    UnparseableText { text: String },
    /// Cell of a type the normalizer has no rule for.
    UnsupportedType { kind: &'static str, raw: String },
}

/// A cell that could not be coerced and was replaced by `0.0`.
///
/// `row` and `col` index the raw matrix, before row reversal.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    pub row: usize,
    pub col: usize,
    pub kind: WarningKind,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnparseableText { text } => write!(
                f,
                "cannot convert string '{text}' at [{}][{}] to a number, using 0.0",
                self.row, self.col
            ),
            WarningKind::UnsupportedType { kind, raw } => write!(
                f,
                "unsupported type at [{}][{}]: {kind} with value {raw}, using 0.0",
                self.row, self.col
            ),
        }
    }
}

/// A record whose matrix has been coerced, reordered and rescaled.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub category: String,
    pub labels: BTreeMap<String, String>,
    /// Input attributes with categorical state codes merged in.
    pub attributes: BTreeMap<String, u8>,
    pub scalar_flag: u8,
    pub matrix: Matrix,
    pub warnings: Vec<CoercionWarning>,
}

impl NormalizedRecord {
    /// True when the record carries no data and must not be persisted.
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
