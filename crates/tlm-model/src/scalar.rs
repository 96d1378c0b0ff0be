//! Heterogeneous matrix cells.
//!
//! Input matrices mix numbers, booleans and strings. Everything is folded into
//! [`Scalar`] at deserialization time so downstream code only ever matches on a
//! closed set of variants.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One cell of a raw input matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON number (integers are widened to `f64`).
    Number(f64),
    /// JSON boolean.
    Bool(bool),
    /// JSON string.
    Text(String),
    /// Any other JSON value (`null`, array, object).
    Unsupported {
        /// JSON type name.
        kind: &'static str,
        /// Compact JSON rendering of the value.
        raw: String,
    },
}

impl Scalar {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the JSON type name of this cell.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Text(_) => "string",
            Self::Unsupported { kind, .. } => kind,
        }
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => match number.as_f64() {
                Some(v) => Self::Number(v),
                None => Self::Unsupported {
                    kind: "number",
                    raw: number.to_string(),
                },
            },
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::Text(s),
            Value::Null => Self::Unsupported {
                kind: "null",
                raw: "null".to_string(),
            },
            other @ Value::Array(_) => Self::Unsupported {
                kind: "array",
                raw: other.to_string(),
            },
            other @ Value::Object(_) => Self::Unsupported {
                kind: "object",
                raw: other.to_string(),
            },
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Unsupported { raw, .. } => write!(f, "{raw}"),
        }
    }
}
